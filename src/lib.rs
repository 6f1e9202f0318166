// Library interface for tailrs
// Exposes the tailing engine for the binary and for embedding

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod printer;
pub mod reader;
pub mod signal;

#[cfg(test)]
mod test_utils;
