pub mod engine;
pub mod offset_locator;

pub use engine::{TailOutcome, TextFileTailer};
pub use offset_locator::{locate, LocatedOffset, OffsetRing, LINE_DELIMITER};

use crate::cancel::CancelToken;
use crate::error::TailError;
use crate::event::TailListener;

/// Something that tails one source and feeds its lines to a listener
pub trait TailedReader {
    /// What is being tailed (a path for files)
    type Source: ?Sized;

    /// Where emitted lines go
    type Listener: TailListener;

    fn source(&self) -> &Self::Source;

    fn listener(&self) -> &Self::Listener;

    /// Drive output until the line budget or end of file is reached, or,
    /// when following, until `cancel` fires.
    fn run(&self, cancel: &CancelToken) -> Result<TailOutcome, TailError>;
}
