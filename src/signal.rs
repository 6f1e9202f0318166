//! Ctrl+C and SIGTERM handling for follow mode.

use crate::cancel::CancelToken;
use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Route termination signals into a `CancelToken`.
///
/// The first SIGINT/SIGTERM cancels the token, letting every follower stop
/// after its current poll and the printer flush what it has. A second
/// signal, arriving while the token is already cancelled, exits with 1.
pub fn setup_shutdown_handlers() -> Result<CancelToken, std::io::Error> {
    let stop = Arc::new(AtomicBool::new(false));

    for sig in TERM_SIGNALS {
        // Registered first so it only sees `stop` as set on a repeated signal
        flag::register_conditional_shutdown(*sig, 1, Arc::clone(&stop))?;
        flag::register(*sig, Arc::clone(&stop))?;
    }

    Ok(CancelToken::from_flag(stop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_hook::consts::SIGTERM;
    use signal_hook::low_level::raise;

    #[test]
    fn test_first_signal_cancels() {
        let token = setup_shutdown_handlers().unwrap();
        assert!(!token.is_cancelled());

        raise(SIGTERM).unwrap();
        assert!(token.is_cancelled());
    }
}
