use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{SIGINT, SIGQUIT, SIG_DFL, SIG_ERR};

use crate::process::ProcessError;

/// Keeps the shell alive on Ctrl-C and records that it happened.
///
/// The terminal delivers SIGINT to the whole foreground group, so the child
/// sees it too; the shell only notes it.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>, ProcessError> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&flag)).map_err(ProcessError::SignalSetup)?;
    Ok(flag)
}

/// Returns whether an interrupt arrived since the last call.
pub fn take_interrupt(flag: &AtomicBool) -> bool {
    flag.swap(false, Ordering::SeqCst)
}

/// Puts SIGINT and SIGQUIT back to their defaults. Runs in the child
/// between fork and exec, so it only makes async-signal-safe calls.
pub fn restore_default_dispositions() -> io::Result<()> {
    for sig in [SIGINT, SIGQUIT] {
        // SAFETY: signal(2) is async-signal-safe and SIG_DFL is always valid.
        if unsafe { libc::signal(sig, SIG_DFL) } == SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}
