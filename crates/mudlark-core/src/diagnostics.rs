//! Optional crash diagnostics.
//!
//! Nothing in the core depends on this. Binaries call
//! [`install_crash_hook`] once, early in `main`, to get a backtrace on
//! stderr when the process dies from a panic.

use std::backtrace::Backtrace;
use std::panic;
use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install a process-wide panic hook that logs the panic and prints a
/// backtrace, then defers to the previously installed hook.
///
/// Safe to call more than once; only the first call installs anything.
pub fn install_crash_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            log::error!("fatal: {}", info);
            eprintln!("{}", Backtrace::force_capture());
            previous(info);
        }));
    });
}
