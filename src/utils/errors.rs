//! Error reporting and panic handling.
//!
//! Fallible code in the crate returns [`color_eyre::Result`] and adds context with
//! `wrap_err`/`context` where the cause alone would be unclear. Errors bubble up to `main`,
//! where the color-eyre hook installed by [`init`] prints them after the terminal has been
//! restored by [`Tui`](crate::tui::Tui)'s `Drop`.
//!
//! Panics take a different route. The panic hook restores the terminal with
//! [`crate::tui::restore`] first, because raw mode would swallow the report. It then logs
//! the report with ANSI escapes stripped and exits with `EXIT_FAILURE`.
//!
//! - Debug builds print a full `better-panic` backtrace.
//! - Release builds write a `human-panic` crash dump and a short message pointing at it.
//!
//! [`trace_dbg!`](crate::trace_dbg) is `dbg!` for the log file.

use std::panic::PanicHookInfo;

use color_eyre::{Result, config::HookBuilder};
use tracing::error;

/// Install the color-eyre error hook and the panic hook. Call once, before entering the
/// terminal.
pub fn init() -> Result<()> {
    let (panic_hook, eyre_hook) = hook_builder().into_hooks();
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(r) = crate::tui::restore() {
            error!("Unable to exit Terminal: {:?}", r);
        }

        let report = panic_hook.panic_report(panic_info).to_string();
        error!("Error: {}", strip_ansi_escapes::strip_str(&report));
        print_report(panic_info, &report);

        std::process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

fn hook_builder() -> HookBuilder {
    HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
}

/// Crash dump and a short message for users
#[cfg(not(debug_assertions))]
fn print_report(panic_info: &PanicHookInfo<'_>, report: &str) {
    use human_panic::{handle_dump, metadata, print_msg};
    let metadata = metadata!();
    let file_path = handle_dump(&metadata, panic_info);
    if let Err(e) = print_msg(file_path, &metadata) {
        eprintln!("human-panic: printing error message to console failed: {e}");
    }
    eprintln!("{report}");
}

/// Full stacktrace while developing
#[cfg(debug_assertions)]
fn print_report(panic_info: &PanicHookInfo<'_>, _report: &str) {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(panic_info);
}

/// Similar to the `std::dbg!` macro, but generates `tracing` events rather
/// than printing to stdout.
///
/// By default, the verbosity level for the generated events is `DEBUG`, but
/// this can be customized.
#[macro_export]
macro_rules! trace_dbg {
    (target: $target:expr, level: $level:expr, $ex:expr) => {{
        match $ex {
            value => {
                tracing::event!(target: $target, $level, ?value, stringify!($ex));
                value
            }
        }
    }};
    (level: $level:expr, $ex:expr) => {
        $crate::trace_dbg!(target: module_path!(), level: $level, $ex)
    };
    (target: $target:expr, $ex:expr) => {
        $crate::trace_dbg!(target: $target, level: tracing::Level::DEBUG, $ex)
    };
    ($ex:expr) => {
        $crate::trace_dbg!(level: tracing::Level::DEBUG, $ex)
    };
}
