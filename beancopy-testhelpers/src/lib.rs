#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use beancopy_testhelpers_macros::test;
pub use color_eyre::eyre;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use std::sync::Once;

/// Name of the environment variable that sets the log level
pub const LOG_ENV: &str = "BEANCOPY_LOG";

struct SimpleLogger {
    level: LevelFilter,
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(),
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(),
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(),
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record.target().style(Style::new().dimmed()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Reads the log level from [`LOG_ENV`], defaulting to `debug`
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Debug)
}

/// Installs color-eyre and color-backtrace (except on miri), and sets up a
/// simple logger. Safe to call from every test: only the first call does
/// anything.
pub fn setup() {
    static SETUP: Once = Once::new();
    SETUP.call_once(|| {
        #[cfg(not(miri))]
        install_hooks();

        let level = level_from_env();
        // another logger may already be installed by the test binary
        if log::set_boxed_logger(Box::new(SimpleLogger { level })).is_ok() {
            log::set_max_level(level);
        }
    });
}

#[cfg(not(miri))]
fn install_hooks() {
    use color_eyre::config::HookBuilder;
    use regex::Regex;
    use std::sync::LazyLock;

    /// Panic machinery, the test runner and thread startup: never interesting
    static IGNORE_FRAMES: LazyLock<Option<Regex>> = LazyLock::new(|| {
        Regex::new(
            r"^(std::panic|core::panic|test::run_test|test::__rust_begin_short_backtrace|std::sys::(pal|backtrace)|std::thread::Builder|core::ops::function|<core::panic::|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once)",
        )
        .ok()
    });

    fn keep(name: &str) -> bool {
        IGNORE_FRAMES
            .as_ref()
            .is_none_or(|re| !re.is_match(name))
    }

    let eyre_filter = move |frames: &mut Vec<&color_eyre::config::Frame>| {
        frames.retain(|frame| frame.name.as_ref().is_none_or(|n| keep(&n.to_string())));
    };

    // a hook installed by someone else is fine too
    let _ = HookBuilder::default()
        .add_frame_filter(Box::new(eyre_filter))
        .install();

    {
        use color_backtrace::{BacktracePrinter, Frame};

        let filter = move |frames: &mut Vec<&Frame>| {
            frames.retain(|frame| frame.name.as_deref().is_none_or(keep));
        };

        let stderr = color_backtrace::termcolor::StandardStream::stderr(
            color_backtrace::termcolor::ColorChoice::Auto,
        );
        let printer = BacktracePrinter::new().add_frame_filter(Box::new(filter));
        printer.install(Box::new(stderr));
    }
}
