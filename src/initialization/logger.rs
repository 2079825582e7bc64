//! Logger initialization.

use std::io::{self, Write};

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Resolver and HTTP internals that would drown out scan output at debug level.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `RUST_LOG` is read first, then `level` overrides it for the scanner's own
/// modules. Plain output is colored; JSON output writes one object per line
/// with `ts`, `level`, `target` and `msg`.
///
/// ```bash
/// RUST_LOG=mail_spoof=debug,hickory_resolver=debug mail_spoof -d example.com
/// mail_spoof --iL domains.txt --log-format json 2> scan.log
/// ```
///
/// # Errors
///
/// `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, ceiling) in NOISY_MODULES {
        builder.filter_module(module, (*ceiling).min(level));
    }
    builder.filter_module("mail_spoof", level);

    match format {
        LogFormat::Json => builder.format(format_json),
        LogFormat::Plain => builder.format(format_plain),
    };

    builder.try_init()?;
    Ok(())
}

fn format_json(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let msg = serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into());
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        msg
    )
}

fn format_plain(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let level = record.level();
    let (label, emoji) = match level {
        Level::Error => (level.to_string().red(), "❌"),
        Level::Warn => (level.to_string().yellow(), "⚠️"),
        Level::Info => (level.to_string().green(), "✔️"),
        Level::Debug => (level.to_string().blue(), "🔍"),
        Level::Trace => (level.to_string().purple(), "🔬"),
    };
    writeln!(
        buf,
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        label,
        record.args()
    )
}
