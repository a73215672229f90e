// In: src/logging.rs

//! One-shot `env_logger` setup for host applications that do not install their
//! own `log` backend.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

use crate::error::Result;

static INIT_LOGGER: Once = Once::new();

/// Installs a global logger printing `[LEVEL] message` lines.
///
/// `RUST_LOG` still overrides `level` when set. If `log_file` is given, output is
/// appended to that file instead of stderr. Only the first successful call has
/// any effect; later calls return `Ok(())` without opening `log_file` or touching
/// the installed logger.
pub fn init_logging(level: LevelFilter, log_file: Option<&str>) -> Result<()> {
    if INIT_LOGGER.is_completed() {
        return Ok(());
    }

    // Open before entering the `Once` so a bad path surfaces as an error.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);
        builder.parse_default_env();

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });

    Ok(())
}
