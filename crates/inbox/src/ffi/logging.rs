//! Log bridge that forwards `log` records to the host app
//!
//! The host installs a `LogCallback` (os_log on Apple platforms, Logcat on
//! Android). Records are dropped until a callback is set.

use std::sync::{Arc, OnceLock, RwLock};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use super::types::{FfiLogLevel, LogCallback};

static HOST_LOGGER: OnceLock<HostLogger> = OnceLock::new();

struct Sink {
    callback: Option<Arc<dyn LogCallback>>,
    level: LevelFilter,
}

struct HostLogger {
    sink: RwLock<Sink>,
}

impl HostLogger {
    fn update(&self, f: impl FnOnce(&mut Sink)) {
        if let Ok(mut sink) = self.sink.write() {
            f(&mut sink);
        }
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.sink
            .read()
            .is_ok_and(|sink| sink.callback.is_some() && metadata.level() <= sink.level)
    }

    fn log(&self, record: &Record) {
        let Ok(sink) = self.sink.read() else {
            return;
        };
        if record.level() > sink.level {
            return;
        }
        if let Some(callback) = sink.callback.as_ref() {
            // Never log from inside the callback path; it would recurse
            callback.on_log(
                FfiLogLevel::from(record.level()),
                record.target().to_string(),
                record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

/// Install the host logger as the global `log` backend
///
/// Fails if another logger is already installed.
pub fn init_ffi_logger(max_level: FfiLogLevel) -> Result<(), SetLoggerError> {
    let level = LevelFilter::from(max_level);
    let logger = HOST_LOGGER.get_or_init(|| HostLogger {
        sink: RwLock::new(Sink {
            callback: None,
            level,
        }),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Replace (or clear, with `None`) the callback receiving log records
pub fn set_log_callback(callback: Option<Arc<dyn LogCallback>>) {
    if let Some(logger) = HOST_LOGGER.get() {
        logger.update(|sink| sink.callback = callback);
    }
}

/// Change the most verbose level forwarded to the host
pub fn set_log_level(max_level: FfiLogLevel) {
    if let Some(logger) = HOST_LOGGER.get() {
        let level = LevelFilter::from(max_level);
        logger.update(|sink| sink.level = level);
        log::set_max_level(level);
    }
}
