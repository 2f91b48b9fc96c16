use std::{
    collections::VecDeque,
    io::Write,
    sync::{Arc, Mutex},
};

use chrono::Local;
use formcoach_storage::{Key, LocalStorage};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 100;

static LOG: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Log entries kept under the `log` key of the JSON store, newest first.
pub struct StoredLog {
    storage: LocalStorage,
    lock: Mutex<()>,
}

impl StoredLog {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }
}

impl Repository for StoredLog {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        self.storage
            .get(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        // Storage may log while an entry is being written.
        let _guard = self
            .lock
            .try_lock()
            .map_err(|err| Error::Unknown(err.to_string()))?;
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(MAX_ENTRIES);
        self.storage
            .set(Key::Log, &entries)
            .map_err(|err| Error::Unknown(err.to_string()))
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<dyn Repository>, level: LevelFilter) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = Entry {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message: record.args().to_string(),
        };

        let _ = writeln!(
            std::io::stderr(),
            "{} {:5} {}",
            entry.time,
            entry.level,
            entry.message
        );

        let repository = LOG.lock().ok().and_then(|log| log.clone());
        if let Some(repository) = repository {
            let _ = repository.write_entry(entry);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(message: &str) -> Entry {
        Entry {
            time: "Jun 01 08:15:00".to_string(),
            level: Level::Warn,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_stored_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = StoredLog::new(LocalStorage::new(dir.path()));

        assert_eq!(log.read_entries().unwrap(), VecDeque::new());

        log.write_entry(entry("first")).unwrap();
        log.write_entry(entry("second")).unwrap();

        assert_eq!(
            log.read_entries().unwrap(),
            VecDeque::from([entry("second"), entry("first")])
        );
    }

    #[test]
    fn test_stored_log_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let log = StoredLog::new(LocalStorage::new(dir.path()));

        for i in 0..=MAX_ENTRIES {
            log.write_entry(entry(&i.to_string())).unwrap();
        }

        let entries = log.read_entries().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].message, MAX_ENTRIES.to_string());
        assert_eq!(entries[MAX_ENTRIES - 1].message, "1");
    }

    #[test]
    fn test_entry_format() {
        assert_eq!(
            serde_json::to_string(&entry("x")).unwrap(),
            r#"{"time":"Jun 01 08:15:00","level":"Warn","message":"x"}"#
        );
    }
}
