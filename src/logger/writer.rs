//! Log file writer

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Opens the log file, creating its directory first.
///
/// `Mutex<File>` is a `MakeWriter`, so the result plugs straight into a fmt layer.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<Mutex<File>, LoggerError> {
    if config.path.as_os_str().is_empty() {
        return Err(LoggerError::config("Log file path is empty"));
    }

    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Mutex::new(open_file(&config.path, config.append)?))
}

fn open_file(path: &Path, append: bool) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}
