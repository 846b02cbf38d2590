use std::fs::{self, File};
use std::io;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

/// Routes the `log` facade into `path`; the terminal itself is owned by the
/// game screen.
pub fn init_file_logger(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(path)?)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))
}
