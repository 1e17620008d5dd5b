use crate::config;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

static LOG_FILE: OnceLock<Mutex<std::fs::File>> = OnceLock::new();

/// Opens `<config dir>/logs/jotter.log`, keeping the previous run as `jotter.log.old`.
///
/// Until this runs (and in tests) every log call is a no-op.
pub fn init() {
    let log_dir = config::get_config_dir().join("logs");
    fs::create_dir_all(&log_dir).ok();

    let log_path = log_dir.join("jotter.log");

    if log_path.exists() {
        let old_path = log_dir.join("jotter.log.old");
        if old_path.exists() {
            let _ = fs::remove_file(&old_path);
        }
        let _ = fs::rename(&log_path, old_path);
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        options.mode(0o600);
    }

    match options.open(&log_path) {
        Ok(file) => {
            let _ = LOG_FILE.set(Mutex::new(file));
        }
        Err(e) => eprintln!("Failed to open log file {:?}: {}", log_path, e),
    }
}

fn write(level: &str, msg: &str) {
    if let Some(mutex) = LOG_FILE.get() {
        if let Ok(mut file) = mutex.lock() {
            let _ = writeln!(file, "[{}] {:5} {}", chrono::Local::now(), level, msg);
        }
    }
}

pub fn debug(msg: &str) {
    write("DEBUG", msg);
}

pub fn info(msg: &str) {
    write("INFO", msg);
}

pub fn warn(msg: &str) {
    write("WARN", msg);
}

pub fn error(msg: &str) {
    write("ERROR", msg);
}
