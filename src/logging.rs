// Conditional logging macros - only active in debug builds

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "wordle-clone.log";

/// `<local data dir>/wordle-clone/wordle-clone.log`, if the platform has one.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("wordle-clone").join(LOG_FILE_NAME))
}

/// Where log records go.
///
/// With `log_file` set they go to that file. Otherwise they go to stderr, or
/// are discarded when stderr is not allowed, e.g. while the full-screen
/// interface owns the terminal.
fn log_target(log_file: Option<&Path>, allow_stderr: bool) -> env_logger::Target {
    if let Some(path) = log_file {
        let opened = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| File::create(path));
        match opened {
            Ok(file) => return env_logger::Target::Pipe(Box::new(file)),
            Err(e) => eprintln!("Cannot open log file '{}': {e}", path.display()),
        }
    }
    if allow_stderr {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Pipe(Box::new(io::sink()))
    }
}

/// Install the `env_logger` backend.
///
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging(log_file: Option<&Path>, allow_stderr: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.target(log_target(log_file, allow_stderr));

    if builder.try_init().is_err() {
        debug_log!("init_logging() - logger already installed");
    }
}
