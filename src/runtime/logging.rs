//! Log destination while the terminal UI owns the screen
//!
//! The UI draws on the alternate screen of the same tty as stderr, so log
//! records go to a file instead.

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use color_eyre::eyre::{Result as EyreResult, WrapErr};

pub const LOG_FILE_NAME: &str = "monosynth.log";

/// `$MONOSYNTH_LOG` if set, otherwise `monosynth.log` in the temp directory.
pub fn default_log_path() -> PathBuf {
    std::env::var_os("MONOSYNTH_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

/// Open `path` for appending, creating it if needed. The returned writer
/// plugs straight into `tracing_subscriber::fmt().with_writer(..)`.
pub fn open_log(path: &Path) -> EyreResult<Mutex<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    Ok(Mutex::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn appends_across_sessions() {
        let path = std::env::temp_dir().join(format!("monosynth-log-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        for line in ["first session", "second session"] {
            let log = open_log(&path).unwrap();
            writeln!(log.lock().unwrap(), "{line}").unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first session\nsecond session\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("monosynth-missing-{}", std::process::id()))
            .join(LOG_FILE_NAME);
        let err = open_log(&path).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
