//! Process-wide logging for the activity links tools
//!
//! Every line goes to the console and is appended to a log file, formatted as
//! `<timestamp> - <LEVEL> - <message>`. The default level is INFO; `RUST_LOG`
//! overrides it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Writer that appends to the log file and echoes to stderr
struct TeeWriter {
    file: File,
    console: io::Stderr,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        // Console write failures are ignored
        let _ = self.console.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let _ = self.console.flush();
        Ok(())
    }
}

/// Level name as printed in the log; warnings spell out WARNING
fn level_name(level: Level) -> &'static str {
    match level {
        Level::Warn => "WARNING",
        other => other.as_str(),
    }
}

/// Render one log line (without trailing newline)
fn format_line(timestamp: &DateTime<Local>, level: Level, message: &std::fmt::Arguments) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level_name(level),
        message
    )
}

/// Open `path` for appending, creating its parent directory when needed
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Install the global logger writing to `log_file` and the console
///
/// Must be called once, at process start, before any `log` macro fires.
pub fn init<P: AsRef<Path>>(log_file: P) -> Result<()> {
    let file = open_log_file(log_file.as_ref())?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "{}", format_line(&Local::now(), record.level(), record.args()))
        })
        .target(Target::Pipe(Box::new(TeeWriter {
            file,
            console: io::stderr(),
        })))
        .try_init()
        .context("Logger already initialized")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let ts = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let line = format_line(&ts, Level::Warn, &format_args!("No sheet found"));
        assert_eq!(line, "2024-03-05 14:07:09,000 - WARNING - No sheet found");

        let line = format_line(&ts, Level::Error, &format_args!("Processing failed"));
        assert_eq!(line, "2024-03-05 14:07:09,000 - ERROR - Processing failed");
    }

    #[test]
    fn test_level_name() {
        assert_eq!(level_name(Level::Warn), "WARNING");
        assert_eq!(level_name(Level::Info), "INFO");
        assert_eq!(level_name(Level::Debug), "DEBUG");
    }

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");

        {
            let mut w = TeeWriter {
                file: open_log_file(&path).unwrap(),
                console: io::stderr(),
            };
            w.write_all(b"first\n").unwrap();
        }
        {
            let mut w = TeeWriter {
                file: open_log_file(&path).unwrap(),
                console: io::stderr(),
            };
            w.write_all(b"second\n").unwrap();
            w.flush().unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
