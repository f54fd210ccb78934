//! Console logger: bare messages on stdout, optional tee into a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Env, Target};
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Writes to stdout and, when a log file is open, a copy with ANSI codes removed.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `--quiet` shows warnings and errors only, `--verbose` adds debug messages
/// and timestamps. `RUST_LOG` overrides both.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let file = match logfile {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            Some(File::create(path)?)
        }
        None => None,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format(move |buf, record| {
            let message = match record.level() {
                Level::Error => format!(
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => format!(
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                _ => record.args().to_string(),
            };
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}",
                    chrono::Local::now()
                        .format("%H:%M:%S%.3f")
                        .if_supports_color(Stdout, |t| t.dimmed()),
                    record.level(),
                    message
                )
            } else {
                writeln!(buf, "{message}")
            }
        })
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .init();

    Ok(())
}
