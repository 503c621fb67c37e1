use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a subscriber writing to `log_file`.
///
/// The terminal belongs to the TUI, so without a log file no subscriber is
/// installed and engine events are discarded.
pub(crate) fn init(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = level_from_verbosity(verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .try_init()
        .context("failed to install log subscriber")?;
    tracing::info!(%level, path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), Level::INFO);
        assert_eq!(level_from_verbosity(1), Level::DEBUG);
        assert_eq!(level_from_verbosity(2), Level::TRACE);
        assert_eq!(level_from_verbosity(9), Level::TRACE);
    }
}
