use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::AppError;

/// Filter used when `RUST_LOG` is unset; the TUI owns the screen.
const DEFAULT_FILTER: &str = "off";

/// Filter used when logging to a file and `RUST_LOG` is unset.
const DEFAULT_FILE_FILTER: &str = "info";

/// Installs the global logger.
///
/// With `log_file`, records go to that file (truncated) instead of stderr.
pub fn init(log_file: Option<&Path>) -> Result<(), AppError> {
    let default_filter = if log_file.is_some() {
        DEFAULT_FILE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| AppError::LogFile {
            path: path.display().to_string(),
            source,
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
