use std::io;

use thiserror::Error;

/// Reasons an ASCII layout cannot become a playable grid.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown character {found:?} at row {row}, column {column}")]
    UnknownCell {
        row: usize,
        column: usize,
        found: char,
    },
    #[error("layout has no player start ('P')")]
    MissingStart,
    #[error("layout has more than one player start (second at row {row}, column {column})")]
    DuplicateStart { row: usize, column: usize },
    #[error("layout has no pellets")]
    NoPellets,
    #[error("layout is {columns}x{rows}, larger than {max}x{max}")]
    TooLarge {
        columns: usize,
        rows: usize,
        max: usize,
    },
}

/// Top-level failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read layout {path}: {source}")]
    LayoutFile { path: String, source: io::Error },
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("failed to open log file {path}: {source}")]
    LogFile { path: String, source: io::Error },
    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
