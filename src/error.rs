//! Error types for the LDraw to BrickLink converter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading LDraw files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to open the LDraw file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed partway through reading, e.g. on invalid UTF-8.
    #[error("failed to read line {line_number}: {source}")]
    Read {
        line_number: usize,
        source: std::io::Error,
    },

    /// A part placement line does not carry enough tokens.
    #[error("malformed part placement on line {line_number}: '{line}'")]
    MalformedLine { line_number: usize, line: String },
}

/// Errors that can occur when loading a mapping document.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Failed to read the mapping document from disk.
    #[error("failed to read mapping '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("invalid mapping document: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// A part rule key is not a valid regular expression.
    #[error("invalid part pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors that can occur when writing BrickLink files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file, including when it already exists.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
