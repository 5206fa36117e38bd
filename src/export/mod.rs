pub mod bricklink;

pub use crate::error::ExportError;
pub use bricklink::{output_path_for, write_bricklink, BricklinkWriter, WriteReport};
