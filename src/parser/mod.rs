pub mod ldraw;

pub use crate::error::ParseError;
pub use ldraw::{is_placement, parse_placement, read_ldraw, read_ldraw_file};
