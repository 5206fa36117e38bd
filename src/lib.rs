//! # LDraw to BrickLink
//!
//! Converts LDraw brick models into BrickLink XML inventories.
//!
//! ## Features
//!
//! - Count every part placement per color and part
//! - Translate LDraw colors and part numbers to BrickLink ones with a JSON mapping
//! - Write a BrickLink wanted list / inventory upload file
//!
//! ## Example
//!
//! ```no_run
//! use ldraw_bricklink::export::{output_path_for, write_bricklink};
//! use ldraw_bricklink::parser::read_ldraw_file;
//! use std::path::Path;
//!
//! let input = Path::new("model.ldr");
//! let inventory = read_ldraw_file(input).expect("Failed to read");
//! println!("Parts: {}", inventory.total_count());
//! write_bricklink(output_path_for(input), &inventory, None).expect("Failed to write");
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
