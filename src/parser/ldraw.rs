use crate::error::ParseError;
use crate::model::{Element, Inventory};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument};

const PLACEMENT_COMMAND: char = '1';
const PART_EXTENSION: &str = ".dat";

/// Reads an LDraw file and counts every part placed in it.
///
/// Only type 1 lines referencing a `.dat` file are counted, everything else
/// (comments, sub-model references, geometry) is skipped.
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be opened.
/// Returns [`ParseError::Read`] if a line cannot be read or is not UTF-8.
/// Returns [`ParseError::MalformedLine`] if a placement line has no color token.
///
/// # Example
///
/// ```no_run
/// use ldraw_bricklink::parser::read_ldraw_file;
///
/// let inventory = read_ldraw_file("model.ldr")?;
/// println!("{} parts", inventory.total_count());
/// # Ok::<(), ldraw_bricklink::error::ParseError>(())
/// ```
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_ldraw_file<P: AsRef<Path>>(path: P) -> Result<Inventory, ParseError> {
    let file = File::open(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    read_ldraw(BufReader::new(file))
}

/// Reads LDraw lines from any buffered source.
pub fn read_ldraw<R: BufRead>(reader: R) -> Result<Inventory, ParseError> {
    let mut inventory = Inventory::new();
    let mut line_count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ParseError::Read {
            line_number: index + 1,
            source,
        })?;
        line_count += 1;

        let line = line.trim();
        if is_placement(line) {
            let element = parse_placement(line).ok_or_else(|| ParseError::MalformedLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;
            inventory.add(element);
        }
    }

    debug!(
        lines = line_count,
        placements = inventory.total_count(),
        "read LDraw source"
    );
    Ok(inventory)
}

/// Whether a trimmed line places a part: starts with `1`, ends with `.dat`.
#[must_use]
pub fn is_placement(line: &str) -> bool {
    line.starts_with(PLACEMENT_COMMAND) && line.ends_with(PART_EXTENSION)
}

/// Extracts the color (second token) and part (last token minus `.dat`).
///
/// Returns `None` when the line has fewer than two tokens.
#[must_use]
pub fn parse_placement(line: &str) -> Option<Element> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let color = *tokens.get(1)?;
    let file_name = *tokens.last()?;
    let part = file_name.strip_suffix(PART_EXTENSION).unwrap_or(file_name);
    Some(Element::new(color, part))
}
