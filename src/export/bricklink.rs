use crate::error::ExportError;
use crate::model::{Inventory, Mapping};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const ROOT: &str = "INVENTORY";
const ITEM: &str = "ITEM";
const ITEM_TYPE_PART: &str = "P";
const CONDITION_NEW: &str = "N";

/// Outcome of writing an inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub items: usize,
    pub unmapped_colors: BTreeSet<String>,
}

/// Streams `<ITEM>` entries inside an `<INVENTORY>` root.
///
/// The root is opened on construction and closed by [`BricklinkWriter::finish`].
/// A writer dropped without `finish` still closes the root, so an interrupted
/// export leaves well-formed XML behind.
pub struct BricklinkWriter<W: Write> {
    writer: Writer<W>,
    closed: bool,
}

impl<W: Write> BricklinkWriter<W> {
    pub fn new(inner: W) -> io::Result<Self> {
        let mut writer = Writer::new_with_indent(inner, b' ', 2);
        writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
        Ok(Self {
            writer,
            closed: false,
        })
    }

    pub fn write_item(&mut self, color: &str, part: &str, quantity: usize) -> io::Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(ITEM)))?;
        self.write_field("ITEMTYPE", ITEM_TYPE_PART)?;
        self.write_field("COLOR", color)?;
        self.write_field("ITEMID", part)?;
        self.write_field("MINQTY", &quantity.to_string())?;
        self.write_field("CONDITION", CONDITION_NEW)?;
        self.writer.write_event(Event::End(BytesEnd::new(ITEM)))
    }

    /// Writes one item per distinct element, translating identifiers through
    /// `mapping` when given.
    ///
    /// Colors missing from the mapping are kept as-is and reported once each.
    /// Parts no rule matches are kept as-is without notice.
    pub fn write_inventory(
        &mut self,
        inventory: &Inventory,
        mapping: Option<&Mapping>,
    ) -> io::Result<WriteReport> {
        let mut report = WriteReport::default();

        for (element, quantity) in inventory.iter() {
            let (color, part) = match mapping {
                Some(mapping) => {
                    let color = mapping.color(&element.color).unwrap_or_else(|| {
                        if report.unmapped_colors.insert(element.color.clone()) {
                            warn!(color = %element.color, "no mapping for color");
                        }
                        element.color.as_str()
                    });
                    (color, mapping.part(&element.part))
                }
                None => (element.color.as_str(), element.part.clone()),
            };
            self.write_item(color, &part, quantity)?;
            report.items += 1;
        }

        Ok(report)
    }

    /// Closes the root element and flushes.
    pub fn finish(mut self) -> io::Result<()> {
        self.close()
    }

    fn write_field(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn close(&mut self) -> io::Result<()> {
        // Only one attempt, whether from finish or drop.
        self.closed = true;
        self.writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
        self.writer.get_mut().flush()
    }
}

impl<W: Write> Drop for BricklinkWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.close() {
                debug!(error = %e, "failed to close inventory root");
            }
        }
    }
}

/// Writes `inventory` as a BrickLink XML file at `path`.
///
/// The file must not exist yet; an existing file is never overwritten.
///
/// # Errors
///
/// Returns [`ExportError::FileCreate`] if the file exists or cannot be created.
/// Returns [`ExportError::Write`] if writing fails partway.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_bricklink<P: AsRef<Path>>(
    path: P,
    inventory: &Inventory,
    mapping: Option<&Mapping>,
) -> Result<WriteReport, ExportError> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| ExportError::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;
    let write_error = |source: io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BricklinkWriter::new(BufWriter::new(file)).map_err(write_error)?;
    let report = writer.write_inventory(inventory, mapping).map_err(write_error)?;
    writer.finish().map_err(write_error)?;

    info!(items = report.items, "wrote BrickLink inventory");
    Ok(report)
}

/// The output path for an input file: its full name with `.xml` appended.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".xml");
    PathBuf::from(name)
}
