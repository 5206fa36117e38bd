use ldraw_bricklink::error::{ExportError, MappingError, ParseError};
use ldraw_bricklink::export::{output_path_for, write_bricklink};
use ldraw_bricklink::model::{Element, Mapping};
use ldraw_bricklink::parser::read_ldraw_file;
use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HOUSE: &str = "\
0 House
0 Name: house.ldr
0 Author: Test
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 4 0 -24 0 1 0 0 0 1 0 0 0 1 3001.dat
1 15 20 0 0 1 0 0 0 1 0 0 0 1 3002.dat
0 Comment
1 16 0 0 0 1 0 0 0 1 0 0 0 1 roof.ldr
";

/// Parses BrickLink XML back into (color, part, quantity) triples.
fn parse_items(xml: &str) -> Vec<(String, String, usize)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut items = Vec::new();
    let mut field = String::new();
    let mut current: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf).expect("well-formed XML") {
            Event::Start(e) => {
                field = String::from_utf8(e.name().as_ref().to_vec()).expect("UTF-8 tag");
            }
            Event::Text(t) => {
                let text = std::str::from_utf8(&t).expect("UTF-8 text").to_string();
                current.insert(field.clone(), text);
            }
            Event::End(e) if e.name().as_ref() == b"ITEM" => {
                assert_eq!(current["ITEMTYPE"], "P");
                assert_eq!(current["CONDITION"], "N");
                items.push((
                    current["COLOR"].clone(),
                    current["ITEMID"].clone(),
                    current["MINQTY"].parse().expect("numeric quantity"),
                ));
                current.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    items
}

fn write_model(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("house.ldr");
    fs::write(&path, content).expect("model written");
    path
}

#[test]
fn converts_sample_model() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), HOUSE);

    let inventory = read_ldraw_file(&input).expect("LDraw read");
    assert_eq!(inventory.count(&Element::new("4", "3001")), 2);
    assert_eq!(inventory.count(&Element::new("15", "3002")), 1);
    assert_eq!(inventory.total_count(), 3);
    assert_eq!(inventory.colors(), HashSet::from(["4", "15"]));
    assert_eq!(inventory.parts(), HashSet::from(["3001", "3002"]));

    let output = output_path_for(&input);
    assert_eq!(output, temp_dir.path().join("house.ldr.xml"));
    let report = write_bricklink(&output, &inventory, None).expect("BrickLink written");
    assert_eq!(report.items, 2);

    let xml = fs::read_to_string(&output).expect("output read");
    let items: BTreeSet<_> = parse_items(&xml).into_iter().collect();
    assert_eq!(
        items,
        BTreeSet::from([
            ("15".to_string(), "3002".to_string(), 1),
            ("4".to_string(), "3001".to_string(), 2),
        ])
    );
}

#[test]
fn written_items_match_inventory_counts() {
    let mut model = String::new();
    for (color, part, copies) in [("1", "3003", 4), ("2", "3003", 1), ("1", "3004", 3)] {
        for _ in 0..copies {
            model.push_str(&format!("1 {color} 0 0 0 1 0 0 0 1 0 0 0 1 {part}.dat\n"));
        }
    }
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), &model);
    let inventory = read_ldraw_file(&input).expect("LDraw read");
    assert_eq!(inventory.total_count(), 8);
    assert_eq!(inventory.distinct_count(), 3);

    let output = output_path_for(&input);
    write_bricklink(&output, &inventory, None).expect("BrickLink written");
    let items = parse_items(&fs::read_to_string(&output).expect("output read"));

    assert_eq!(items.len(), inventory.distinct_count());
    for (color, part, quantity) in items {
        assert_eq!(inventory.count(&Element::new(color, part)), quantity);
    }
}

#[test]
fn existing_destination_is_left_untouched() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), HOUSE);
    let output = output_path_for(&input);
    fs::write(&output, "keep me").expect("existing file written");

    let inventory = read_ldraw_file(&input).expect("LDraw read");
    let error = write_bricklink(&output, &inventory, None).expect_err("must not overwrite");

    assert!(matches!(
        error,
        ExportError::FileCreate { ref source, .. } if source.kind() == std::io::ErrorKind::AlreadyExists
    ));
    assert_eq!(fs::read_to_string(&output).expect("output read"), "keep me");
}

#[test]
fn mapping_document_translates_identifiers() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), HOUSE);
    let mapping_path = temp_dir.path().join("mapping.json");
    fs::write(
        &mapping_path,
        r#"{
            "colors": {"4": "5", "15": "1"},
            "parts": {"^30": "X", "X0": "Y"}
        }"#,
    )
    .expect("mapping written");

    let mapping = Mapping::from_path(&mapping_path).expect("mapping loaded");
    let inventory = read_ldraw_file(&input).expect("LDraw read");
    let output = output_path_for(&input);
    let report = write_bricklink(&output, &inventory, Some(&mapping)).expect("BrickLink written");

    assert!(report.unmapped_colors.is_empty());
    let items: BTreeSet<_> = parse_items(&fs::read_to_string(&output).expect("output read"))
        .into_iter()
        .collect();
    assert_eq!(
        items,
        BTreeSet::from([
            ("1".to_string(), "Y2".to_string(), 1),
            ("5".to_string(), "Y1".to_string(), 2),
        ])
    );
}

#[test]
fn mapping_without_colors_reports_each_color_once() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), HOUSE);
    let mapping = Mapping::from_json(r#"{"colors": {"72": "86"}, "parts": {}}"#).expect("mapping");

    let inventory = read_ldraw_file(&input).expect("LDraw read");
    let report =
        write_bricklink(output_path_for(&input), &inventory, Some(&mapping)).expect("written");

    assert_eq!(
        report.unmapped_colors,
        BTreeSet::from(["15".to_string(), "4".to_string()])
    );
}

#[test]
fn malformed_placement_aborts_read() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_model(temp_dir.path(), "0 header\n1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n1.dat\n");

    let error = read_ldraw_file(&input).expect_err("malformed line");
    assert!(matches!(error, ParseError::MalformedLine { line_number: 3, .. }));
}

#[test]
fn missing_input_and_mapping_fail() {
    let temp_dir = tempdir().expect("temporary directory");

    let error = read_ldraw_file(temp_dir.path().join("missing.ldr")).expect_err("no input");
    assert!(matches!(error, ParseError::FileRead { .. }));

    let error = Mapping::from_path(temp_dir.path().join("missing.json")).expect_err("no mapping");
    assert!(matches!(error, MappingError::FileRead { .. }));

    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ not json").expect("broken mapping written");
    let error = Mapping::from_path(&broken).expect_err("malformed mapping");
    assert!(matches!(error, MappingError::Json { .. }));
}
