//! Integration tests for the full reconstruction pipeline.

mod common;

use std::collections::HashSet;
use std::fs;

use common::{boxed, page_of, synthetic_page};
use textgrid::layout::build_rows;
use textgrid::{
    project_page, reconstruct, reconstruct_bytes, reconstruct_file, reconstruct_input,
    JsonFormat, LayoutOptions, RenditionMode, TextGrid,
};

/// An invoice header in PDF page coordinates on a Letter viewport.
/// Every fragment is ten units per character wide.
const INVOICE_JSON: &str = r#"{
    "viewport": { "transform": [1, 0, 0, -1, 0, 792], "width": 612, "height": 792 },
    "items": [
        { "str": "Invoice", "transform": [24, 0, 0, 24, 70, 720], "width": 70 },
        { "str": "Name:",   "transform": [10, 0, 0, 10, 70, 650], "width": 50 },
        { "str": "Alice",   "transform": [10, 0, 0, 10, 150, 650], "width": 50 },
        { "str": "  ",      "transform": [10, 0, 0, 10, 300, 650], "width": 20 },
        { "str": "Total:",  "transform": [10, 0, 0, 10, 70, 620], "width": 60 },
        { "str": "42.00",   "transform": [10, 0, 0, 10, 150, 620], "width": 50 }
    ]
}"#;

#[test]
fn test_invoice_automatic() {
    let result = reconstruct_bytes(INVOICE_JSON.as_bytes(), &LayoutOptions::default()).unwrap();

    assert!(result.warning().is_none());
    assert!(result.analysis.blocks.is_empty());
    assert_eq!(result.analysis.pairs.len(), 2);
    assert_eq!(result.analysis.titles.len(), 1);

    let text = result.to_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "Invoice");
    assert!(lines[1..8].iter().all(|l| l.is_empty()));
    assert_eq!(lines[8], "       Name:   Alice");
    assert_eq!(lines[11], "       Total:  42.00");
}

#[test]
fn test_invoice_simple() {
    let options = LayoutOptions::new().simple();
    let result = reconstruct_bytes(INVOICE_JSON.as_bytes(), &options).unwrap();
    assert_eq!(result.rendition.mode, RenditionMode::Simple);

    let text = result.to_text();
    let lines: Vec<&str> = text.lines().collect();
    // Mean height 12.8 spaces the rows differently from the median.
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[7], "       Name:   Alice");
    assert_eq!(lines[9], "       Total:  42.00");
}

#[test]
fn test_invoice_report() {
    let result = reconstruct_bytes(INVOICE_JSON.as_bytes(), &LayoutOptions::default()).unwrap();
    let report = result.report.to_string();
    assert!(report.contains("--- Label-Value Pairs (2) ---"));
    assert!(report.contains("Pair 1: [L: \"Name:\", V: \"Alice\"]"));
    assert!(report.contains("Pair 2: [L: \"Total:\", V: \"42.00\"]"));
    assert!(report.contains(
        "Title 1: \"Invoice\" (Font Height: 24.00, Median: 10.00, Ratio: 2.00)"
    ));
    assert!(!report.contains("Vertical Blocks"));
}

#[test]
fn test_whitespace_items_are_dropped() {
    let input = textgrid::parse_page_json(INVOICE_JSON.as_bytes()).unwrap();
    let page = project_page(&input);
    assert_eq!(input.items.len(), 6);
    assert_eq!(page.len(), 5);
    for (i, f) in page.fragments.iter().enumerate() {
        assert_eq!(f.source_index, i);
    }
    assert_eq!(page.fragments[3].text, "Total:");
}

#[test]
fn test_name_alice_pair() {
    let input = page_of(vec![
        boxed("Name:", 0.0, 0.0, 40.0, 10.0),
        boxed("Alice", 50.0, 0.0, 40.0, 10.0),
    ]);
    let options = LayoutOptions::new().with_y_axis_tolerance(5.0);
    let result = reconstruct_input(&input, &options);

    assert_eq!(result.analysis.pairs.len(), 1);
    let (label, value) = result.analysis.pair_items(&result.analysis.pairs[0]);
    assert_eq!(label.text, "Name:");
    assert_eq!(value.text, "Alice");
}

#[test]
fn test_stacked_block() {
    let stack = |x1: f64, x2: f64| {
        page_of(vec![
            boxed("first", 0.0, 0.0, 50.0, 10.0),
            boxed("second", x1, 15.0, 60.0, 10.0),
            boxed("third", x2, 30.0, 50.0, 10.0),
        ])
    };
    let options = LayoutOptions::new()
        .with_horizontal_tolerance(2.0)
        .with_vertical_proximity(10.0);

    let result = reconstruct_input(&stack(1.0, 2.0), &options);
    assert_eq!(result.analysis.blocks.len(), 1);
    assert_eq!(result.analysis.blocks[0].members, vec![0, 1, 2]);
    assert_eq!(result.analysis.blocks[0].text, "first second third");

    // Each link is compared against the current tail only.
    let result = reconstruct_input(&stack(10.0, 11.0), &options);
    assert_eq!(result.analysis.blocks.len(), 1);
    assert_eq!(result.analysis.blocks[0].members, vec![1, 2]);

    let result = reconstruct_input(&stack(10.0, 11.0), &options.clone().with_horizontal_tolerance(0.0));
    assert!(result.analysis.blocks.is_empty());
}

#[test]
fn test_title_by_median() {
    let input = page_of(vec![
        boxed("a", 0.0, 0.0, 10.0, 10.0),
        boxed("b", 0.0, 100.0, 10.0, 10.0),
        boxed("c", 0.0, 200.0, 10.0, 10.0),
        boxed("Heading", 0.0, 300.0, 100.0, 30.0),
    ]);
    let result = reconstruct_input(&input, &LayoutOptions::default());
    assert_eq!(result.analysis.median_height, 10.0);
    assert_eq!(result.analysis.titles.len(), 1);
    assert_eq!(
        result.analysis.title_item(&result.analysis.titles[0]).text,
        "Heading"
    );
}

#[test]
fn test_zero_width_fragments() {
    let input = page_of(vec![
        boxed("ab", 10.0, 0.0, 0.0, 10.0),
        boxed("cd", 20.0, 0.0, 0.0, 10.0),
    ]);

    let result = reconstruct_input(&input, &LayoutOptions::default());
    assert!(result.warning().is_none());
    assert_eq!(result.to_text(), "ab cd");

    // Columns 1 and 2: the second cell is appended without padding.
    let result = reconstruct_input(&input, &LayoutOptions::new().simple());
    assert_eq!(result.to_text(), "abcd");
}

#[test]
fn test_fragment_positions_index_the_page() {
    let mut page = project_page(&page_of(vec![
        boxed("Name:", 0.0, 0.0, 50.0, 10.0),
        boxed("Alice", 80.0, 0.0, 50.0, 10.0),
    ]));
    page.fragments[0].source_index = 40;
    page.fragments[1].source_index = 41;

    let options = LayoutOptions::new().with_y_axis_tolerance(5.0);
    let result = reconstruct(&page, &options);
    assert_eq!(result.analysis.pairs.len(), 1);
    assert_eq!(result.to_text(), "Name:   Alice");

    let result = reconstruct(&page, &options.clone().simple());
    assert_eq!(result.to_text(), "Name:   Alice");
}

#[test]
fn test_empty_page() {
    let result = reconstruct_input(&page_of(Vec::new()), &LayoutOptions::default());
    assert!(result.grid().is_empty());
    assert!(result.analysis.items.is_empty());
    assert!(result.warning().is_none());
    assert_eq!(result.report.to_string(), "No groups formed.");
}

#[test]
fn test_idempotence() {
    for seed in 1..6 {
        let page = project_page(&synthetic_page(seed, 60));
        let options = LayoutOptions::default();
        let a = reconstruct(&page, &options);
        let b = reconstruct(&page, &options);
        assert_eq!(a.grid(), b.grid());
        assert_eq!(
            textgrid::render::to_json(&a, JsonFormat::Compact).unwrap(),
            textgrid::render::to_json(&b, JsonFormat::Compact).unwrap()
        );
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let page = project_page(&synthetic_page(42, 80));
    let a = reconstruct(&page, &LayoutOptions::default());
    let b = reconstruct(&page, &LayoutOptions::default().sequential());
    assert_eq!(a, b);
}

#[test]
fn test_structural_invariants() {
    for seed in 1..9 {
        let page = project_page(&synthetic_page(seed, 50));
        let result = reconstruct(&page, &LayoutOptions::default());

        for f in &page.fragments {
            assert!(f.bounds.min_x <= f.bounds.max_x);
            assert!(f.bounds.min_y <= f.bounds.max_y);
        }

        let mut in_block = HashSet::new();
        for block in &result.analysis.blocks {
            assert!(block.members.len() >= 2);
            for &m in &block.members {
                assert!(in_block.insert(m), "fragment {} in two blocks", m);
            }
        }

        let mut values = HashSet::new();
        for pair in &result.analysis.pairs {
            assert!(values.insert(pair.value), "value {} paired twice", pair.value);
            assert!(result.analysis.items[pair.label].is_label());
        }

        let rows = build_rows(&page.fragments);
        let mut seen = vec![0usize; page.len()];
        for row in &rows {
            for &i in row {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "row coverage broken for seed {}", seed);
    }
}

#[test]
fn test_reconstruct_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.json");
    fs::write(&path, INVOICE_JSON).unwrap();

    let result = reconstruct_file(&path, &LayoutOptions::default()).unwrap();
    assert_eq!(result.analysis.pairs.len(), 2);

    let text = textgrid::to_text(&path).unwrap();
    assert!(text.starts_with("Invoice\n"));

    let json = textgrid::to_json(&path, JsonFormat::Compact).unwrap();
    assert!(json.contains("\"rendition\""));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = reconstruct_file(dir.path().join("absent.json"), &LayoutOptions::default())
        .unwrap_err();
    assert!(matches!(err, textgrid::Error::Io(_)));
}

#[test]
fn test_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "renditionMode": "manual",
            "horizontalTolerance": 4,
            "titleRatio": "big",
            "showItemBoxes": true
        }"#,
    )
    .unwrap();

    let builder = TextGrid::new().with_settings_file(&path).unwrap();
    let options = builder.options();
    assert_eq!(options.rendition_mode, RenditionMode::Simple);
    assert_eq!(options.horizontal_tolerance, 4.0);
    // Wrong type keeps the default.
    assert_eq!(options.title_ratio, 2.0);
    assert_eq!(options.vertical_proximity, 10.0);

    let result = builder.parse_bytes(INVOICE_JSON.as_bytes()).unwrap();
    assert_eq!(result.reconstruction.rendition.mode, RenditionMode::Simple);
}

#[test]
fn test_settings_round_trip() {
    let options = LayoutOptions::new()
        .with_vertical_proximity(7.5)
        .with_title_ratio(1.25);
    let json = options.to_settings_json().unwrap();
    assert!(json.contains("\"renditionMode\": \"automatic\""));
    assert_eq!(LayoutOptions::from_settings_json(&json).unwrap(), options);
}

#[test]
fn test_builder_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.json");
    fs::write(&path, INVOICE_JSON).unwrap();

    let result = TextGrid::new().sequential().open(&path).unwrap();
    assert_eq!(result.page.len(), 5);
    assert!(result.to_json(JsonFormat::Pretty).unwrap().contains('\n'));

    let inspection = result.inspect(1).unwrap();
    assert_eq!(inspection.chosen_successor, Some(2));
    assert!(result.inspect(99).is_err());
}
