use maintenance_import::ingestion::{
    facts_from_table, generate_preview_data, process_file, decode_file, ImportFile, ImportOptions,
};
use maintenance_import::mapping::{best_mappings, CanonicalField};
use maintenance_import::hierarchy::FactAction;
use maintenance_import::IssueSeverity;

fn fixture(name: &str) -> ImportFile {
    ImportFile::from_path(format!("tests/fixtures/{name}")).unwrap()
}

fn inline_csv(body: &str) -> ImportFile {
    ImportFile::new("inline.csv", Some("text/csv".to_string()), body.as_bytes().to_vec())
}

#[test]
fn japanese_headers_map_exactly() {
    let res = process_file(&fixture("equipment.csv"), &ImportOptions::default());

    let best = best_mappings(&res.suggestions);
    let target = |col: &str| best.iter().find(|m| m.source_column == col).map(|m| (m.target_field, m.confidence));
    assert_eq!(target("設備ID"), Some((CanonicalField::EquipmentId, 1.0)));
    assert_eq!(target("設備名"), Some((CanonicalField::EquipmentName, 1.0)));
    assert_eq!(target("保全周期"), Some((CanonicalField::MaintenanceCycle, 1.0)));
    assert_eq!(target("費用"), Some((CanonicalField::MaintenanceCost, 1.0)));
    assert_eq!(target("実施日"), Some((CanonicalField::Date, 1.0)));
}

#[test]
fn english_headers_map_exactly() {
    let res = process_file(&fixture("equipment_en.csv"), &ImportOptions::default());
    assert!(res.success);
    assert!(res.errors.is_empty());
    assert_eq!(res.processed_rows, 3);

    let id = res
        .suggestions
        .iter()
        .find(|m| m.source_column == "Equipment ID")
        .unwrap();
    assert_eq!(id.target_field, CanonicalField::EquipmentId);
    assert_eq!(id.confidence, 1.0);
}

#[test]
fn fixture_rows_report_every_issue() {
    let res = process_file(&fixture("equipment.csv"), &ImportOptions::default());
    assert!(!res.success);
    assert_eq!(res.processed_rows, 5);

    let errors: Vec<_> = res.errors.iter().filter(|i| i.severity == IssueSeverity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 4);
    assert_eq!(errors[0].column, "設備ID");

    let row4_warnings: Vec<&str> = res
        .errors
        .iter()
        .filter(|i| i.row == 4 && i.severity == IssueSeverity::Warning)
        .map(|i| i.column.as_str())
        .collect();
    assert_eq!(row4_warnings, vec!["費用", "実施日"]);

    let empty_row = res.errors.iter().find(|i| i.column == "all").unwrap();
    assert_eq!(empty_row.row, 5);
    assert_eq!(empty_row.message, "empty row");
}

#[test]
fn empty_required_cell_fails_import() {
    let res = process_file(&inline_csv("設備ID,設備名\n,ポンプA-1\n"), &ImportOptions::default());
    assert!(!res.success);
    assert_eq!(res.errors.len(), 1);
    assert_eq!(res.errors[0].severity, IssueSeverity::Error);
    assert_eq!(res.errors[0].column, "設備ID");
    assert_eq!(res.errors[0].row, 2);
}

#[test]
fn media_type_admits_file_without_extension() {
    let file = ImportFile::new("upload", Some("text/csv".to_string()), b"id,name\n1,a\n".to_vec());
    let res = process_file(&file, &ImportOptions::default());
    assert!(res.success);
    assert_eq!(res.processed_rows, 1);
}

#[test]
fn preview_uses_mapped_keys() {
    let file = fixture("equipment.csv");
    let res = process_file(&file, &ImportOptions::default());
    let rows = generate_preview_data(&file, &res.suggestions, &ImportOptions::default());

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].get("equipment_id").map(String::as_str), Some("P-1"));
    assert_eq!(rows[0].get("maintenance_cost").map(String::as_str), Some("¥80,000"));
    assert_eq!(rows[1].get("date").map(String::as_str), Some("2024年7月"));
}

#[test]
fn preview_is_empty_for_rejected_file() {
    let file = ImportFile::new("notes.txt", None, b"hello".to_vec());
    assert!(generate_preview_data(&file, &[], &ImportOptions::default()).is_empty());
}

#[test]
fn imported_rows_become_facts() {
    let file = fixture("equipment_en.csv");
    let opts = ImportOptions::default();
    let res = process_file(&file, &opts);
    let table = decode_file(&file, &opts).unwrap();

    let (facts, issues) = facts_from_table(&table, &res.suggestions);
    assert!(issues.is_empty());
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].equipment_id, "P-1");
    assert_eq!(facts[0].action, FactAction::Both);
    assert_eq!(facts[0].time_header, "2024-06");
    assert_eq!(facts[0].cost, Some(80000.0));
    assert_eq!(facts[1].action, FactAction::Plan);
    assert_eq!(facts[1].time_header, "2024-07");
}
