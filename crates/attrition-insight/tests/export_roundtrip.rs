use attrition_insight::workflows::attrition::export::{
    recommendations_text, records_csv, statistics_csv,
};
use attrition_insight::workflows::attrition::domain::{DepartureRecord, Gender};
use attrition_insight::workflows::attrition::{
    analyze, analyze_filtered, categorize, AttritionPolicy, RecordFilter,
};
use attrition_insight::workflows::dataset::{parse_records, DepartureSource, SampleDataSource};
use std::io::Cursor;

#[test]
fn exported_records_parse_back_into_the_same_dataset() {
    let source = SampleDataSource::new(11, 120);
    let generated = source.load().expect("sample loads");
    let report = analyze(&generated, &AttritionPolicy::default());

    let exported = records_csv(&report.records).expect("records export");
    let header = exported.lines().next().expect("header line");
    assert!(header.ends_with("age_band,tenure_band,salary_band"));

    let reparsed = parse_records(Cursor::new(exported)).expect("export parses");
    assert_eq!(reparsed, generated);
}

#[test]
fn empty_selection_exports_a_header_that_reimports() {
    let records = SampleDataSource::new(2, 40).generate().expect("sample");
    let filter = RecordFilter {
        department: Some("No Such Department".to_string()),
        ..RecordFilter::default()
    };
    let report = analyze_filtered(&records, &filter, &AttritionPolicy::default());
    assert!(report.records.is_empty());

    let exported = records_csv(&report.records).expect("records export");
    assert!(exported.starts_with("employee_id,gender,age"));

    let reparsed = parse_records(Cursor::new(exported)).expect("empty export parses");
    assert!(reparsed.is_empty());
}

#[test]
fn text_fields_survive_export_byte_for_byte() {
    let raw = vec![DepartureRecord {
        employee_id: " E-7".to_string(),
        gender: Gender::Female,
        age: 44,
        department: " Sales ".to_string(),
        reason: "career\u{200b}change\u{feff}".to_string(),
        departure_year: 2020,
        tenure_years: 3.5,
        monthly_salary: 10250.0,
    }];

    let exported = records_csv(&categorize(&raw)).expect("records export");
    let reparsed = parse_records(Cursor::new(exported)).expect("export parses");
    assert_eq!(reparsed, raw);
}

#[test]
fn statistics_export_is_a_single_row() {
    let records = SampleDataSource::new(5, 60).generate().expect("sample");
    let report = analyze(&records, &AttritionPolicy::default());

    let exported = statistics_csv(&report.summary).expect("statistics export");
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("total,male_count,female_count"));
    assert!(lines[1].starts_with("60,"));
}

#[test]
fn recommendations_export_numbers_each_action() {
    let records = SampleDataSource::default().generate().expect("sample");
    let report = analyze(&records, &AttritionPolicy::default());

    let text = recommendations_text(&report.recommendations);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), report.recommendations.len());
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(
            *line,
            format!("{}. {}", index + 1, report.recommendations[index])
        );
    }
}
