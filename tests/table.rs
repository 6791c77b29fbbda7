extern crate guidepool;

use guidepool::aggregate::{aggregate, GuideSelection, SelectedGuide};
use guidepool::background::BackgroundScreen;
use guidepool::common::Alphabet;
use guidepool::constants::{DEFAULT_OVERLAP, DEFAULT_PROMOTER};
use guidepool::errors::ErrorKind;
use guidepool::oligo::OligoDesign;
use guidepool::reads::{DedupedReads, ReadFilter};
use guidepool::table::{AverageMode, ResultTable};

fn selection(guides: &[(&str, f64)]) -> GuideSelection {
    GuideSelection {
        guides: guides
            .iter()
            .map(|&(nuc, fraction)| SelectedGuide {
                spacer: nuc.repeat(20).into_bytes(),
                weight: 1,
                fraction,
            })
            .collect(),
        targeted_reads: 1,
        total_reads: 2,
    }
}

fn table(guides: &[(&str, f64)]) -> ResultTable {
    ResultTable::from_selection(&selection(guides), &OligoDesign::t7()).unwrap()
}

fn oligo(nuc: &str) -> String {
    format!("{}G{}{}", DEFAULT_PROMOTER, nuc.repeat(20), DEFAULT_OVERLAP)
}

fn to_csv(table: &ResultTable) -> String {
    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();

    String::from_utf8(out).unwrap()
}

fn assert_malformed(result: guidepool::errors::Result<ResultTable>) {
    let err = result.unwrap_err();

    match err.kind() {
        ErrorKind::MalformedTable(_) => {}
        _ => panic!("unexpected error: {}", err),
    }
}

#[test]
fn test_single_read_scenario() {
    let read = format!("{}GG{}", "X".repeat(21), "Y".repeat(10));
    let reads = DedupedReads::from_sequences(vec![read; 3], &ReadFilter::default());
    let selection = aggregate(&reads, 1, Alphabet::Lenient).unwrap();

    let table = ResultTable::from_selection(&selection, &OligoDesign::t7()).unwrap();
    assert_eq!(table.len(), 1);

    let row = &table.rows()[0];
    assert_eq!(row.oligo, oligo("X"));
    assert_eq!(row.target, "X".repeat(20));
    assert_eq!(row.fraction, 1.0);
    assert_eq!(row.total_targeted, 100.0);
    assert_eq!(row.filename, None);
    assert_eq!(row.average_fraction, None);
    assert_eq!(row.off_targets, None);
}

#[test]
fn test_single_file_csv() {
    let table = table(&[("A", 0.5), ("T", 0.25)]);

    assert_eq!(
        to_csv(&table),
        format!(
            "oligo,target,fraction,total_targeted\n{},{},0.5,50.0\n{},{},0.25,50.0\n",
            oligo("A"),
            "A".repeat(20),
            oligo("T"),
            "T".repeat(20)
        )
    );
}

#[test]
fn test_empty_table_csv() {
    let table = table(&[]);

    assert!(table.is_empty());
    assert_eq!(to_csv(&table), "oligo,target,fraction,total_targeted\n");
}

#[test]
fn test_combine_averages_over_all_files() {
    let tables = vec![
        ("a.fq".to_string(), table(&[("A", 0.5)])),
        ("b.fq".to_string(), table(&[("A", 0.25), ("T", 0.5)])),
    ];

    let combined = ResultTable::combine(tables, AverageMode::AllFiles);
    let rows = combined.rows();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].filename.as_deref(), Some("a.fq"));
    assert_eq!(rows[1].filename.as_deref(), Some("b.fq"));
    assert_eq!(rows[2].filename.as_deref(), Some("b.fq"));

    assert_eq!(rows[0].average_fraction, Some(0.375));
    assert_eq!(rows[1].average_fraction, Some(0.375));
    // Diluted by the file in which T was not selected
    assert_eq!(rows[2].average_fraction, Some(0.25));
}

#[test]
fn test_combine_averages_over_present_files() {
    let tables = vec![
        ("a.fq".to_string(), table(&[("A", 0.5)])),
        ("b.fq".to_string(), table(&[("A", 0.25), ("T", 0.5)])),
    ];

    let combined = ResultTable::combine(tables, AverageMode::PresentFiles);
    let rows = combined.rows();

    assert_eq!(rows[0].average_fraction, Some(0.375));
    assert_eq!(rows[1].average_fraction, Some(0.375));
    assert_eq!(rows[2].average_fraction, Some(0.5));
}

#[test]
fn test_combined_csv_columns() {
    let tables = vec![
        ("a.fq".to_string(), table(&[("A", 0.5)])),
        ("b.fq".to_string(), table(&[])),
    ];

    let combined = ResultTable::combine(tables, AverageMode::default());
    assert_eq!(
        to_csv(&combined),
        format!(
            "{}\n{},{},0.5,50.0,a.fq,0.25\n",
            "oligo,target,fraction,total_targeted,filename,average_fraction",
            oligo("A"),
            "A".repeat(20)
        )
    );
}

#[test]
fn test_oligos_are_distinct() {
    let tables = vec![
        ("a.fq".to_string(), table(&[("A", 0.5), ("C", 0.5)])),
        ("b.fq".to_string(), table(&[("T", 0.25), ("A", 0.5)])),
    ];

    let combined = ResultTable::combine(tables, AverageMode::AllFiles);
    assert_eq!(combined.oligos(), vec![oligo("A"), oligo("C"), oligo("T")]);
}

#[test]
fn test_attach_off_targets() {
    let design = OligoDesign::t7();
    let mut table = table(&[("A", 0.5), ("T", 0.25)]);

    let mut screen = BackgroundScreen::new(&design, Alphabet::Lenient, table.oligos());
    screen.screen(format!("{}CGG", "A".repeat(20)).as_bytes()).unwrap();
    table.attach_off_targets(&screen);

    assert_eq!(table.rows()[0].off_targets, Some(1));
    assert_eq!(table.rows()[1].off_targets, Some(0));
    assert!(to_csv(&table).starts_with("oligo,target,fraction,total_targeted,Off_targets\n"));
    assert!(to_csv(&table).ends_with(",0.25,50.0,0\n"));
}

#[test]
fn test_read_written_table() {
    let tables = vec![
        ("a.fq".to_string(), table(&[("A", 0.5)])),
        ("b.fq".to_string(), table(&[("T", 0.125)])),
    ];
    let combined = ResultTable::combine(tables, AverageMode::AllFiles);

    let table = ResultTable::read_csv(to_csv(&combined).as_bytes()).unwrap();
    assert_eq!(table, combined);
    assert!(table.check_design(&OligoDesign::t7()).is_ok());
}

#[test]
fn test_read_table_with_off_targets() {
    let csv = format!(
        "oligo,target,fraction,total_targeted,Off_targets\n{},{},0.5,50.0,7\n",
        oligo("A"),
        "A".repeat(20)
    );

    let table = ResultTable::read_csv(csv.as_bytes()).unwrap();
    assert_eq!(table, self::table(&[("A", 0.5)]));
}

#[test]
fn test_read_table_missing_column() {
    assert_malformed(ResultTable::read_csv(&b"oligo,fraction\nACGT,0.5\n"[..]));
}

#[test]
fn test_read_table_invalid_fraction() {
    let csv = "oligo,target,fraction,total_targeted\nACGT,ACGT,abc,50.0\n";

    assert!(ResultTable::read_csv(csv.as_bytes()).is_err());
}

#[test]
fn test_check_design_mismatch() {
    let table = table(&[("A", 0.5)]);
    let design = OligoDesign::new(b"AAA", b"TTT");

    assert_malformed(table.check_design(&design).map(|_| table.clone()));
}
