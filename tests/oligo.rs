extern crate guidepool;

use guidepool::constants::{DEFAULT_OVERLAP, DEFAULT_PROMOTER};
use guidepool::errors::ErrorKind;
use guidepool::oligo::OligoDesign;
use proptest::prelude::*;

#[test]
fn test_default_design_is_t7() {
    let design = OligoDesign::default();

    assert_eq!(design, OligoDesign::t7());
    assert_eq!(design.promoter(), b"TTCTAATACGACTCACTATA");
    assert_eq!(design.overlap(), b"GTTTTAGAGCTAGA");
}

#[test]
fn test_g_inserted_before_guide() {
    let oligo = OligoDesign::t7().synthesize(b"ACGTACGTACGTACGTACGT").unwrap();
    let expected = format!(
        "{}G{}{}",
        DEFAULT_PROMOTER, "ACGTACGTACGTACGTACGT", DEFAULT_OVERLAP
    );

    assert_eq!(oligo, expected.into_bytes());
}

#[test]
fn test_no_g_inserted_before_g_guide() {
    let oligo = OligoDesign::t7().synthesize(b"GCGTACGTACGTACGTACGT").unwrap();
    let expected = format!(
        "{}{}{}",
        DEFAULT_PROMOTER, "GCGTACGTACGTACGTACGT", DEFAULT_OVERLAP
    );

    assert_eq!(oligo, expected.into_bytes());
}

#[test]
fn test_custom_design() {
    let design = OligoDesign::new(b"AAA", b"TTT");

    assert_eq!(design.synthesize(b"C").unwrap(), b"AAAGCTTT".to_vec());
    assert_eq!(design.synthesize(b"G").unwrap(), b"AAAGTTT".to_vec());
}

#[test]
fn test_synthesize_into_replaces_buffer() {
    let design = OligoDesign::new(b"AAA", b"TTT");
    let mut buffer = b"previous contents".to_vec();

    design.synthesize_into(b"CC", &mut buffer).unwrap();
    assert_eq!(buffer, b"AAAGCCTTT".to_vec());
}

#[test]
fn test_empty_guide() {
    let err = OligoDesign::t7().synthesize(b"").unwrap_err();

    match err.kind() {
        ErrorKind::InvalidGuide(_) => {}
        _ => panic!("unexpected error: {}", err),
    }
}

#[test]
fn test_guides_with_and_without_g_give_distinct_oligos() {
    let design = OligoDesign::t7();

    let with_g = design.synthesize(b"GAAAAAAAAAAAAAAAAAAA").unwrap();
    let without_g = design.synthesize(b"AAAAAAAAAAAAAAAAAAAA").unwrap();
    assert_ne!(with_g, without_g);
}

proptest! {
    #[test]
    fn prop_oligo_is_flanked_by_design(guide in "[ACGT]{20}") {
        let design = OligoDesign::t7();
        let oligo = design.synthesize(guide.as_bytes()).unwrap();

        prop_assert!(oligo.starts_with(design.promoter()));
        prop_assert!(oligo.ends_with(design.overlap()));
        prop_assert_eq!(oligo[design.promoter().len()], b'G');

        let extra = if guide.starts_with('G') { 0 } else { 1 };
        prop_assert_eq!(
            oligo.len(),
            design.promoter().len() + extra + guide.len() + design.overlap().len()
        );
    }
}
