extern crate guidepool;

use guidepool::common::{check_alphabet, reverse_complement, revcomp, Alphabet};
use guidepool::errors::ErrorKind;
use proptest::prelude::*;

#[test]
fn test_revcomp_basic_nucleotides() {
    assert_eq!(revcomp(b""), b"");
    assert_eq!(revcomp(b"A"), b"T");
    assert_eq!(revcomp(b"ACGTN"), b"NACGT");
    assert_eq!(revcomp(b"AAGG"), b"CCTT");
}

#[test]
fn test_revcomp_passes_unknown_characters_through() {
    assert_eq!(revcomp(b"AcgR"), b"RgcT");
    assert_eq!(revcomp(b"XXGG"), b"CCXX");
}

#[test]
fn test_lenient_reverse_complement() {
    let rc = reverse_complement(b"ACGR", Alphabet::Lenient).unwrap();

    assert_eq!(rc, b"RCGT");
}

#[test]
fn test_strict_reverse_complement() {
    let rc = reverse_complement(b"ACGTN", Alphabet::Strict).unwrap();

    assert_eq!(rc, b"NACGT");
}

#[test]
fn test_strict_reverse_complement_rejects_unknown() {
    let err = reverse_complement(b"ACGR", Alphabet::Strict).unwrap_err();

    match *err.kind() {
        ErrorKind::InvalidAlphabet(nuc, pos) => {
            assert_eq!(nuc, b'R');
            assert_eq!(pos, 3);
        }
        _ => panic!("unexpected error: {}", err),
    }
}

#[test]
fn test_check_alphabet_is_case_sensitive() {
    assert!(check_alphabet(b"ACGTN").is_ok());
    assert!(check_alphabet(b"acgtn").is_err());
}

#[test]
fn test_default_alphabet_is_lenient() {
    assert_eq!(Alphabet::default(), Alphabet::Lenient);
}

proptest! {
    #[test]
    fn prop_revcomp_is_an_involution(seq in proptest::collection::vec(any::<u8>(), 0..200)) {
        prop_assert_eq!(revcomp(&revcomp(&seq)), seq);
    }

    #[test]
    fn prop_strict_revcomp_is_an_involution(seq in "[ACGTN]{0,200}") {
        let rc = reverse_complement(seq.as_bytes(), Alphabet::Strict).unwrap();
        let rcrc = reverse_complement(&rc, Alphabet::Strict).unwrap();

        prop_assert_eq!(rcrc, seq.as_bytes().to_vec());
    }
}
