//! Unit tests for the evidence CIGAR parser.

use ej2sam_rs::cigar::cigar_to_string;
use ej2sam_rs::{parse_cigar, CigarError, CigarOp, CigarOpKind, Dialect};

fn runs(parsed: &[CigarOp]) -> Vec<(u32, char)> {
    parsed.iter().map(|op| (op.len, op.kind.to_char())).collect()
}

#[test]
fn plain_single_run() {
    let parsed = parse_cigar("35M", Dialect::Plain).unwrap();
    assert_eq!(runs(&parsed), vec![(35, 'M')]);
}

#[test]
fn plain_junction_gap() {
    let parsed = parse_cigar("5M310N30M", Dialect::Plain).unwrap();
    assert_eq!(runs(&parsed), vec![(5, 'M'), (310, 'N'), (30, 'M')]);
}

#[test]
fn overlap_dialect_accepts_back_up_runs() {
    let parsed = parse_cigar("33M2B2M", Dialect::Overlap).unwrap();
    assert_eq!(runs(&parsed), vec![(33, 'M'), (2, 'B'), (2, 'M')]);
}

#[test]
fn plain_dialect_rejects_back_up_runs() {
    let err = parse_cigar("33M2B2M", Dialect::Plain).unwrap_err();
    assert_eq!(
        err,
        CigarError::InvalidOp {
            op: 'B',
            cigar: "33M2B2M".to_string(),
        }
    );
}

/// Unknown letters are hard failures in both dialects, never skipped.
#[test]
fn unknown_letter_is_fatal() {
    for dialect in [Dialect::Plain, Dialect::Overlap] {
        let err = parse_cigar("10X5M", dialect).unwrap_err();
        assert_eq!(
            err,
            CigarError::InvalidOp {
                op: 'X',
                cigar: "10X5M".to_string(),
            }
        );
        assert!(err.to_string().contains('X'));
    }
}

#[test]
fn missing_run_length_is_rejected() {
    let err = parse_cigar("M", Dialect::Plain).unwrap_err();
    assert_eq!(
        err,
        CigarError::MissingLength {
            op: 'M',
            cigar: "M".to_string(),
        }
    );

    let err = parse_cigar("33M2BM", Dialect::Overlap).unwrap_err();
    assert!(matches!(err, CigarError::MissingLength { op: 'M', .. }));
}

#[test]
fn trailing_digits_are_rejected() {
    let err = parse_cigar("35M10", Dialect::Plain).unwrap_err();
    assert_eq!(
        err,
        CigarError::MissingOp {
            cigar: "35M10".to_string(),
        }
    );
}

#[test]
fn run_length_overflow_is_rejected() {
    let err = parse_cigar("4294967296M", Dialect::Plain).unwrap_err();
    assert!(matches!(err, CigarError::LengthOverflow { .. }));
}

#[test]
fn zero_length_runs_are_preserved() {
    let parsed = parse_cigar("33M2B2M35N0M", Dialect::Overlap).unwrap();
    assert_eq!(
        runs(&parsed),
        vec![(33, 'M'), (2, 'B'), (2, 'M'), (35, 'N'), (0, 'M')]
    );
}

#[test]
fn leading_zeros_decode_positionally() {
    let parsed = parse_cigar("007M", Dialect::Plain).unwrap();
    assert_eq!(runs(&parsed), vec![(7, 'M')]);
}

#[test]
fn empty_string_parses_to_no_runs() {
    assert!(parse_cigar("", Dialect::Plain).unwrap().is_empty());
}

/// Match totals follow the digit-encoded lengths for full 35-base mates.
#[test]
fn match_totals_follow_digits() {
    let cases = [
        ("35M", 35),
        ("12M100N23M", 35),
        ("5M310N30M", 35),
        ("0M70N35M", 35),
    ];
    for (text, want) in cases {
        let parsed = parse_cigar(text, Dialect::Plain).unwrap();
        let total: u32 = parsed
            .iter()
            .filter(|op| op.kind == CigarOpKind::Match)
            .map(|op| op.len)
            .sum();
        assert_eq!(total, want, "{text}");
    }
}

#[test]
fn rendering_round_trips() {
    let text = "33M2B2M35N0M";
    let parsed = parse_cigar(text, Dialect::Overlap).unwrap();
    assert_eq!(cigar_to_string(&parsed), text);
}
