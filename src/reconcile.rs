//! Mate overlap reconciliation.
//!
//! A mate crossing a junction may re-read reference bases the leading match
//! run already covered; the vendor encodes this with a `B` run between the
//! first two match runs. SAM has no such operation, so before a record can be
//! emitted the duplicated bases are deleted from the sequence and qualities
//! and the CIGAR is packed down to plain match/skip runs.

use thiserror::Error;

use crate::cigar::{cigar_to_string, CigarOp, CigarOpKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("CIGAR \"{cigar}\" does not start with match, overlap, match runs")]
    Shape { cigar: String },

    #[error("CIGAR \"{cigar}\" has more than one overlap run")]
    MultipleOverlaps { cigar: String },

    #[error("overlap run ({overlap}) exceeds the leading match run ({leading}) in \"{cigar}\"")]
    OverlapExceedsLead {
        overlap: u32,
        leading: u32,
        cigar: String,
    },

    #[error("overlap segment [{start}, {end}) lies outside the {seq_len}-base mate")]
    OverlapOutOfRange {
        start: usize,
        end: usize,
        seq_len: usize,
    },

    #[error("CIGAR \"{cigar}\" consumes {cigar_len} bases but the mate has {seq_len}")]
    ReadLengthMismatch {
        cigar: String,
        cigar_len: usize,
        seq_len: usize,
    },

    #[error("sequence length {seq_len} does not match quality length {qual_len}")]
    QualityLengthMismatch { seq_len: usize, qual_len: usize },
}

/// One mate after overlap removal: what actually goes into the SAM record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledMate {
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
    pub cigar: Vec<CigarOp>,
}

/// Checks the `M B M (N|M)*` run layout and returns the leading match and
/// overlap lengths.
fn validate_shape(ops: &[CigarOp]) -> Result<(u32, u32), ReconcileError> {
    let (first, second, third) = match ops {
        [a, b, c, ..] => (a, b, c),
        _ => {
            return Err(ReconcileError::Shape {
                cigar: cigar_to_string(ops),
            })
        }
    };
    if first.kind != CigarOpKind::Match
        || second.kind != CigarOpKind::Overlap
        || third.kind != CigarOpKind::Match
    {
        return Err(ReconcileError::Shape {
            cigar: cigar_to_string(ops),
        });
    }
    if ops[3..].iter().any(|op| op.kind == CigarOpKind::Overlap) {
        return Err(ReconcileError::MultipleOverlaps {
            cigar: cigar_to_string(ops),
        });
    }
    if second.len > first.len {
        return Err(ReconcileError::OverlapExceedsLead {
            overlap: second.len,
            leading: first.len,
            cigar: cigar_to_string(ops),
        });
    }
    Ok((first.len, second.len))
}

/// Packs an overlap-dialect CIGAR into plain match/skip runs.
///
/// The leading `t0 M, t1 B, t2 M` runs collapse to a single
/// `(t0 - t1 + t2) M` run; the tail is kept, then zero-length runs are
/// dropped and adjacent runs of the same kind merge. The result never
/// contains an overlap run.
pub fn pack_cigar(ops: &[CigarOp]) -> Result<Vec<CigarOp>, ReconcileError> {
    let (t0, t1) = validate_shape(ops)?;
    let t2 = ops[2].len;
    let mut packed = Vec::with_capacity(ops.len() - 2);
    packed.push(CigarOp::new(CigarOpKind::Match, t0 - t1 + t2));
    packed.extend_from_slice(&ops[3..]);
    Ok(normalize(packed))
}

fn normalize(ops: Vec<CigarOp>) -> Vec<CigarOp> {
    let mut merged: Vec<CigarOp> = Vec::with_capacity(ops.len());
    for op in ops {
        if op.len == 0 {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.kind == op.kind => last.len += op.len,
            _ => merged.push(op),
        }
    }
    merged
}

/// Reconciles one mate against its overlap-dialect CIGAR.
///
/// `seq` and `qual` must already be oriented the way the CIGAR describes the
/// alignment; reverse-strand mates are reverse-complemented (and their
/// qualities reversed) before this is called. With leading match run `t0`
/// and overlap run `t1`, the duplicated segment `[t0, t0 + t1)` is deleted
/// from both strings and the packed CIGAR is returned alongside.
pub fn reconcile_mate(
    seq: &[u8],
    qual: &[u8],
    ops: &[CigarOp],
) -> Result<ReconciledMate, ReconcileError> {
    if seq.len() != qual.len() {
        return Err(ReconcileError::QualityLengthMismatch {
            seq_len: seq.len(),
            qual_len: qual.len(),
        });
    }
    let (t0, t1) = validate_shape(ops)?;

    // Match runs are the only read-consuming operations in this dialect.
    let read_len: usize = ops
        .iter()
        .filter(|op| op.kind == CigarOpKind::Match)
        .map(|op| op.len as usize)
        .sum();
    if read_len != seq.len() {
        return Err(ReconcileError::ReadLengthMismatch {
            cigar: cigar_to_string(ops),
            cigar_len: read_len,
            seq_len: seq.len(),
        });
    }

    let start = t0 as usize;
    let end = (t0 + t1) as usize;
    if end > seq.len() {
        return Err(ReconcileError::OverlapOutOfRange {
            start,
            end,
            seq_len: seq.len(),
        });
    }

    let cigar = pack_cigar(ops)?;

    let mut sequence = Vec::with_capacity(seq.len() - t1 as usize);
    sequence.extend_from_slice(&seq[..start]);
    sequence.extend_from_slice(&seq[end..]);
    let mut quality = Vec::with_capacity(qual.len() - t1 as usize);
    quality.extend_from_slice(&qual[..start]);
    quality.extend_from_slice(&qual[end..]);

    Ok(ReconciledMate {
        sequence,
        quality,
        cigar,
    })
}

/// In-place nucleotide reverse complement. Anything outside `ACGT` (either
/// case) becomes `N`.
pub fn reverse_complement(seq: &mut [u8]) {
    seq.reverse();
    for base in seq.iter_mut() {
        *base = match *base {
            b'A' | b'a' => b'T',
            b'T' | b't' => b'A',
            b'C' | b'c' => b'G',
            b'G' | b'g' => b'C',
            _ => b'N',
        };
    }
}
