//! Evidence CIGAR parsing.
//!
//! Evidence files describe each mate's alignment with run-length CIGAR
//! strings over one of two alphabets. The plain dialect uses `M` (aligned to
//! the reference) and `N` (reference skip, the junction gap). The overlap
//! dialect adds `B`, the vendor's back-up operation: the bases that follow
//! re-read reference the leading match run already covered.

use thiserror::Error;

/// Operation alphabet across both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOpKind {
    /// `M`: consumes read and reference.
    Match,
    /// `N`: consumes reference only.
    Skip,
    /// `B`: backs the reference position up; consumes nothing. Always two
    /// bases in production evidence files.
    Overlap,
}

impl CigarOpKind {
    pub fn to_char(self) -> char {
        match self {
            CigarOpKind::Match => 'M',
            CigarOpKind::Skip => 'N',
            CigarOpKind::Overlap => 'B',
        }
    }
}

/// One run-length-encoded CIGAR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub kind: CigarOpKind,
    pub len: u32,
}

impl CigarOp {
    pub fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }
}

/// Which operation letters a CIGAR string may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `{M, N}`: plain junction alignments.
    Plain,
    /// `{M, N, B}`: mate alignments carrying the overlap operation.
    Overlap,
}

impl Dialect {
    fn decode(self, op: char) -> Option<CigarOpKind> {
        match (self, op) {
            (_, 'M') => Some(CigarOpKind::Match),
            (_, 'N') => Some(CigarOpKind::Skip),
            (Dialect::Overlap, 'B') => Some(CigarOpKind::Overlap),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CigarError {
    #[error("invalid operation '{op}' in CIGAR \"{cigar}\"")]
    InvalidOp { op: char, cigar: String },

    #[error("operation '{op}' has no run length in CIGAR \"{cigar}\"")]
    MissingLength { op: char, cigar: String },

    #[error("run length without an operation at the end of CIGAR \"{cigar}\"")]
    MissingOp { cigar: String },

    #[error("run length overflow in CIGAR \"{cigar}\"")]
    LengthOverflow { cigar: String },
}

/// Parses a run-length CIGAR string under the given dialect.
///
/// Each token is one-or-more decimal digits followed by an operation letter;
/// zero-length runs are preserved as written. Unknown letters and malformed
/// tokens are hard errors, never skipped.
pub fn parse_cigar(text: &str, dialect: Dialect) -> Result<Vec<CigarOp>, CigarError> {
    let mut ops = Vec::new();
    let mut len: Option<u32> = None;
    for ch in text.chars() {
        if let Some(digit) = ch.to_digit(10) {
            len = Some(
                len.unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(|| CigarError::LengthOverflow {
                        cigar: text.to_string(),
                    })?,
            );
        } else if let Some(kind) = dialect.decode(ch) {
            let len = len.take().ok_or_else(|| CigarError::MissingLength {
                op: ch,
                cigar: text.to_string(),
            })?;
            ops.push(CigarOp::new(kind, len));
        } else {
            return Err(CigarError::InvalidOp {
                op: ch,
                cigar: text.to_string(),
            });
        }
    }
    if len.is_some() {
        return Err(CigarError::MissingOp {
            cigar: text.to_string(),
        });
    }
    Ok(ops)
}

/// Renders operations back to string form, for messages and logs.
pub fn cigar_to_string(ops: &[CigarOp]) -> String {
    let mut out = String::new();
    for op in ops {
        out.push_str(&op.len.to_string());
        out.push(op.kind.to_char());
    }
    out
}
