//! Evidence junction row model.
//!
//! One tab-separated row pairs a DNB (the vendor's 35+35-base paired read
//! unit) with a candidate structural-variation junction. Column layout,
//! 0-indexed:
//!
//! - 0: junction id
//! - 1-3: read-name fragments (slide, lane, file number in lane)
//! - 4: DNB id
//! - 5, 6: mate A side (`L`/`R`) and strand (`+`/`-`)
//! - 7: reference name for the plain-dialect alignment (unused here)
//! - 8, 9, 10: mate A 0-based position, overlap-dialect CIGAR, and mapping
//!   quality encoded as one printable character
//! - 11, 12: mate B side and strand
//! - 13: reference name for the junction alignment (used for both records)
//! - 14, 15, 16: mate B position, CIGAR, and mapping quality
//! - 17: template length (unused)
//! - 18, 19: combined 70-character sequence and quality; mate A is the first
//!   35 characters, mate B the last 35

use thiserror::Error;

/// Bases per mate.
pub const MATE_SEQ_LEN: usize = 35;

/// Length of the combined sequence and quality columns.
pub const COMBINED_SEQ_LEN: usize = 2 * MATE_SEQ_LEN;

/// Columns a row must carry.
pub const MIN_COLUMNS: usize = 20;

/// Offset of the printable quality and mapping-quality encodings.
pub const PHRED_OFFSET: u8 = 33;

/// Which junction flank a mate aligns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "L" => Some(Side::Left),
            "R" => Some(Side::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

/// Mate side/strand layout of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Mate A on the right flank aligned in reverse, mate B on the left
    /// flank aligned forward. The only layout converted to records.
    RightReverseLeftForward,
    /// Recognized junction layout with no conversion rule.
    LeftForwardRightForward,
    /// Recognized junction layout with no conversion rule.
    LeftForwardRightReverse,
    /// Any other side/strand combination.
    Unrecognized,
}

/// Per-mate alignment columns. The CIGAR stays unparsed so callers can
/// attach row context to parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MateFields {
    pub side: Side,
    pub strand: Strand,
    pub position: usize,
    pub cigar: String,
    pub mapping_quality: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRecord {
    pub junction_id: String,
    pub slide: String,
    pub lane: String,
    pub file_num: String,
    pub dnb_id: String,
    pub mate_a: MateFields,
    pub mate_b: MateFields,
    /// Junction-alignment reference name, shared by both emitted records.
    pub reference_name: String,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvidenceError {
    #[error("junction {junction}: expected at least {} tab-separated columns, found {found}", MIN_COLUMNS)]
    ColumnCount { junction: String, found: usize },

    #[error("junction {junction}: invalid {field} \"{value}\"")]
    Field {
        junction: String,
        field: String,
        value: String,
    },

    #[error("junction {junction}: combined sequence is {len} characters, expected {}", COMBINED_SEQ_LEN)]
    SequenceLength { junction: String, len: usize },

    #[error("junction {junction}: combined quality is {len} characters, expected {}", COMBINED_SEQ_LEN)]
    QualityLength { junction: String, len: usize },

    #[error("junction {junction}: quality byte {byte:#04x} is below the Phred+33 floor")]
    QualityFloor { junction: String, byte: u8 },
}

impl EvidenceRecord {
    /// Parses one tab-split data row.
    pub fn parse(fields: &[&str]) -> Result<Self, EvidenceError> {
        let junction_id = fields.first().copied().unwrap_or("").to_string();
        if fields.len() < MIN_COLUMNS {
            return Err(EvidenceError::ColumnCount {
                junction: junction_id,
                found: fields.len(),
            });
        }

        let mate_a = parse_mate(&junction_id, "mate A", fields[5], fields[6], fields[8], fields[9], fields[10])?;
        let mate_b = parse_mate(&junction_id, "mate B", fields[11], fields[12], fields[14], fields[15], fields[16])?;

        let sequence = fields[18].as_bytes().to_vec();
        if sequence.len() != COMBINED_SEQ_LEN {
            return Err(EvidenceError::SequenceLength {
                junction: junction_id,
                len: sequence.len(),
            });
        }
        let quality = fields[19].as_bytes().to_vec();
        if quality.len() != COMBINED_SEQ_LEN {
            return Err(EvidenceError::QualityLength {
                junction: junction_id,
                len: quality.len(),
            });
        }
        if let Some(&byte) = quality.iter().find(|&&b| b < PHRED_OFFSET) {
            return Err(EvidenceError::QualityFloor {
                junction: junction_id,
                byte,
            });
        }

        Ok(EvidenceRecord {
            slide: fields[1].to_string(),
            lane: fields[2].to_string(),
            file_num: fields[3].to_string(),
            dnb_id: fields[4].to_string(),
            mate_a,
            mate_b,
            reference_name: fields[13].to_string(),
            sequence,
            quality,
            junction_id,
        })
    }

    pub fn orientation(&self) -> Orientation {
        match (
            self.mate_a.side,
            self.mate_a.strand,
            self.mate_b.side,
            self.mate_b.strand,
        ) {
            (Side::Right, Strand::Reverse, Side::Left, Strand::Forward) => {
                Orientation::RightReverseLeftForward
            }
            (Side::Left, Strand::Forward, Side::Right, Strand::Forward) => {
                Orientation::LeftForwardRightForward
            }
            (Side::Left, Strand::Forward, Side::Right, Strand::Reverse) => {
                Orientation::LeftForwardRightReverse
            }
            _ => Orientation::Unrecognized,
        }
    }

    /// Read name shared by both mates: `slide-lane-file:dnb`.
    pub fn read_name(&self) -> String {
        format!(
            "{}-{}-{}:{}",
            self.slide, self.lane, self.file_num, self.dnb_id
        )
    }

    pub fn seq_a(&self) -> &[u8] {
        &self.sequence[..MATE_SEQ_LEN]
    }

    pub fn seq_b(&self) -> &[u8] {
        &self.sequence[MATE_SEQ_LEN..]
    }

    pub fn qual_a(&self) -> &[u8] {
        &self.quality[..MATE_SEQ_LEN]
    }

    pub fn qual_b(&self) -> &[u8] {
        &self.quality[MATE_SEQ_LEN..]
    }

    /// Side/strand letters as they appeared in the row, for diagnostics.
    pub fn orientation_letters(&self) -> String {
        format!(
            "{}{}/{}{}",
            side_char(self.mate_a.side),
            strand_char(self.mate_a.strand),
            side_char(self.mate_b.side),
            strand_char(self.mate_b.strand)
        )
    }
}

fn side_char(side: Side) -> char {
    match side {
        Side::Left => 'L',
        Side::Right => 'R',
    }
}

fn strand_char(strand: Strand) -> char {
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
    }
}

fn parse_mate(
    junction: &str,
    which: &str,
    side_s: &str,
    strand_s: &str,
    pos_s: &str,
    cigar_s: &str,
    mapq_s: &str,
) -> Result<MateFields, EvidenceError> {
    let field_err = |field: &str, value: &str| EvidenceError::Field {
        junction: junction.to_string(),
        field: format!("{which} {field}"),
        value: value.to_string(),
    };

    let side = Side::parse(side_s).ok_or_else(|| field_err("side", side_s))?;
    let strand = Strand::parse(strand_s).ok_or_else(|| field_err("strand", strand_s))?;
    let position = pos_s
        .parse::<usize>()
        .map_err(|_| field_err("position", pos_s))?;

    let mapq_bytes = mapq_s.as_bytes();
    if mapq_bytes.len() != 1 {
        return Err(field_err("mapping quality", mapq_s));
    }
    let mapping_quality = mapq_bytes[0]
        .checked_sub(PHRED_OFFSET)
        .ok_or_else(|| field_err("mapping quality", mapq_s))?;

    Ok(MateFields {
        side,
        strand,
        position,
        cigar: cigar_s.to_string(),
        mapping_quality,
    })
}
