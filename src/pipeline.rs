//! Streaming conversion pipeline.
//!
//! One pass over the evidence rows: filter by junction id, classify the mate
//! layout, and emit a pair of alignment records for each convertible row.
//! Mate A's record (reverse strand, last in pair) is always written before
//! mate B's (forward strand, first in pair).

use std::io::BufRead;

use anyhow::{anyhow, Context, Result};
use noodles::core::Position;
use noodles::sam;
use sam::alignment::record::cigar::{op::Kind as CigarKind, Op as SamCigarOp};
use sam::alignment::record::data::field::Tag;
use sam::alignment::record::Flags;
use sam::alignment::record::MappingQuality;
use sam::alignment::record_buf::{data::field::Value, Cigar as SamCigar, QualityScores, Sequence};
use sam::alignment::RecordBuf;

use crate::cigar::{parse_cigar, CigarOp, CigarOpKind, Dialect};
use crate::cli::Args;
use crate::evidence::{EvidenceRecord, Orientation, PHRED_OFFSET};
use crate::header::reference_id;
use crate::reconcile::{reconcile_mate, reverse_complement, ReconciledMate};
use crate::writer::AlignmentOutput;

#[derive(Debug, Default)]
pub struct Stats {
    pub rows: u64,
    pub selected: u64,
    pub pairs: u64,
    pub skipped_unconvertible: u64,
    pub skipped_unrecognized: u64,
}

/// Streams evidence rows from `reader` into `out`.
///
/// Rows are filtered by junction id (when one was given) before parsing; a
/// malformed selected row aborts the run with the input line number and
/// junction id in the error chain.
pub fn run(
    args: &Args,
    reader: impl BufRead,
    header: &sam::Header,
    out: &mut AlignmentOutput,
) -> Result<Stats> {
    let mut stats = Stats::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading evidence line {line_no}"))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        stats.rows += 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if let Some(junction) = args.junction.as_deref() {
            if fields.first().copied() != Some(junction) {
                continue;
            }
        }
        stats.selected += 1;

        let row =
            EvidenceRecord::parse(&fields).with_context(|| format!("evidence line {line_no}"))?;
        match row.orientation() {
            Orientation::RightReverseLeftForward => {
                let (rec_a, rec_b) = build_pair(&row, header)
                    .with_context(|| format!("junction {} (line {line_no})", row.junction_id))?;
                out.write_record(header, &rec_a)?;
                out.write_record(header, &rec_b)?;
                stats.pairs += 1;
            }
            Orientation::LeftForwardRightForward | Orientation::LeftForwardRightReverse => {
                stats.skipped_unconvertible += 1;
                tracing::debug!(
                    junction = %row.junction_id,
                    layout = %row.orientation_letters(),
                    "skipping unconvertible mate layout"
                );
            }
            Orientation::Unrecognized => {
                stats.skipped_unrecognized += 1;
                tracing::warn!(
                    junction = %row.junction_id,
                    layout = %row.orientation_letters(),
                    "unrecognized mate layout, row skipped"
                );
            }
        }
    }
    Ok(stats)
}

/// Converts one supported-layout row into its two alignment records.
fn build_pair(row: &EvidenceRecord, header: &sam::Header) -> Result<(RecordBuf, RecordBuf)> {
    let ref_id = reference_id(header, &row.reference_name)
        .ok_or_else(|| anyhow!("unknown reference {}", row.reference_name))?;

    let ops_a = parse_cigar(&row.mate_a.cigar, Dialect::Overlap).context("mate A CIGAR")?;
    let ops_b = parse_cigar(&row.mate_b.cigar, Dialect::Overlap).context("mate B CIGAR")?;

    // Mate A aligns in reverse: orient the read first, then reconcile in
    // alignment space.
    let mut seq_a = row.seq_a().to_vec();
    let mut qual_a = row.qual_a().to_vec();
    reverse_complement(&mut seq_a);
    qual_a.reverse();
    let mate_a = reconcile_mate(&seq_a, &qual_a, &ops_a).context("mate A")?;
    let mate_b = reconcile_mate(row.seq_b(), row.qual_b(), &ops_b).context("mate B")?;

    let name = row.read_name();
    let rec_a = build_record(
        &name,
        Flags::SEGMENTED | Flags::REVERSE_COMPLEMENTED | Flags::LAST_SEGMENT,
        ref_id,
        row.mate_a.position,
        row.mate_a.mapping_quality,
        &mate_a,
        row.mate_b.position,
    )?;
    let rec_b = build_record(
        &name,
        Flags::SEGMENTED | Flags::MATE_REVERSE_COMPLEMENTED | Flags::FIRST_SEGMENT,
        ref_id,
        row.mate_b.position,
        row.mate_b.mapping_quality,
        &mate_b,
        row.mate_a.position,
    )?;
    Ok((rec_a, rec_b))
}

fn build_record(
    name: &str,
    flags: Flags,
    ref_id: usize,
    position: usize,
    mapping_quality: u8,
    mate: &ReconciledMate,
    mate_position: usize,
) -> Result<RecordBuf> {
    let mut out = RecordBuf::default();
    *out.name_mut() = Some(name.as_bytes().to_vec().into());
    *out.flags_mut() = flags;

    let pos1 = position + 1;
    let alignment_start =
        Position::try_from(pos1).map_err(|_| anyhow!("alignment start out of range: {pos1}"))?;
    *out.reference_sequence_id_mut() = Some(ref_id);
    *out.alignment_start_mut() = Some(alignment_start);
    *out.mapping_quality_mut() = MappingQuality::new(mapping_quality);

    *out.cigar_mut() = to_sam_cigar(&mate.cigar);
    *out.sequence_mut() = Sequence::from(mate.sequence.clone());
    // Quality bytes were floor-checked at row parse.
    let scores: Vec<u8> = mate.quality.iter().map(|&b| b - PHRED_OFFSET).collect();
    *out.quality_scores_mut() = QualityScores::from(scores);

    let mate_pos1 = mate_position + 1;
    let mate_start = Position::try_from(mate_pos1)
        .map_err(|_| anyhow!("mate alignment start out of range: {mate_pos1}"))?;
    *out.mate_reference_sequence_id_mut() = Some(ref_id);
    *out.mate_alignment_start_mut() = Some(mate_start);
    *out.template_length_mut() = 0;

    out.data_mut()
        .insert(Tag::new(b'X', b'S'), Value::from(1i32));
    Ok(out)
}

/// Packed runs to SAM operations. Overlap runs cannot appear after packing.
fn to_sam_cigar(ops: &[CigarOp]) -> SamCigar {
    let ops: Vec<SamCigarOp> = ops
        .iter()
        .filter_map(|op| {
            let kind = match op.kind {
                CigarOpKind::Match => CigarKind::Match,
                CigarOpKind::Skip => CigarKind::Skip,
                CigarOpKind::Overlap => return None,
            };
            Some(SamCigarOp::new(kind, op.len as usize))
        })
        .collect();
    ops.into_iter().collect()
}
