//! ej2sam-rs: convert Complete Genomics evidence-junction DNB rows into
//! standard SAM/BAM alignment records.
//!
//! # Library usage
//!
//! ```no_run
//! use ej2sam_rs::{parse_cigar, reconcile_mate, Dialect};
//!
//! // Decode one mate's overlap-dialect CIGAR, then delete the duplicated
//! // overlap bases and pack the CIGAR before emitting a record.
//! // let ops = parse_cigar("33M2B2M", Dialect::Overlap)?;
//! // let mate = reconcile_mate(seq, qual, &ops)?;
//! //
//! // Whole-file conversion goes through pipeline::run with a header from
//! // header::build_header and an output from writer::AlignmentOutput.
//! ```

// Core row/CIGAR model — the main API surface.
pub mod cigar;
pub mod evidence;
pub mod header;
pub mod reconcile;

// Conversion machinery; the binary drives these.
pub mod cli;
pub mod input;
pub mod pipeline;
pub mod writer;

// Flat re-exports for the most commonly used types.
pub use cigar::{parse_cigar, CigarError, CigarOp, CigarOpKind, Dialect};
pub use evidence::{EvidenceError, EvidenceRecord, Orientation};
pub use pipeline::Stats;
pub use reconcile::{
    pack_cigar, reconcile_mate, reverse_complement, ReconcileError, ReconciledMate,
};
