//! Alignment output selection.
//!
//! SAM text by default; a `.bam` output extension selects BAM. Both paths
//! share the `sam::alignment::io::Write` record interface, so the pipeline
//! never branches on the container.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::RecordBuf;

pub enum AlignmentOutput {
    Sam(sam::io::Writer<BufWriter<File>>),
    Bam(bam::io::Writer<noodles::bgzf::io::Writer<File>>),
}

impl AlignmentOutput {
    /// Creates the output file and writes the header.
    pub fn create(path: &Path, header: &sam::Header) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("cannot create output file: {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let mut out = if ext == "bam" {
            AlignmentOutput::Bam(bam::io::Writer::new(file))
        } else {
            AlignmentOutput::Sam(sam::io::Writer::new(BufWriter::new(file)))
        };
        match &mut out {
            AlignmentOutput::Sam(writer) => writer.write_header(header)?,
            AlignmentOutput::Bam(writer) => writer.write_header(header)?,
        }
        Ok(out)
    }

    pub fn write_record(&mut self, header: &sam::Header, record: &RecordBuf) -> Result<()> {
        match self {
            AlignmentOutput::Sam(writer) => writer.write_alignment_record(header, record)?,
            AlignmentOutput::Bam(writer) => writer.write_alignment_record(header, record)?,
        }
        Ok(())
    }

    /// Flushes and finalizes the output. Call once, after the last record.
    pub fn finish(&mut self, header: &sam::Header) -> Result<()> {
        match self {
            AlignmentOutput::Sam(writer) => writer.get_mut().flush()?,
            AlignmentOutput::Bam(writer) => writer.finish(header)?,
        }
        Ok(())
    }
}
