//! Fixed hg18 output dictionary.
//!
//! Evidence coordinates are always against the NCBI36/hg18 assembly, so the
//! output header carries the same 25 sequences in the same order regardless
//! of which references the input rows touch.

use std::num::NonZeroUsize;

use anyhow::{anyhow, Result};
use noodles::sam;
use noodles::sam::header::record::value::map::{program::tag, Program, ReferenceSequence};
use noodles::sam::header::record::value::Map;

/// hg18 reference names and lengths, in dictionary order. chr21 is shorter
/// than chr22 in this assembly; the order is positional, not by length.
pub const REFERENCES: [(&str, usize); 25] = [
    ("chr1", 247_249_719),
    ("chr2", 242_951_149),
    ("chr3", 199_501_827),
    ("chr4", 191_273_063),
    ("chr5", 180_857_866),
    ("chr6", 170_899_992),
    ("chr7", 158_821_424),
    ("chr8", 146_274_826),
    ("chr9", 140_273_252),
    ("chr10", 135_374_737),
    ("chr11", 134_452_384),
    ("chr12", 132_349_534),
    ("chr13", 114_142_980),
    ("chr14", 106_368_585),
    ("chr15", 100_338_915),
    ("chr16", 88_827_254),
    ("chr17", 78_774_742),
    ("chr18", 76_117_153),
    ("chr19", 63_811_651),
    ("chr20", 62_435_964),
    ("chr21", 46_944_323),
    ("chr22", 49_691_432),
    ("chrX", 154_913_754),
    ("chrY", 57_772_954),
    ("chrM", 16_571),
];

/// Builds the output header: `@HD`, the 25 `@SQ` lines above, and a `@PG`
/// line naming this tool and its invocation.
pub fn build_header(version: &str, command_line: &str) -> Result<sam::Header> {
    let pg = Map::<Program>::builder()
        .insert(tag::NAME, "ej2sam-rs")
        .insert(tag::VERSION, version)
        .insert(tag::COMMAND_LINE, command_line)
        .build()?;

    let mut builder = sam::Header::builder()
        .set_header(Map::default())
        .add_program("ej2sam-rs", pg);
    for (name, length) in REFERENCES {
        let length =
            NonZeroUsize::new(length).ok_or_else(|| anyhow!("reference {name} has zero length"))?;
        builder = builder.add_reference_sequence(name, Map::<ReferenceSequence>::new(length));
    }
    Ok(builder.build())
}

/// Resolves a reference name to its position in the dictionary.
pub fn reference_id(header: &sam::Header, name: &str) -> Option<usize> {
    header.reference_sequences().get_index_of(name.as_bytes())
}
