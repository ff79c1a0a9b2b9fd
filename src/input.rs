//! Evidence input handling.
//!
//! Vendor exports ship bzip2-compressed; re-archived copies are usually
//! gzip. Compression is sniffed from magic bytes, never from the extension.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy)]
enum Compression {
    Gzip,
    Bzip2,
}

fn detect_compression(path: &Path) -> Result<Option<Compression>> {
    let file =
        File::open(path).with_context(|| format!("cannot open evidence file: {}", path.display()))?;
    let mut magic = Vec::with_capacity(3);
    file.take(3).read_to_end(&mut magic)?;
    Ok(if magic.starts_with(&[0x1f, 0x8b]) {
        Some(Compression::Gzip)
    } else if magic.starts_with(b"BZh") {
        Some(Compression::Bzip2)
    } else {
        None
    })
}

/// Opens an evidence file, transparently decompressing gzip and bzip2.
pub fn open_evidence(path: &Path) -> Result<Box<dyn BufRead>> {
    let compression = detect_compression(path)?;
    let open = || {
        File::open(path).with_context(|| format!("cannot open evidence file: {}", path.display()))
    };
    let reader: Box<dyn BufRead> = match compression {
        Some(Compression::Gzip) => Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
            open()?,
        ))),
        Some(Compression::Bzip2) => Box::new(BufReader::new(bzip2::read::MultiBzDecoder::new(
            open()?,
        ))),
        None => Box::new(BufReader::new(open()?)),
    };
    Ok(reader)
}
