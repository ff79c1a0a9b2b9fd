use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use ej2sam_rs::{cli, header, input, pipeline, writer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let command_line = std::env::args().collect::<Vec<_>>().join(" ");
    let out_header = header::build_header(env!("CARGO_PKG_VERSION"), &command_line)?;
    let reader = input::open_evidence(&args.evidence)?;
    let mut out = writer::AlignmentOutput::create(&args.output, &out_header)?;
    let stats = pipeline::run(&args, reader, &out_header, &mut out)?;
    out.finish(&out_header)?;
    tracing::info!(
        rows = stats.rows,
        selected = stats.selected,
        pairs = stats.pairs,
        skipped_unconvertible = stats.skipped_unconvertible,
        skipped_unrecognized = stats.skipped_unrecognized,
        "ej2sam-rs: conversion complete"
    );
    Ok(())
}
