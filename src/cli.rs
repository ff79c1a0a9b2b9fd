use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ej2sam-rs",
    about = "Convert Complete Genomics evidence-junction DNB rows to SAM/BAM",
    version
)]
pub struct Args {
    /// Input evidenceJunctionsDnb TSV (plain, gzip, or bzip2)
    pub evidence: PathBuf,

    /// Output alignment path (a .bam extension writes BAM, anything else SAM)
    pub output: PathBuf,

    /// Convert only rows belonging to this junction id
    #[arg(short = 'j', long = "junction", value_name = "ID")]
    pub junction: Option<String>,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
