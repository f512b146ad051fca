use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cgpa-extract",
    version,
    about = "Transcript parsing and cumulative GPA analysis tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Transcript PDF; page text is extracted with pdftotext.
    #[arg(
        long,
        conflicts_with = "pages_text",
        required_unless_present = "pages_text"
    )]
    pub pdf: Option<PathBuf>,

    /// Pre-extracted page text with form-feed page breaks.
    #[arg(long)]
    pub pages_text: Option<PathBuf>,

    /// Target cumulative GPA on the 4.3 scale, between 0.00 and 4.30.
    #[arg(long)]
    pub goal: f64,

    /// Credits required for graduation, net of categories that never carry a grade.
    #[arg(long, default_value_t = 109.0)]
    pub total_required_credits: f64,

    #[arg(long, default_value = "transcript_parsed.json")]
    pub output: PathBuf,

    #[arg(long)]
    pub max_pages: Option<usize>,
}
