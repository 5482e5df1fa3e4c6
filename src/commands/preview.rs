use std::error::Error;

use clap::Args;
use retfunnel::{rewriter::rewrite_lines, source::read_lines};
use serde_json;
use tracing::info;

use super::TargetArgs;

/// Print the rewritten file (or a JSON report) without touching the original.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the JSON rewrite report instead of the transformed source
    #[arg(long)]
    pub report_only: bool,
}

pub async fn run(args: PreviewArgs) -> Result<(), Box<dyn Error>> {
    let config = args.target.resolve()?;
    let path = args.target.file_path();
    info!(file = %path.display(), report_only = args.report_only, "previewing rewrite");

    let lines = read_lines(&path)?;
    let outcome = rewrite_lines(&lines, &config);

    if args.report_only {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print!("{}", outcome.text());
    }

    info!(
        rewritten = outcome.report.rewritten.len(),
        skipped = outcome.report.skipped.len(),
        "preview finished"
    );
    Ok(())
}
