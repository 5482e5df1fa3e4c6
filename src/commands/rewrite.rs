use std::error::Error;

use clap::Args;
use retfunnel::{rewriter::rewrite_lines, source::{read_lines, write_lines}};
use tracing::info;

use super::TargetArgs;

/// Rewrite the file in place.
#[derive(Args, Debug)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn run(args: RewriteArgs) -> Result<(), Box<dyn Error>> {
    let config = args.target.resolve()?;
    let path = args.target.file_path();
    info!(
        file = %path.display(),
        start = config.window.start,
        end = config.window.end,
        "starting rewrite"
    );

    // 1) Load
    let lines = read_lines(&path)?;

    // 2) Transform
    let outcome = rewrite_lines(&lines, &config);
    let report = &outcome.report;

    // 3) Write back
    write_lines(&path, &outcome.lines)?;

    info!(
        rewritten = report.rewritten.len(),
        skipped = report.skipped.len(),
        lines_in = report.lines_in,
        lines_out = report.lines_out,
        "rewrite finished"
    );
    println!(
        "Replaced {} return statements with goto {} ({} left unchanged)",
        report.rewritten.len(),
        config.cleanup_label,
        report.skipped.len()
    );
    Ok(())
}
