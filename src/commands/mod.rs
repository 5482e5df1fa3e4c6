pub mod preview;
pub mod rewrite;

use std::path::PathBuf;

use clap::Args;
use retfunnel::{
    config::{
        raw::{ConfigOverrides, RawConfig},
        resolved::RewriteConfig,
        resolver::{absolute_from_cwd, load_config, resolve_config},
    },
    errors::RewriteError,
};
use tracing::info;

/// Source file plus the knobs that decide what gets rewritten.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Source file to rewrite
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// JSON config file with window and symbol names
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First line of the rewrite window (included)
    #[arg(long, value_name = "LINE")]
    pub start: Option<usize>,

    /// Line that closes the rewrite window (excluded)
    #[arg(long, value_name = "LINE")]
    pub end: Option<usize>,

    /// Variable that receives the returned value
    #[arg(long, value_name = "NAME")]
    pub result_var: Option<String>,

    /// Label every rewritten exit jumps to
    #[arg(long, value_name = "NAME")]
    pub cleanup_label: Option<String>,

    /// Name prefix of the value constructors to match
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl TargetArgs {
    pub fn file_path(&self) -> PathBuf {
        absolute_from_cwd(&self.file)
    }

    pub fn resolve(&self) -> Result<RewriteConfig, RewriteError> {
        let raw = match &self.config {
            Some(path) => {
                let path = absolute_from_cwd(path);
                info!(config = %path.display(), "loading configuration");
                load_config(&path)?
            }
            None => RawConfig::default(),
        };
        let overrides = ConfigOverrides {
            start: self.start,
            end: self.end,
            result_var: self.result_var.clone(),
            cleanup_label: self.cleanup_label.clone(),
            ctor_prefix: self.prefix.clone(),
        };
        Ok(resolve_config(raw, overrides)?)
    }
}
