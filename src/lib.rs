pub mod config;
pub mod errors;
pub mod rewriter;
pub mod source;
