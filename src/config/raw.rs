use serde::{Deserialize, Serialize};

pub fn default_window_start() -> usize {
    175
}

pub fn default_window_end() -> usize {
    605
}

pub fn default_result_var() -> String {
    "binary_result".to_string()
}

pub fn default_cleanup_label() -> String {
    "binary_cleanup".to_string()
}

pub fn default_ctor_prefix() -> String {
    "val_".to_string()
}

/// Window bounds as written in a config file. Either end may be omitted.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawWindow {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

/// On-disk configuration. Every key is optional; missing keys fall back to
/// the built-in defaults during resolution.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub window: RawWindow,
    #[serde(default)]
    pub result_var: Option<String>,
    #[serde(default)]
    pub cleanup_label: Option<String>,
    #[serde(default)]
    pub ctor_prefix: Option<String>,
}

/// Values supplied on the command line. They take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub result_var: Option<String>,
    pub cleanup_label: Option<String>,
    pub ctor_prefix: Option<String>,
}
