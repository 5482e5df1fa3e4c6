use serde_json;
use std::{env, fs, io::ErrorKind, path::{Path, PathBuf}};
use tracing::debug;

use super::{
    raw::{
        default_cleanup_label, default_ctor_prefix, default_result_var, default_window_end,
        default_window_start, ConfigOverrides, RawConfig,
    },
    resolved::{RewriteConfig, RewriteWindow},
};

/// Makes `arg` absolute against the current working directory.
pub fn absolute_from_cwd(arg: &Path) -> PathBuf {
    if arg.is_absolute() {
        return arg.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(arg),
        Err(_) => arg.to_path_buf(),
    }
}

pub fn load_config(path: &Path) -> Result<RawConfig, String> {
    let file_content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            format!("Configuration file '{}' not found.", path.display())
        } else {
            format!("Failed to read configuration file '{}': {}", path.display(), e)
        }
    })?;
    serde_json::from_str(&file_content)
        .map_err(|e| format!("Failed to parse configuration file '{}': {}", path.display(), e))
}

/// C identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_symbol(key: &str, value: &str) -> Result<(), String> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(format!("{} must be a C identifier, got '{}'", key, value))
    }
}

/// Layers defaults, then the file, then command-line overrides, and validates
/// the merged result.
pub fn resolve_config(raw: RawConfig, overrides: ConfigOverrides) -> Result<RewriteConfig, String> {
    let start = overrides
        .start
        .or(raw.window.start)
        .unwrap_or_else(default_window_start);
    let end = overrides
        .end
        .or(raw.window.end)
        .unwrap_or_else(default_window_end);
    let result_var = overrides
        .result_var
        .or(raw.result_var)
        .unwrap_or_else(default_result_var);
    let cleanup_label = overrides
        .cleanup_label
        .or(raw.cleanup_label)
        .unwrap_or_else(default_cleanup_label);
    let ctor_prefix = overrides
        .ctor_prefix
        .or(raw.ctor_prefix)
        .unwrap_or_else(default_ctor_prefix);

    if start == 0 {
        return Err("window start is a 1-based line number and cannot be 0".to_string());
    }
    if end < start {
        return Err(format!("window end ({}) precedes window start ({})", end, start));
    }
    check_symbol("result_var", &result_var)?;
    check_symbol("cleanup_label", &cleanup_label)?;
    // The prefix is the head of an identifier, so it follows the same rule.
    check_symbol("ctor_prefix", &ctor_prefix)?;

    let resolved = RewriteConfig {
        window: RewriteWindow::new(start, end),
        result_var,
        cleanup_label,
        ctor_prefix,
    };
    debug!(?resolved, "resolved configuration");
    Ok(resolved)
}
