use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::RewriteError;

/// One physical line of the input, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    /// Text with the trailing `\n` or `\r\n` removed.
    pub fn content(&self) -> &str {
        let (content, _) = split_terminator(&self.text);
        content
    }

    pub fn terminator(&self) -> &str {
        let (_, term) = split_terminator(&self.text);
        term
    }
}

pub fn split_terminator(text: &str) -> (&str, &str) {
    if let Some(stripped) = text.strip_suffix("\r\n") {
        (stripped, "\r\n")
    } else if let Some(stripped) = text.strip_suffix('\n') {
        (stripped, "\n")
    } else {
        (text, "")
    }
}

/// Splits `text` into numbered lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    text.split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| SourceLine { number: i + 1, text: line.to_string() })
        .collect()
}

pub fn read_lines(path: &Path) -> Result<Vec<SourceLine>, RewriteError> {
    let text = fs::read_to_string(path).map_err(|e| RewriteError::input(path.display().to_string(), e))?;
    let lines = split_lines(&text);
    debug!(path = %path.display(), lines = lines.len(), "loaded source");
    Ok(lines)
}

/// Follows `path` through any symlinks so the rewrite lands on the real file
/// and the link itself survives.
fn resolve_target(path: &Path) -> Result<PathBuf, RewriteError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)
            .map_err(|e| RewriteError::output(path.display().to_string(), e)),
        _ => Ok(path.to_path_buf()),
    }
}

/// Replaces `path` with `lines`. The content goes to a temp file in the same
/// directory first and is then renamed over the target.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), RewriteError> {
    let shown = path.display().to_string();
    let target = resolve_target(path)?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(parent).map_err(|e| RewriteError::output(shown.clone(), e))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        for line in lines {
            writer
                .write_all(line.as_bytes())
                .map_err(|e| RewriteError::output(shown.clone(), e))?;
        }
        writer.flush().map_err(|e| RewriteError::output(shown.clone(), e))?;
    }

    // Keep the original file's permissions on the replacement.
    if let Ok(meta) = fs::metadata(&target) {
        if let Err(e) = fs::set_permissions(temp.path(), meta.permissions()) {
            warn!(path = %shown, error = %e, "could not carry file permissions over to the rewritten file");
        }
    }

    temp.persist(&target).map_err(|e| RewriteError::output(shown.clone(), e.error))?;
    debug!(path = %shown, target = %target.display(), lines = lines.len(), "wrote source");
    Ok(())
}
