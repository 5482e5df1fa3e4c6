use crate::config::resolved::{RewriteConfig, INDENT_STEP};

use super::classify::MatchResult;

/// Replacement lines for a matched statement: an optional `case` label line,
/// then the assignment and the jump, one indent step deeper than the original.
///
/// Every line ends with `terminator`. An empty terminator (the file's last
/// line had none) only applies to the final emitted line; the ones before it
/// get `\n` so they stay separate lines.
pub fn emit(m: &MatchResult<'_>, config: &RewriteConfig, terminator: &str) -> Vec<String> {
    let (indent, label, expr) = match *m {
        MatchResult::NoMatch(_) => return Vec::new(),
        MatchResult::BareReturn { indent, expr } => (indent, None, expr),
        MatchResult::LabeledReturn { indent, label, expr } => (indent, Some(label), expr),
    };

    let mut out = Vec::with_capacity(3);
    if let Some(label) = label {
        out.push(format!("{indent}case {label}:"));
    }
    out.push(format!("{indent}{INDENT_STEP}{} = {expr};", config.result_var));
    out.push(format!("{indent}{INDENT_STEP}goto {};", config.cleanup_label));

    let inner_term = if terminator.is_empty() { "\n" } else { terminator };
    let last = out.len() - 1;
    for (i, line) in out.iter_mut().enumerate() {
        line.push_str(if i == last { terminator } else { inner_term });
    }
    out
}
