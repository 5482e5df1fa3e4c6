pub mod classify;
pub mod emit;
pub mod window;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{config::resolved::{RewriteConfig, RewriteWindow}, source::SourceLine};

use self::{
    classify::{classify, MatchResult, SkipReason},
    emit::emit,
    window::RegionSelector,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub line: usize,
    pub label: Option<String>,
    pub expr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub line: usize,
    pub reason: SkipReason,
    pub text: String,
}

/// What a pass changed and what it declined to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteReport {
    pub window: RewriteWindow,
    pub lines_in: usize,
    pub lines_out: usize,
    pub rewritten: Vec<Rewrite>,
    /// In-window lines that passed the gate but were not rewritten.
    pub skipped: Vec<Skip>,
}

impl RewriteReport {
    pub fn changed(&self) -> bool {
        !self.rewritten.is_empty()
    }
}

/// Result of one pass: the full output plus the report.
pub struct RewriteOutcome {
    pub lines: Vec<String>,
    pub report: RewriteReport,
}

impl RewriteOutcome {
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

/// Single forward pass over `lines`.
pub fn rewrite_lines(lines: &[SourceLine], config: &RewriteConfig) -> RewriteOutcome {
    let mut selector = RegionSelector::new(config.window);
    let mut out = Vec::with_capacity(lines.len());
    let mut rewritten = Vec::new();
    let mut skipped = Vec::new();

    for line in lines {
        let open = selector.in_window(line.number);
        let m = classify(line.content(), open, &config.ctor_prefix);

        match m {
            MatchResult::NoMatch(reason) => {
                if reason.is_reportable() {
                    warn!(line = line.number, ?reason, text = %line.content().trim(), "left return statement unchanged");
                    skipped.push(Skip {
                        line: line.number,
                        reason,
                        text: line.content().to_string(),
                    });
                }
                out.push(line.text.clone());
            }
            MatchResult::BareReturn { expr, .. } | MatchResult::LabeledReturn { expr, .. } => {
                let label = match m {
                    MatchResult::LabeledReturn { label, .. } => Some(label.to_string()),
                    _ => None,
                };
                debug!(line = line.number, %expr, "rewriting return");
                out.extend(emit(&m, config, line.terminator()));
                rewritten.push(Rewrite {
                    line: line.number,
                    label,
                    expr: expr.to_string(),
                });
            }
        }
    }

    let report = RewriteReport {
        window: config.window,
        lines_in: lines.len(),
        lines_out: out.len(),
        rewritten,
        skipped,
    };
    RewriteOutcome { lines: out, report }
}

/// Convenience wrapper over `rewrite_lines` for in-memory text.
pub fn rewrite_text(text: &str, config: &RewriteConfig) -> RewriteOutcome {
    rewrite_lines(&crate::source::split_lines(text), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(start: usize, end: usize) -> RewriteConfig {
        RewriteConfig {
            window: RewriteWindow::new(start, end),
            result_var: "val".into(),
            cleanup_label: "cleanup".into(),
            ctor_prefix: "val_".into(),
        }
    }

    #[test]
    fn bare_return_inside_window() {
        let out = rewrite_text("  return val_int(42);\n", &cfg(1, 10));
        assert_eq!(out.lines, vec!["      val = val_int(42);\n", "      goto cleanup;\n"]);
        assert_eq!(out.report.rewritten.len(), 1);
        assert_eq!(out.report.lines_in, 1);
        assert_eq!(out.report.lines_out, 2);
    }

    #[test]
    fn labeled_return_inside_window() {
        let out = rewrite_text("    case OP_ADD: return val_add(a, b);\n", &cfg(1, 10));
        assert_eq!(
            out.lines,
            vec!["    case OP_ADD:\n", "        val = val_add(a, b);\n", "        goto cleanup;\n"]
        );
        assert_eq!(out.report.rewritten[0].label.as_deref(), Some("OP_ADD"));
    }

    #[test]
    fn boundary_lines_follow_half_open_window() {
        let src = "\
return val_a(1);
return val_b(2);
return val_c(3);
return val_d(4);
return val_e(5);
return val_f(6);
";
        let out = rewrite_text(src, &cfg(3, 5));
        let lines: Vec<usize> = out.report.rewritten.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(
            out.text(),
            "\
return val_a(1);
return val_b(2);
    val = val_c(3);
    goto cleanup;
    val = val_d(4);
    goto cleanup;
return val_e(5);
return val_f(6);
"
        );
    }

    #[test]
    fn unmatched_lines_pass_through_and_are_reported() {
        let src = "  x = 1;\r\n  return val_call(f(x), y);\r\n  return val_int(1);";
        let out = rewrite_text(src, &cfg(1, 10));
        assert_eq!(
            out.text(),
            "  x = 1;\r\n  return val_call(f(x), y);\r\n      val = val_int(1);\n      goto cleanup;"
        );
        assert_eq!(out.report.skipped.len(), 1);
        assert_eq!(out.report.skipped[0].line, 2);
        assert_eq!(out.report.skipped[0].reason, SkipReason::NestedArguments);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let src = "switch (op) {\n    case OP_ADD: return val_add(a, b);\n    default:\n        return val_int(0);\n}\n";
        let config = cfg(1, 100);
        let first = rewrite_text(src, &config);
        assert!(first.report.changed());

        let second = rewrite_text(&first.text(), &config);
        assert!(!second.report.changed());
        assert!(second.report.skipped.is_empty());
        assert_eq!(second.text(), first.text());
    }

    #[test]
    fn outside_window_is_byte_identical() {
        let src = "  return val_int(1);\n\treturn val_int(2);\r\n";
        let out = rewrite_text(src, &cfg(50, 60));
        assert_eq!(out.text(), src);
        assert!(out.report.skipped.is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let out = rewrite_text("return val_int(1);\nreturn val_n();\n", &cfg(1, 10));
        let json = serde_json::to_value(&out.report).unwrap();
        assert_eq!(json["rewritten"][0]["expr"], "val_int(1)");
        assert_eq!(json["skipped"][0]["reason"], "empty_arguments");
        assert_eq!(json["window"]["start"], 1);
    }
}
