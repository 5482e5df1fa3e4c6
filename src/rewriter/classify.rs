use serde::{Deserialize, Serialize};

/// Why a line was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    OutsideWindow,
    /// No `return <prefix>` anywhere on the line.
    NoGate,
    /// The argument list opens another parenthesis. Only one level is handled.
    NestedArguments,
    EmptyArguments,
    /// No closing `)` or no `;` after the call.
    Unterminated,
    /// Passed the gate but fits neither statement shape.
    Unrecognized,
}

impl SkipReason {
    /// Reasons worth reporting: the line looked like a target but was not rewritten.
    pub fn is_reportable(self) -> bool {
        !matches!(self, SkipReason::OutsideWindow | SkipReason::NoGate)
    }
}

/// Classification of one line. Slices borrow from the classified text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
    NoMatch(SkipReason),
    /// `<indent>return <call>;`
    BareReturn { indent: &'a str, expr: &'a str },
    /// `<indent>case <label>: return <call>;`
    LabeledReturn { indent: &'a str, label: &'a str, expr: &'a str },
}

impl<'a> MatchResult<'a> {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch(_))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Coarse pre-filter: `return`, at least one whitespace character, then the
/// constructor prefix. Case-sensitive.
pub fn passes_gate(line: &str, ctor_prefix: &str) -> bool {
    line.match_indices("return").any(|(at, kw)| {
        let after = &line[at + kw.len()..];
        let trimmed = after.trim_start();
        trimmed.len() < after.len() && trimmed.starts_with(ctor_prefix)
    })
}

/// Byte cursor over a single line.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume characters while `pred` holds, returning what was consumed.
    fn scan_while<F>(&mut self, pred: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if pred(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn skip_whitespace(&mut self) -> &'a str {
        self.scan_while(char::is_whitespace)
    }

    fn eat(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Like `eat`, but `kw` must not run on into a longer identifier.
    fn eat_keyword(&mut self, kw: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(kw) {
            return false;
        }
        if rest[kw.len()..].chars().next().is_some_and(is_ident_char) {
            return false;
        }
        self.pos += kw.len();
        true
    }

    fn identifier(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Some(self.scan_while(is_ident_char)),
            _ => None,
        }
    }
}

/// `<prefix><ident-chars>+(<args>)` where `args` is non-empty and holds no `(`.
fn scan_call<'a>(cur: &mut Cursor<'a>, ctor_prefix: &str) -> Result<&'a str, SkipReason> {
    let start = cur.pos;
    if !cur.eat(ctor_prefix) {
        return Err(SkipReason::Unrecognized);
    }
    if cur.scan_while(is_ident_char).is_empty() {
        return Err(SkipReason::Unrecognized);
    }
    if !cur.eat("(") {
        return Err(SkipReason::Unrecognized);
    }

    let args_start = cur.pos;
    loop {
        match cur.peek() {
            None => return Err(SkipReason::Unterminated),
            Some('(') => return Err(SkipReason::NestedArguments),
            Some(')') => break,
            Some(ch) => cur.pos += ch.len_utf8(),
        }
    }
    if cur.input[args_start..cur.pos].trim().is_empty() {
        return Err(SkipReason::EmptyArguments);
    }
    cur.pos += 1;
    Ok(&cur.input[start..cur.pos])
}

/// `return <ws>+ <call> <ws>* ; <ws>*` through to the end of the line.
fn scan_return_tail<'a>(cur: &mut Cursor<'a>, ctor_prefix: &str) -> Result<&'a str, SkipReason> {
    if !cur.eat_keyword("return") {
        return Err(SkipReason::Unrecognized);
    }
    if cur.skip_whitespace().is_empty() {
        return Err(SkipReason::Unrecognized);
    }
    let expr = scan_call(cur, ctor_prefix)?;
    cur.skip_whitespace();
    if !cur.eat(";") {
        return Err(SkipReason::Unterminated);
    }
    cur.skip_whitespace();
    if !cur.at_end() {
        // Trailing code or comments would be lost by the rewrite.
        return Err(SkipReason::Unrecognized);
    }
    Ok(expr)
}

/// Shape A: `<indent>return <call>;`
pub fn match_bare_return<'a>(line: &'a str, ctor_prefix: &str) -> Result<MatchResult<'a>, SkipReason> {
    let mut cur = Cursor::new(line);
    let indent = cur.skip_whitespace();
    let expr = scan_return_tail(&mut cur, ctor_prefix)?;
    Ok(MatchResult::BareReturn { indent, expr })
}

/// Shape B: `<indent>case <label>: return <call>;`
pub fn match_labeled_return<'a>(line: &'a str, ctor_prefix: &str) -> Result<MatchResult<'a>, SkipReason> {
    let mut cur = Cursor::new(line);
    let indent = cur.skip_whitespace();
    if !cur.eat_keyword("case") {
        return Err(SkipReason::Unrecognized);
    }
    if cur.skip_whitespace().is_empty() {
        return Err(SkipReason::Unrecognized);
    }
    let label = cur.identifier().ok_or(SkipReason::Unrecognized)?;
    cur.skip_whitespace();
    if !cur.eat(":") {
        return Err(SkipReason::Unrecognized);
    }
    cur.skip_whitespace();
    let expr = scan_return_tail(&mut cur, ctor_prefix)?;
    Ok(MatchResult::LabeledReturn { indent, label, expr })
}

/// Classifies one line (terminator already stripped).
pub fn classify<'a>(line: &'a str, window_open: bool, ctor_prefix: &str) -> MatchResult<'a> {
    if !window_open {
        return MatchResult::NoMatch(SkipReason::OutsideWindow);
    }
    if !passes_gate(line, ctor_prefix) {
        return MatchResult::NoMatch(SkipReason::NoGate);
    }

    let bare = match match_bare_return(line, ctor_prefix) {
        Ok(m) => return m,
        Err(reason) => reason,
    };
    let labeled = match match_labeled_return(line, ctor_prefix) {
        Ok(m) => return m,
        Err(reason) => reason,
    };

    // Report whichever shape got further.
    let reason = if bare != SkipReason::Unrecognized { bare } else { labeled };
    MatchResult::NoMatch(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: &str = "val_";

    #[test]
    fn bare_return() {
        assert_eq!(
            classify("  return val_int(42);", true, P),
            MatchResult::BareReturn { indent: "  ", expr: "val_int(42)" }
        );
    }

    #[test]
    fn labeled_return() {
        assert_eq!(
            classify("    case OP_ADD: return val_add(a, b);", true, P),
            MatchResult::LabeledReturn { indent: "    ", label: "OP_ADD", expr: "val_add(a, b)" }
        );
    }

    #[test]
    fn labeled_return_with_loose_spacing() {
        assert_eq!(
            classify("\tcase  TOK_LT :return   val_bool(l < r) ;  ", true, P),
            MatchResult::LabeledReturn { indent: "\t", label: "TOK_LT", expr: "val_bool(l < r)" }
        );
    }

    #[test]
    fn outside_window_is_not_inspected() {
        assert_eq!(
            classify("  return val_int(42);", false, P),
            MatchResult::NoMatch(SkipReason::OutsideWindow)
        );
    }

    #[test]
    fn gate_rejects_lines_without_prefixed_return() {
        assert_eq!(classify("  return x;", true, P), MatchResult::NoMatch(SkipReason::NoGate));
        assert_eq!(classify("  Value v = val_int(1);", true, P), MatchResult::NoMatch(SkipReason::NoGate));
        assert_eq!(classify("  return VAL_INT(1);", true, P), MatchResult::NoMatch(SkipReason::NoGate));
        assert_eq!(classify("  returnval_int(1);", true, P), MatchResult::NoMatch(SkipReason::NoGate));
    }

    #[test]
    fn nested_parentheses_are_left_whole() {
        assert_eq!(
            classify("  return val_call(f(x), y);", true, P),
            MatchResult::NoMatch(SkipReason::NestedArguments)
        );
        assert_eq!(
            classify("  case OP_CALL: return val_call(f(x));", true, P),
            MatchResult::NoMatch(SkipReason::NestedArguments)
        );
    }

    #[test]
    fn empty_argument_list() {
        assert_eq!(classify("  return val_null();", true, P), MatchResult::NoMatch(SkipReason::EmptyArguments));
    }

    #[test]
    fn multi_line_call_is_unterminated() {
        assert_eq!(classify("  return val_add(a,", true, P), MatchResult::NoMatch(SkipReason::Unterminated));
        assert_eq!(classify("  return val_int(1)", true, P), MatchResult::NoMatch(SkipReason::Unterminated));
    }

    #[test]
    fn commented_or_trailing_text_is_unrecognized() {
        assert_eq!(
            classify("  // return val_int(1);", true, P),
            MatchResult::NoMatch(SkipReason::Unrecognized)
        );
        assert_eq!(
            classify("  if (x) return val_int(1);", true, P),
            MatchResult::NoMatch(SkipReason::Unrecognized)
        );
        assert_eq!(
            classify("  return val_int(1); // one", true, P),
            MatchResult::NoMatch(SkipReason::Unrecognized)
        );
    }

    #[test]
    fn prefix_alone_is_not_a_callee() {
        assert_eq!(classify("  return val_(1);", true, P), MatchResult::NoMatch(SkipReason::Unrecognized));
    }

    #[test]
    fn case_label_must_be_an_identifier() {
        assert_eq!(
            classify("    case 1: return val_int(1);", true, P),
            MatchResult::NoMatch(SkipReason::Unrecognized)
        );
        assert_eq!(
            classify("    case 'a': return val_char(c);", true, P),
            MatchResult::NoMatch(SkipReason::Unrecognized)
        );
    }

    #[test]
    fn custom_prefix() {
        assert_eq!(
            classify("return mk_pair(a, b);", true, "mk_"),
            MatchResult::BareReturn { indent: "", expr: "mk_pair(a, b)" }
        );
        assert_eq!(classify("return val_int(1);", true, "mk_"), MatchResult::NoMatch(SkipReason::NoGate));
    }

    #[test]
    fn rewritten_output_does_not_match_again() {
        assert_eq!(
            classify("      binary_result = val_int(42);", true, P),
            MatchResult::NoMatch(SkipReason::NoGate)
        );
        assert_eq!(classify("    case OP_ADD:", true, P), MatchResult::NoMatch(SkipReason::NoGate));
    }
}
