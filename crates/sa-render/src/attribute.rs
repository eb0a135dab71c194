//! The `name = Class(args, kwargs)` attribute expression renderer.
//!
//! Every generated statement - column definitions, relationships, foreign
//! keys, table-args tuples - is one [`Attribute`]. The node renders condensed
//! on a single line while it fits under the width limit, and falls back to a
//! greedily wrapped multi-line block when it does not (or when multi-line
//! form is forced, as for `__table_args__`).
//!
//! # Wrapped form
//!
//! ```text
//! name = ClassName(  # comment
//!     token, token, token,
//!     token
//! )
//! ```
//!
//! Tokens (positional arguments first, then `key=value` keyword arguments)
//! are packed onto each line until the next token would meet or exceed the
//! width limit; every packed line ends with a trailing comma except the last.

use std::fmt;

use sa_core::config::{DEFAULT_INDENT, DEFAULT_MAX_WIDTH};

/// One renderable `name = ClassName(args, kwargs)` expression.
///
/// Both the attribute name and the callee are optional: a node without a
/// name renders a bare call (`ClassName(...)`), and a node without a callee
/// renders the tuple form (`name = (...)`) used for `__table_args__`.
///
/// # Examples
///
/// ```
/// use sa_render::Attribute;
///
/// let mut attr = Attribute::named("test", "Test");
/// attr.push_arg("\"a\"");
/// attr.push_kwarg("flag", "True");
/// assert_eq!(attr.to_string(), "test = Test(\"a\", flag=True)");
///
/// let bare = Attribute::call("Test");
/// assert_eq!(bare.to_string(), "Test()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: Option<String>,
    callee: Option<String>,
    args: Vec<String>,
    kwargs: Vec<(String, String)>,
    comment: Option<String>,
    tab: String,
    extended: bool,
    max_width: usize,
}

impl Default for Attribute {
    fn default() -> Self {
        Self {
            name: None,
            callee: None,
            args: Vec::new(),
            kwargs: Vec::new(),
            comment: None,
            tab: String::new(),
            extended: false,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl Attribute {
    /// Creates a named attribute assignment: `name = Callee(...)`.
    #[must_use]
    pub fn named(name: impl Into<String>, callee: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            callee: Some(callee.into()),
            ..Self::default()
        }
    }

    /// Creates a bare call expression: `Callee(...)`.
    #[must_use]
    pub fn call(callee: impl Into<String>) -> Self {
        Self {
            callee: Some(callee.into()),
            ..Self::default()
        }
    }

    /// Creates a named tuple expression with no callee: `name = (...)`.
    #[must_use]
    pub fn tuple(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Appends a positional argument.
    pub fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Appends a keyword argument pair.
    pub fn push_kwarg(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.kwargs.push((key.into(), value.into()));
    }

    /// Sets the trailing comment (rendered as `  # text`).
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Sets the indentation prefix emitted before every rendered line.
    pub fn set_tab(&mut self, tab: impl Into<String>) {
        self.tab = tab.into();
    }

    /// Forces the wrapped multi-line form regardless of line length.
    pub fn set_extended(&mut self) {
        self.extended = true;
    }

    /// Overrides the column-width limit (defaults to 120).
    pub fn set_max_width(&mut self, max_width: usize) {
        self.max_width = max_width;
    }

    /// Returns `true` if the node carries no arguments of either kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// Renders the single-line form unconditionally.
    ///
    /// Used for expressions embedded as tokens inside another attribute
    /// (nested `ForeignKey(...)` and `backref(...)` calls), which are never
    /// wrapped on their own.
    #[must_use]
    pub fn condensed(&self) -> String {
        let mut line = String::new();
        line.push_str(&self.tab);
        if let Some(name) = &self.name {
            line.push_str(name);
            line.push_str(" = ");
        }
        if let Some(callee) = &self.callee {
            line.push_str(callee);
        }
        line.push('(');
        line.push_str(&self.tokens().join(", "));
        line.push(')');
        if let Some(comment) = &self.comment {
            line.push_str("  # ");
            line.push_str(comment);
        }
        line
    }

    /// Renders the node, choosing condensed or wrapped form by width.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_padded(0)
    }

    /// Renders the node with an additional left pad charged against the
    /// first packed line of the wrapped form.
    ///
    /// The pad accounts for text the caller will prepend when embedding the
    /// node mid-line; it does not affect the condensed-form check.
    #[must_use]
    pub fn render_padded(&self, first_line_pad: usize) -> String {
        let condensed = self.condensed();
        if !self.extended && condensed.chars().count() < self.max_width {
            return condensed;
        }
        self.wrapped(first_line_pad)
    }

    /// All argument tokens: positional first, then `key=value` pairs.
    fn tokens(&self) -> Vec<String> {
        let mut tokens = self.args.clone();
        tokens.extend(self.kwargs.iter().map(|(k, v)| format!("{k}={v}")));
        tokens
    }

    /// The greedy bin-packed multi-line form.
    fn wrapped(&self, first_line_pad: usize) -> String {
        let mut out = String::new();
        out.push_str(&self.tab);
        if let Some(name) = &self.name {
            out.push_str(name);
            out.push_str(" = ");
        }
        if let Some(callee) = &self.callee {
            out.push_str(callee);
        }
        out.push('(');
        if let Some(comment) = &self.comment {
            out.push_str("  # ");
            out.push_str(comment);
        }
        out.push('\n');

        let prefix = format!("{}{}", self.tab, DEFAULT_INDENT);
        let prefix_width = prefix.chars().count();
        let mut line: Vec<String> = Vec::new();
        let mut line_width = 0usize;
        let mut first_line = true;

        for token in self.tokens() {
            let token_width = token.chars().count();
            let pad = if first_line { first_line_pad } else { 0 };
            // +2 per separator already in the line, +1 for the trailing comma
            let candidate = prefix_width + pad + line_width + sep_width(&line) + token_width + 1;
            if !line.is_empty() && candidate >= self.max_width {
                out.push_str(&prefix);
                out.push_str(&line.join(", "));
                out.push_str(",\n");
                first_line = false;
                line_width = token_width;
                line = vec![token];
            } else {
                line_width += token_width;
                line.push(token);
            }
        }
        if !line.is_empty() {
            out.push_str(&prefix);
            out.push_str(&line.join(", "));
            out.push('\n');
        }

        out.push_str(&self.tab);
        out.push(')');
        out
    }
}

/// Width of the `", "` separators a line with `n` existing tokens needs
/// when one more token is appended.
fn sep_width(line: &[String]) -> usize {
    line.len() * 2
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_call() {
        let attr = Attribute::named("test", "Test");
        assert!(attr.is_empty());
        assert_eq!(attr.to_string(), "test = Test()");
    }

    #[test]
    fn test_comment() {
        let mut attr = Attribute::named("test", "Test");
        attr.set_comment("pylint-test");
        assert_eq!(attr.to_string(), "test = Test()  # pylint-test");
    }

    #[test]
    fn test_args_kwargs_tab_and_comment() {
        let mut attr = Attribute::named("test", "Test");
        attr.push_arg("\"a\"");
        attr.push_arg("b");
        attr.push_arg("c");
        attr.push_kwarg("test", "\"value\"");
        attr.set_comment("pylint-test");
        attr.set_tab("    ");
        assert_eq!(
            attr.to_string(),
            "    test = Test(\"a\", b, c, test=\"value\")  # pylint-test"
        );
    }

    #[test]
    fn test_nameless_call() {
        assert_eq!(Attribute::call("Test").to_string(), "Test()");
    }

    #[test]
    fn test_empty_tuple_form() {
        assert_eq!(Attribute::tuple("args").to_string(), "args = ()");
    }

    #[test]
    fn test_tuple_form_with_args() {
        let mut attr = Attribute::tuple("args");
        attr.push_arg("1");
        attr.push_arg("2");
        assert_eq!(attr.to_string(), "args = (1, 2)");
    }

    #[test]
    fn test_condensed_kwarg_ordering() {
        let mut attr = Attribute::call("Column");
        attr.push_arg("INTEGER");
        attr.push_kwarg("nullable", "False");
        attr.push_kwarg("primary_key", "True");
        assert_eq!(
            attr.condensed(),
            "Column(INTEGER, nullable=False, primary_key=True)"
        );
    }

    #[test]
    fn test_wrap_on_width_overflow() {
        let mut attr = Attribute::named("x", "Call");
        for arg in ["aaaa", "bbbb", "cccc", "dddd"] {
            attr.push_arg(arg);
        }
        attr.push_kwarg("k", "val");
        attr.set_max_width(30);
        assert_eq!(
            attr.to_string(),
            "x = Call(\n    aaaa, bbbb, cccc, dddd,\n    k=val\n)"
        );
    }

    #[test]
    fn test_wrap_respects_first_line_pad() {
        let mut attr = Attribute::named("x", "Call");
        for arg in ["aaaa", "bbbb", "cccc", "dddd"] {
            attr.push_arg(arg);
        }
        attr.push_kwarg("k", "val");
        attr.set_max_width(30);
        assert_eq!(
            attr.render_padded(10),
            "x = Call(\n    aaaa, bbbb,\n    cccc, dddd, k=val\n)"
        );
    }

    #[test]
    fn test_wrap_never_exceeds_width_except_single_token() {
        let mut attr = Attribute::named("x", "Call");
        for arg in ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff", "gggg"] {
            attr.push_arg(arg);
        }
        attr.push_arg("a_single_token_longer_than_the_whole_width_limit");
        attr.set_max_width(24);
        let rendered = attr.to_string();
        for line in rendered.lines() {
            let width = line.chars().count();
            if width >= 24 {
                // only the oversized token may overflow, alone on its line
                assert!(line.contains("a_single_token_longer_than"), "line too wide: {line}");
                assert_eq!(line.matches(", ").count(), 0);
            }
        }
    }

    #[test]
    fn test_forced_extended() {
        let mut attr = Attribute::named("x", "Call");
        attr.push_arg("a");
        attr.set_extended();
        assert_eq!(attr.to_string(), "x = Call(\n    a\n)");
    }

    #[test]
    fn test_extended_comment_on_opening_line() {
        let mut attr = Attribute::named("x", "Call");
        attr.push_arg("a");
        attr.set_comment("note");
        attr.set_extended();
        assert_eq!(attr.to_string(), "x = Call(  # note\n    a\n)");
    }

    #[test]
    fn test_extended_with_tab() {
        let mut attr = Attribute::tuple("__table_args__");
        attr.push_arg("{'mysql_charset': 'utf8'}");
        attr.set_tab("    ");
        attr.set_extended();
        assert_eq!(
            attr.to_string(),
            "    __table_args__ = (\n        {'mysql_charset': 'utf8'}\n    )"
        );
    }

    #[test]
    fn test_condensed_below_width_stays_single_line() {
        let mut attr = Attribute::named("name", "Column");
        attr.push_arg("VARCHAR(45)");
        attr.push_kwarg("nullable", "False");
        let rendered = attr.to_string();
        assert!(!rendered.contains('\n'));
        assert_eq!(rendered, "name = Column(VARCHAR(45), nullable=False)");
    }
}
