//! Indentation-aware method body text

const DEFAULT_INDENT: usize = 4;

/// Accumulates the body of a method or constructor line by line
///
/// Lines are indented relative to the body itself; the emitter adds the
/// member's own indentation.
#[derive(Debug, Clone)]
pub struct InvocableMemberBodyBuilder {
    output: String,
    level: usize,
    width: usize,
}

impl Default for InvocableMemberBodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocableMemberBodyBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent_width(DEFAULT_INDENT)
    }

    #[must_use]
    pub fn with_indent_width(width: usize) -> Self {
        Self {
            output: String::new(),
            level: 0,
            width,
        }
    }

    /// Append one indented line
    pub fn append_formal_line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.output
            .extend(std::iter::repeat(' ').take(self.level * self.width));
        self.output.push_str(line.as_ref());
        self.output.push('\n');
        self
    }

    /// Append already formatted lines, shifting each to the current level
    pub fn append_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.is_empty() {
                self.new_line();
            } else {
                self.append_formal_line(line);
            }
        }
        self
    }

    /// Empty line
    pub fn new_line(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn indent_remove(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.output.clear();
        self.level = 0;
        self
    }

    #[inline]
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_block() {
        let mut body = InvocableMemberBodyBuilder::new();
        body.append_formal_line("if (obj == null) {")
            .indent()
            .append_formal_line("return null;")
            .indent_remove()
            .append_formal_line("}");
        assert_eq!(body.output(), "if (obj == null) {\n    return null;\n}\n");
    }

    #[test]
    fn appended_lines_follow_the_current_level() {
        let mut body = InvocableMemberBodyBuilder::new();
        body.indent().append_lines("int a = 1;\nif (a > 0) {\n    a = 0;\n}\n");
        assert_eq!(body.output(), "    int a = 1;\n    if (a > 0) {\n        a = 0;\n    }\n");
    }

    #[test]
    fn indent_remove_saturates() {
        let mut body = InvocableMemberBodyBuilder::with_indent_width(2);
        body.indent_remove().indent().append_formal_line("x;");
        assert_eq!(body.output(), "  x;\n");
        body.reset();
        assert!(body.output().is_empty());
    }
}
