//! Code Emitter
//!
//! Line-based writer for generated code. Keeps the current indentation so nested
//! fragments produced by different subsystems line up in the final output.

const INDENT_WITH: &str = "    ";

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            lines: vec![EmittedLine::new(0)],
            indent: 0,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map_or(true, |l| l.parts.is_empty())
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    /// Prints a multi-line fragment, re-indenting every line relative to the
    /// current indentation. Blank lines are dropped.
    pub fn print_block(&mut self, block: &str) {
        for line in block.lines() {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                continue;
            }
            let depth = leading_indent(trimmed);
            for _ in 0..depth {
                self.inc_indent();
            }
            self.println(trimmed.trim_start());
            for _ in 0..depth {
                self.dec_indent();
            }
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    /// Prints `open`, runs `body` one level deeper and prints `close`.
    pub fn block<F>(&mut self, open: &str, close: &str, body: F)
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.println(open);
        self.inc_indent();
        body(self);
        self.dec_indent();
        self.println(close);
    }

    pub fn to_source(&self) -> String {
        let mut lines: Vec<String> = self
            .lines
            .iter()
            .map(|l| {
                if l.parts.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", create_indent(l.indent), l.parts.join(""))
                }
            })
            .collect();
        while lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

fn create_indent(count: usize) -> String {
    INDENT_WITH.repeat(count)
}

fn leading_indent(line: &str) -> usize {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    spaces / INDENT_WITH.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_indent_nested_blocks() {
        let mut w = CodeWriter::new();
        w.block("if (a) {", "}", |w| {
            w.println("b();");
        });
        assert_eq!(w.to_source(), "if (a) {\n    b();\n}");
    }

    #[test]
    fn should_reindent_blocks_relative_to_current_indent() {
        let mut w = CodeWriter::new();
        w.block("function () {", "}", |w| {
            w.print_block("if (x) {\n    y();\n}\n");
        });
        assert_eq!(
            w.to_source(),
            "function () {\n    if (x) {\n        y();\n    }\n}"
        );
    }
}
