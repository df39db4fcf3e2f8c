//! Line-oriented checker used by the in-memory session.
//!
//! Unbalanced brackets are a hard failure; style findings are reported as
//! `line N: message` diagnostics.

use crate::kernel::services::ports::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    pub max_line_length: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            max_line_length: 88,
        }
    }
}

pub fn check_source(text: &str, options: LintOptions) -> Result<Vec<String>, EngineError> {
    check_brackets(text)?;

    let mut diagnostics = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.ends_with([' ', '\t']) {
            diagnostics.push(format!("line {line_no}: trailing whitespace"));
        }
        if line.starts_with('\t') {
            diagnostics.push(format!("line {line_no}: indentation contains tabs"));
        }
        let width = line.chars().count();
        if width > options.max_line_length {
            diagnostics.push(format!(
                "line {line_no}: line too long ({width} > {})",
                options.max_line_length
            ));
        }
    }
    Ok(diagnostics)
}

fn check_brackets(text: &str) -> Result<(), EngineError> {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for ch in line.chars() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
                continue;
            }

            match ch {
                '#' => break,
                '\'' | '"' => quote = Some(ch),
                '(' | '[' | '{' => stack.push((ch, line_no)),
                ')' | ']' | '}' => {
                    let expected = match ch {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, open_line)) => {
                            return Err(EngineError::new(format!(
                                "SyntaxError: line {line_no}: '{ch}' does not match '{open}' on line {open_line}"
                            )));
                        }
                        None => {
                            return Err(EngineError::new(format!(
                                "SyntaxError: line {line_no}: unmatched '{ch}'"
                            )));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    match stack.first() {
        Some((open, line_no)) => Err(EngineError::new(format!(
            "SyntaxError: line {line_no}: '{open}' was never closed"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/lint.rs"]
mod tests;
