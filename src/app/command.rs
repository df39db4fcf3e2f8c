//! Line commands understood by the interactive shell.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Open(String),
    New(Option<String>),
    Remove(String),
    Rename { from: String, to: String },
    Set(String),
    Append(String),
    Show,
    Check,
    Share,
    Url,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

pub const HELP: &str = "\
ls                 list files (* marks the active one)
open NAME          select a file
new [NAME]         add a file (default: next free fileN.py)
rm NAME            remove a file
mv OLD NEW         rename a file
set TEXT           replace the active file (\\n and \\t escapes)
append TEXT        append a line to the active file
cat                print the active file
check              analyse the active file now
share              upload the workspace and copy its link
url                print the current page address
quit               exit";

impl ShellCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "ls",
            Self::Open(_) => "open",
            Self::New(_) => "new",
            Self::Remove(_) => "rm",
            Self::Rename { .. } => "mv",
            Self::Set(_) => "set",
            Self::Append(_) => "append",
            Self::Show => "cat",
            Self::Check => "check",
            Self::Share => "share",
            Self::Url => "url",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// Parses one input line; blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let cmd = match head {
            "ls" => Self::List,
            "open" => Self::Open(required(rest, "open", "NAME")?),
            "new" => Self::New(optional(rest)),
            "rm" => Self::Remove(required(rest, "rm", "NAME")?),
            "mv" => {
                let mut parts = rest.split_whitespace();
                let from = parts.next().ok_or(CommandError::MissingArgument {
                    command: "mv",
                    argument: "OLD",
                })?;
                let to = parts.next().ok_or(CommandError::MissingArgument {
                    command: "mv",
                    argument: "NEW",
                })?;
                Self::Rename {
                    from: from.to_string(),
                    to: to.to_string(),
                }
            }
            // Text arguments keep their inner whitespace; only the separator is dropped.
            "set" => Self::Set(unescape(rest)),
            "append" => Self::Append(unescape(rest)),
            "cat" => Self::Show,
            "check" => Self::Check,
            "share" => Self::Share,
            "url" => Self::Url,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn optional(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

fn required(
    rest: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    optional(rest).ok_or(CommandError::MissingArgument { command, argument })
}

/// Expands `\n`, `\t` and `\\`; other escapes are kept verbatim.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/app/command.rs"]
mod tests;
