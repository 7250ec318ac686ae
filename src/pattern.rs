//! Shell-style wildcard matching for leftover archive parts
//!
//! Supports `*`, `?`, `[...]` and `[!...]` with the semantics of POSIX
//! filename globbing, applied to a single file name. Names are matched as
//! raw bytes, so file names that are not valid UTF-8 still match the
//! wildcards.

use crate::error::{PostProcessError, Result};
use regex::bytes::{Regex, RegexBuilder};
use std::ffi::OsStr;
use std::path::Path;

/// Default leftover pattern: three-character extensions starting with r/R
/// (`.rar`, `.r00`, `.R01`, ... from old-style volume naming)
pub const DEFAULT_LEFTOVER_PATTERN: &str = "*.[rR]??";

/// Compiled wildcard pattern matched against directory entry names
#[derive(Clone, Debug)]
pub struct LeftoverPattern {
    source: String,
    regex: Regex,
}

impl LeftoverPattern {
    /// Compile a wildcard pattern
    ///
    /// The pattern must name entries within one directory, so path
    /// separators are rejected.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| PostProcessError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty".to_string()).into());
        }
        if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
            return Err(invalid("pattern must not contain a path separator".to_string()).into());
        }

        let regex = compile(pattern).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was configured
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check a bare file name against the pattern
    ///
    /// Hidden names (leading `.`) only match when the pattern itself starts
    /// with a dot, as in shell globbing.
    pub fn matches_name(&self, name: &str) -> bool {
        self.matches_bytes(name.as_bytes())
    }

    /// Check the final component of a path against the pattern
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|n| self.matches_bytes(OsStr::as_encoded_bytes(n)))
    }

    fn matches_bytes(&self, name: &[u8]) -> bool {
        if name.starts_with(b".") && !self.source.starts_with('.') {
            return false;
        }
        self.regex.is_match(name)
    }
}

impl Default for LeftoverPattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_LEFTOVER_PATTERN.to_string(),
            regex: compile(DEFAULT_LEFTOVER_PATTERN)
                .unwrap_or_else(|_| unreachable!("default pattern compiles")),
        }
    }
}

impl std::fmt::Display for LeftoverPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compiled size cap; wildcards are short, anything larger is a mistake
const REGEX_SIZE_LIMIT: usize = 1 << 20;

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(&translate(pattern))
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

/// A byte outside valid UTF-8, standing in for one character of a
/// non-UTF-8 name
const RAW_BYTE: &str = r"(?-u:[\x80-\xFF])";

/// Translate a wildcard pattern into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("(?s)^");
    let mut buf = [0u8; 4];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str("(?-u:.)*");
            }
            '?' => {
                out.push_str("(?:.|");
                out.push_str(RAW_BYTE);
                out.push(')');
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                // Unterminated bracket is a literal '['
                None => out.push_str(r"\["),
            },
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }

    out.push('$');
    out
}

/// Find the index of the `]` closing a class whose body starts at `start`
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    // A leading ']' is part of the set
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn translate_class(body: &[char]) -> String {
    let mut class = String::from("[");
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => {
            class.push('^');
            (true, rest)
        }
        _ => (false, body),
    };
    for &b in body {
        if matches!(b, '\\' | '[' | ']' | '^' | '&' | '~') {
            class.push('\\');
        }
        class.push(b);
    }
    class.push(']');

    // A raw byte is never a member of a written set, so it can only match
    // through negation
    if negated {
        format!("(?:{class}|{RAW_BYTE})")
    } else {
        class
    }
}
