//! Path and glob-string utilities.
//!
//! Every path that flows through the resolver is carried as a posix-separated
//! `String`. Glob patterns use the user-facing syntax (`*`, `**`, `?`,
//! `[...]`, `\[` / `\]` for literal brackets) until they are compiled with
//! [`compile`], which translates them into the `glob` crate's dialect.

use glob::{MatchOptions, Pattern};
use std::path::Path;

/// Options used for every glob match.
///
/// `*` never crosses a separator, matching is case-sensitive and wildcards
/// match dot-files.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Convert backslash separators to `/`, keeping `\[` and `\]` escapes intact.
pub fn to_posix(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('[') | Some(']') => out.push('\\'),
                _ => out.push('/'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Render a filesystem path as a posix string.
pub fn path_to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Split a drive (`C:`) or root (`/`) prefix from a posix path.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = &path[2..];
        if rest.starts_with('/') {
            return (&path[..3], &path[3..]);
        }
        return (&path[..2], rest);
    }
    if path.starts_with('/') {
        return ("/", &path[1..]);
    }
    ("", path)
}

/// Whether a posix path is absolute (`/x` or `C:/x`).
pub fn is_absolute(path: &str) -> bool {
    let (root, _) = split_root(path);
    root.ends_with('/')
}

/// Lexically normalize a path: convert separators, collapse repeated `/`,
/// drop `.` segments and resolve `..` without touching the filesystem.
///
/// Relative paths that normalize to nothing become `""`.
pub fn normalize(path: &str) -> String {
    let path = to_posix(path);
    let (root, rest) = split_root(&path);
    let absolute = root.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push(segment);
                }
            }
            _ => segments.push(segment),
        }
    }

    format!("{}{}", root, segments.join("/"))
}

/// Join `path` onto `root` unless it is already absolute, then normalize.
pub fn resolve(root: &str, path: &str) -> String {
    let path = to_posix(path);
    if is_absolute(&path) {
        normalize(&path)
    } else {
        normalize(&format!("{}/{}", root, path))
    }
}

/// The part of `path` below `base`, or `None` when `path` is not inside it.
///
/// `path == base` yields `Some("")`.
pub fn relative_to<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    let base = base.trim_end_matches('/');
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("")
    } else if base.is_empty() || base.ends_with(':') {
        Some(rest.trim_start_matches('/'))
    } else {
        rest.strip_prefix('/')
    }
}

/// Whether `path` is `root` itself or lies below it.
pub fn is_within(root: &str, path: &str) -> bool {
    relative_to(root, path).is_some()
}

/// ASCII-only lowercase copy used as a lookup key.
pub fn key(value: &str) -> String {
    value.to_ascii_lowercase()
}

/// Whether a pattern contains an unescaped wildcard (`*`, `?` or `[`).
///
/// The one-character classes `[*]` and `[?]` written by [`escape`] are
/// literals, not wildcards.
pub fn has_magic(pattern: &str) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some('[') | Some(']')) => i += 2,
            '[' if is_literal_class(&chars[i..]) => i += 3,
            '*' | '?' | '[' => return true,
            _ => i += 1,
        }
    }
    false
}

/// `[*]` or `[?]` at the start of `chars`.
fn is_literal_class(chars: &[char]) -> bool {
    matches!(chars, ['[', '*' | '?', ']', ..])
}

/// Reverse [`escape`] on a literal segment: `\[`, `\]`, `[*]` and `[?]`
/// become the characters they stand for.
pub fn unescape(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some('[') | Some(']')) => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '[' if is_literal_class(&chars[i..]) => {
                out.push(chars[i + 1]);
                i += 3;
            }
            ch => {
                out.push(ch);
                i += 1;
            }
        }
    }
    out
}

/// Escape a literal path so it can be used as the prefix of a pattern.
pub fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        match ch {
            '[' => out.push_str("\\["),
            ']' => out.push_str("\\]"),
            '*' => out.push_str("[*]"),
            '?' => out.push_str("[?]"),
            _ => out.push(ch),
        }
    }
    out
}

/// The longest wildcard-free directory prefix of an absolute pattern.
///
/// `"/p/source/**/*.brs"` yields `"/p/source"`. A pattern without any
/// wildcard yields its parent directory.
pub fn literal_prefix(pattern: &str) -> String {
    let (root, rest) = split_root(pattern);
    let segments: Vec<&str> = rest.split('/').collect();
    let fixed = segments
        .iter()
        .position(|segment| has_magic(segment))
        .unwrap_or(segments.len().saturating_sub(1));
    let literal: Vec<String> = segments[..fixed].iter().map(|s| unescape(s)).collect();
    format!("{}{}", root, literal.join("/"))
}

/// Translate user-facing glob syntax into the `glob` crate's dialect.
///
/// `\[` and `\]` become the one-character classes `[[]` and `[]]`;
/// `[^...]` becomes `[!...]`.
pub fn to_glob_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if matches!(chars.peek(), Some('[') | Some(']')) => {
                let escaped = chars.next().unwrap_or_default();
                out.push('[');
                out.push(escaped);
                out.push(']');
            }
            '[' if chars.peek() == Some(&'^') => {
                chars.next();
                out.push_str("[!");
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Compile a user-facing glob into a matcher.
pub fn compile(pattern: &str) -> std::result::Result<Pattern, glob::PatternError> {
    Pattern::new(&to_glob_syntax(pattern))
}

/// Match a posix path against a compiled pattern with [`MATCH_OPTIONS`].
pub fn glob_match(pattern: &Pattern, path: &str) -> bool {
    pattern.matches_with(path, MATCH_OPTIONS)
}
