//! Polyglot assembly: one byte stream, two parsers.
//!
//! The output file has to satisfy a browser and a POSIX shell at the same
//! time:
//!
//! - A shell reads line 1 (`#!/bin/sh`), then a no-op heredoc
//!   (`<<\DELIM`) that swallows the entire HTML document as inert data,
//!   then the installer body as ordinary statements.
//! - A browser parses the HTML as-is; the final `</html>` has been
//!   rewritten to `</html><!--`, so everything after it (the heredoc
//!   terminator and the whole installer) sits inside a trailing comment
//!   and never renders. The shebang and heredoc opener before the HTML
//!   are absorbed as stray text by quirks parsing.
//!
//! `assemble` is a pure transform: it validates, builds the full output
//! in memory, and leaves all I/O to the caller. Either the result is a
//! correct polyglot or an error comes back and nothing gets written.

use thiserror::Error;

use crate::sentinel;

/// The interpreter line the output carries, regardless of what the input
/// script declared.
pub const SHELL_SHEBANG: &str = "#!/bin/sh";

const CLOSING_TAG: &str = "</html>";

/// Which input a delimiter collision was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Html,
    Script,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Html => write!(f, "HTML"),
            InputKind::Script => write!(f, "script"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("HTML input is empty")]
    EmptyHtml,

    #[error("script input is empty (or contains only a #! line)")]
    EmptyScript,

    #[error("HTML input has no closing </html> tag to anchor the trailing comment")]
    MissingAnchor,

    #[error("HTML input starts with `#!` - it looks like an already-assembled polyglot")]
    AlreadyAssembled,

    #[error("heredoc delimiter `{delimiter}` occurs as a line in the {input} input")]
    DelimiterCollision {
        delimiter: String,
        input: InputKind,
    },

    #[error("invalid heredoc delimiter `{0}`: must be a single non-empty token without whitespace")]
    InvalidDelimiter(String),
}

/// A successfully assembled polyglot.
#[derive(Debug)]
pub struct Assembly {
    /// The full output byte stream.
    pub text: String,
    /// Delimiter used for the heredoc (derived or caller-supplied).
    pub delimiter: String,
    /// 1-based lines of the embedded script body containing `-->`.
    ///
    /// Such a line closes the trailing HTML comment early and leaks the
    /// rest of the script into the rendered page. The shell side still
    /// works, so this is reported rather than fatal.
    pub comment_hazards: Vec<usize>,
}

/// Drop the `#!` interpreter line from a script, if present.
///
/// Only a genuine directive is stripped; a script starting with a plain
/// comment or a command passes through untouched.
pub fn strip_shebang(script: &str) -> &str {
    if !script.starts_with("#!") {
        return script;
    }
    match script.find('\n') {
        Some(idx) => &script[idx + 1..],
        None => "",
    }
}

/// Build the polyglot document from a finished HTML page and a finished
/// shell script.
///
/// `sentinel` overrides the content-derived heredoc delimiter; pass
/// `None` for the default strategy. The transform never touches the
/// filesystem.
pub fn assemble(
    html: &str,
    script: &str,
    sentinel_override: Option<&str>,
) -> Result<Assembly, AssembleError> {
    if html.is_empty() {
        return Err(AssembleError::EmptyHtml);
    }
    if script.is_empty() {
        return Err(AssembleError::EmptyScript);
    }
    // Feeding yesterday's output back in would nest heredocs and break
    // both consumers. The caller must supply freshly built HTML.
    if html.starts_with("#!") {
        return Err(AssembleError::AlreadyAssembled);
    }

    let body = strip_shebang(script);
    if body.trim().is_empty() {
        return Err(AssembleError::EmptyScript);
    }

    // Anchor on the *last* closing tag: an earlier </html> may appear in
    // documentation markup or inline code samples within the page.
    let anchor = html.rfind(CLOSING_TAG).ok_or(AssembleError::MissingAnchor)?;

    let delimiter = match sentinel_override {
        Some(token) => {
            if !sentinel::is_valid_token(token) {
                return Err(AssembleError::InvalidDelimiter(token.to_string()));
            }
            token.to_string()
        }
        None => sentinel::derive(html, script),
    };

    // The heredoc body is the (rewritten) HTML; a matching line there
    // truncates the page and executes its tail as shell. A matching line
    // in the script body would be swallowed if the earlier check missed,
    // so both are refused outright.
    if sentinel::collides(&delimiter, html) {
        return Err(AssembleError::DelimiterCollision {
            delimiter,
            input: InputKind::Html,
        });
    }
    if sentinel::collides(&delimiter, body) {
        return Err(AssembleError::DelimiterCollision {
            delimiter,
            input: InputKind::Script,
        });
    }

    let (before, after) = html.split_at(anchor);
    let after_tag = &after[CLOSING_TAG.len()..];

    let mut text = String::with_capacity(html.len() + body.len() + delimiter.len() + 64);
    text.push_str(SHELL_SHEBANG);
    text.push('\n');
    // `<<\DELIM` quotes the delimiter, so nothing inside the HTML body is
    // subject to expansion ($, backticks) while the shell skips it.
    text.push_str("<<\\");
    text.push_str(&delimiter);
    text.push('\n');
    text.push_str(before);
    text.push_str(CLOSING_TAG);
    text.push_str("<!--");
    text.push_str(after_tag);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&delimiter);
    text.push('\n');
    text.push('\n');
    text.push_str(body);
    if !text.ends_with('\n') {
        text.push('\n');
    }

    let comment_hazards = body
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains("-->"))
        .map(|(idx, _)| idx + 1)
        .collect();

    Ok(Assembly {
        text,
        delimiter,
        comment_hazards,
    })
}
