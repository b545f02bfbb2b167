//! Heredoc delimiter strategy.
//!
//! The delimiter marks where the embedded HTML ends inside the output's
//! no-op heredoc. The shell closes a heredoc on an *exact* line match, so
//! the token must never occur as a standalone line in the embedded page.
//! The default strategy derives the token from the inputs themselves: same
//! inputs produce the same token, so assembly stays deterministic, and the
//! 48-bit hash suffix makes an accidental match in real content a
//! non-event. Collision detection in the assembler stays mandatory either
//! way, because callers may supply a fixed token of their own.

use std::fmt::Write as _;

use sha2::{Digest, Sha256};

/// Prefix for content-derived delimiters.
pub const SENTINEL_PREFIX: &str = "PAGESH_EOF_";

/// Number of digest bytes rendered into the token (12 hex chars).
const DIGEST_BYTES: usize = 6;

/// Derive a heredoc delimiter from the two inputs.
///
/// Deterministic: the same HTML and script always yield the same token.
/// A NUL separator keeps `("ab", "c")` and `("a", "bc")` distinct.
pub fn derive(html: &str, script: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hasher.update([0u8]);
    hasher.update(script.as_bytes());
    let digest = hasher.finalize();

    let mut token = String::with_capacity(SENTINEL_PREFIX.len() + DIGEST_BYTES * 2);
    token.push_str(SENTINEL_PREFIX);
    for byte in &digest[..DIGEST_BYTES] {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

/// True if `delimiter` occurs as an exact line in `text`.
///
/// Mirrors the shell's heredoc termination rule: the terminator must match
/// the whole line, unindented, with no trailing characters. We emit
/// `<<\DELIM` (not `<<-`), so leading tabs do not get stripped and an
/// indented occurrence is harmless.
pub fn collides(delimiter: &str, text: &str) -> bool {
    text.lines().any(|line| line == delimiter)
}

/// Basic sanity for caller-supplied delimiters: non-empty, single line,
/// no whitespace (a space would split the token at the `<<` redirection).
pub fn is_valid_token(delimiter: &str) -> bool {
    !delimiter.is_empty() && !delimiter.chars().any(|c| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let a = derive("<html></html>", "echo ok");
        let b = derive("<html></html>", "echo ok");
        assert_eq!(a, b);
    }

    #[test]
    fn derive_depends_on_both_inputs() {
        let base = derive("<html></html>", "echo ok");
        assert_ne!(base, derive("<html></html>", "echo no"));
        assert_ne!(base, derive("<html> </html>", "echo ok"));
    }

    #[test]
    fn derive_separates_input_boundary() {
        // Moving bytes across the html/script boundary must change the token.
        assert_ne!(derive("ab", "c"), derive("a", "bc"));
    }

    #[test]
    fn derived_token_shape() {
        let token = derive("<html></html>", "echo ok");
        assert!(token.starts_with(SENTINEL_PREFIX));
        let suffix = &token[SENTINEL_PREFIX.len()..];
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(is_valid_token(&token));
    }

    #[test]
    fn collides_requires_exact_line() {
        assert!(collides("EOF", "line one\nEOF\nline two"));
        assert!(collides("EOF", "EOF"));
        assert!(!collides("EOF", "line EOF line"));
        assert!(!collides("EOF", "  EOF"));
        assert!(!collides("EOF", "EOF  "));
        assert!(!collides("EOF", "EOFX"));
    }

    #[test]
    fn token_validity() {
        assert!(is_valid_token("PAGESH_EOF_0011aabbccdd"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("HAS SPACE"));
        assert!(!is_valid_token("HAS\nNEWLINE"));
        assert!(!is_valid_token("HAS\tTAB"));
    }
}
