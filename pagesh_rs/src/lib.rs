//! # pagesh
//!
//! **Polyglot page assembler** - post-build step that turns a finished
//! landing page and a finished installer script into a single file that
//! works in both worlds:
//!
//! ```bash
//! curl https://pagesh.dev | sh    # runs the installer
//! open https://pagesh.dev         # renders the landing page
//! ```
//!
//! The trick: the output starts with `#!/bin/sh` and a no-op heredoc
//! that makes the shell skip the entire HTML document as data, while the
//! page's final `</html>` is rewritten to `</html><!--` so the browser
//! never renders a byte of the embedded script.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use pagesh::assembler;
//!
//! let html = "<html><body>hi</body></html>";
//! let script = "#!/bin/bash\necho ok";
//!
//! let assembly = assembler::assemble(html, script, None).unwrap();
//! assert!(assembly.text.starts_with("#!/bin/sh\n"));
//! assert!(assembly.text.contains("</html><!--"));
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! pagesh --html dist/index.html --script public/install.sh
//! pagesh --out dist/get.html --sentinel SITE_EOF
//! pagesh -c site/pagesh.toml
//! ```
//!
//! Construction fails (and writes nothing) on malformed inputs: an HTML
//! document without `</html>`, an empty input, or a heredoc delimiter
//! colliding with a literal line in either input.

/// Polyglot construction.
///
/// [`assemble`](assembler::assemble) is the core transform; it is pure
/// and does no I/O. See [`AssembleError`](assembler::AssembleError) for
/// the failure taxonomy.
pub mod assembler;

/// CLI argument parsing and the build entry point (file I/O lives here).
pub mod cli;

/// Optional `pagesh.toml` support.
pub mod config;

/// Terminal status messages.
pub mod progress;

/// Heredoc delimiter derivation and collision detection.
pub mod sentinel;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// The assembled polyglot plus metadata.
pub use assembler::Assembly;

/// Why construction failed.
pub use assembler::AssembleError;

/// The core transform.
pub use assembler::assemble;

/// Build configuration loaded from `pagesh.toml`.
pub use config::PageshConfig;
