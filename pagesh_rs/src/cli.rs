//! CLI entry point for the `pagesh` binary.
//!
//! Flag handling, config merging, and all filesystem I/O live here; the
//! transform itself is [`crate::assembler::assemble`]. Validation runs
//! before the output write, so a failing build never clobbers an
//! existing artifact.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::assembler;
use crate::config::PageshConfig;
use crate::progress;

#[derive(Parser, Debug)]
#[command(name = "pagesh")]
#[command(about = "Assemble a landing page and an installer into one polyglot file")]
#[command(
    after_help = "The output renders as the page in a browser and runs as the\n\
                  installer when piped through sh. Missing inputs fall back to\n\
                  `pagesh.toml` in the current (or --config) directory."
)]
#[command(version)]
pub struct Cli {
    /// Built HTML document (the landing page)
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Installer shell script to embed
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Output path [default: the HTML path, overwritten in place]
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Fixed heredoc delimiter [default: content-derived token]
    #[arg(long)]
    pub sentinel: Option<String>,

    /// Directory containing pagesh.toml, or the file itself
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Detailed progress on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Run the build with the given options. This is the shared main() body.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let html_path = cli
        .html
        .clone()
        .or(config.html)
        .context("no HTML input: pass --html or set `html` in pagesh.toml")?;
    let script_path = cli
        .script
        .clone()
        .or(config.script)
        .context("no script input: pass --script or set `script` in pagesh.toml")?;
    let out_path = cli
        .out
        .clone()
        .or(config.out)
        .unwrap_or_else(|| html_path.clone());
    let sentinel = cli.sentinel.as_deref().or(config.sentinel.as_deref());

    if cli.verbose {
        eprintln!("[pagesh] html:   {}", html_path.display());
        eprintln!("[pagesh] script: {}", script_path.display());
        eprintln!("[pagesh] out:    {}", out_path.display());
    }

    let html = fs::read_to_string(&html_path)
        .with_context(|| format!("failed to read HTML from {}", html_path.display()))?;
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script from {}", script_path.display()))?;

    let assembly = assembler::assemble(&html, &script, sentinel)
        .with_context(|| format!("cannot assemble {}", out_path.display()))?;

    for line in &assembly.comment_hazards {
        progress::warning(&format!(
            "script line {line} contains \"-->\": the embedded installer would become visible in the browser"
        ));
    }

    if cli.verbose {
        eprintln!("[pagesh] delimiter: {}", assembly.delimiter);
    }

    fs::write(&out_path, assembly.text.as_bytes())
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    progress::success(&format!(
        "polyglot written to {} ({} bytes)",
        out_path.display(),
        assembly.text.len()
    ));
    progress::hint("curl <url> | sh   → runs installer");
    progress::hint("open <url>        → shows landing page");

    Ok(())
}

fn load_config(arg: Option<&Path>) -> Result<PageshConfig> {
    match arg {
        Some(path) if path.is_dir() => Ok(PageshConfig::load(path)),
        Some(path) if path.is_file() => Ok(PageshConfig::load_from_path(path)),
        Some(path) => bail!("--config {}: no such file or directory", path.display()),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(PageshConfig::load(&cwd))
        }
    }
}
