//! Clap CLI definition for the `cpt` binary.
//!
//! A single flat [`Cli`] struct rather than subcommands: CPT has one
//! behavior — generate-and-report — parameterized by flags, not a family of
//! distinct subcommands (§6.2).
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the per-file metrics report.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tabular output (default).
    #[default]
    Human,
    /// A single JSON object per file on stdout.
    Json,
}

/// Generate CPT test paths for one SUT file or a directory of them.
#[derive(Parser, Debug)]
#[command(name = "cpt", version, about)]
pub struct Cli {
    /// A single SUT file to process.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// A directory of `*.txt` SUT files to process in batch.
    #[arg(long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Tee stdout/stderr into this file in addition to the console.
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Print every generated path alongside the metrics report.
    #[arg(long = "show-path", alias = "showpath")]
    pub show_path: bool,

    /// Export the graph as a Graphviz DOT file.
    #[arg(long = "to-dot", alias = "todot", value_name = "PATH")]
    pub to_dot: Option<PathBuf>,

    /// Export the graph as a PNG (requires a local `dot` binary).
    #[arg(long = "to-png", alias = "topng", value_name = "PATH")]
    pub to_png: Option<PathBuf>,

    /// Write per-case metrics as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Output format for the per-file report.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Rewrites legacy single-dash long flags (`-file`, `-showpath`, …) into
/// clap's expected double-dash form (`--file`, `--show-path`) before
/// parsing, so both spellings are accepted the way the reference tool's own
/// flag style does.
pub fn normalize_args(args: impl Iterator<Item = String>) -> Vec<String> {
    const KNOWN: &[(&str, &str)] = &[
        ("-file", "--file"),
        ("-dir", "--dir"),
        ("-log", "--log"),
        ("-showpath", "--show-path"),
        ("-todot", "--to-dot"),
        ("-topng", "--to-png"),
        ("-csv", "--csv"),
        ("-format", "--format"),
    ];

    args.map(|arg| {
        KNOWN
            .iter()
            .find(|(short, _)| *short == arg)
            .map(|(_, long)| (*long).to_owned())
            .unwrap_or(arg)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn normalize_args_rewrites_legacy_single_dash_flags() {
        let raw = vec!["cpt".to_owned(), "-file".to_owned(), "sut.txt".to_owned(), "-showpath".to_owned()];
        let normalized = normalize_args(raw.into_iter());
        assert_eq!(normalized, vec!["cpt", "--file", "sut.txt", "--show-path"]);
    }

    #[test]
    fn normalize_args_leaves_double_dash_flags_untouched() {
        let raw = vec!["cpt".to_owned(), "--file".to_owned(), "sut.txt".to_owned()];
        let normalized = normalize_args(raw.clone().into_iter());
        assert_eq!(normalized, raw);
    }

    #[test]
    fn parses_file_and_show_path() {
        let cli = Cli::parse_from(["cpt", "--file", "sut.txt", "--show-path"]);
        assert_eq!(cli.file, Some(PathBuf::from("sut.txt")));
        assert!(cli.show_path);
        assert_eq!(cli.format, OutputFormat::Human);
    }
}
