// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for modmove.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// modmove - move a CommonJS module and re-base its relative requires
#[derive(Parser, Debug)]
#[command(name = "modmove")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory name to skip when scanning (repeatable, replaces configured list)
    #[arg(long = "ignore-dir", value_name = "NAME", global = true)]
    pub ignore_dirs: Vec<String>,

    /// File extension to scan (repeatable, replaces configured list)
    #[arg(long = "ext", value_name = "EXT", global = true)]
    pub extensions: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move a file and rewrite its relative requires
    #[command(alias = "move")]
    Mv(MvArgs),

    /// List the files that require a module
    #[command(alias = "dependents")]
    Refs(RefsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MvArgs {
    /// File to move
    pub from: PathBuf,

    /// Destination path
    pub to: PathBuf,

    /// Show the rewritten requires without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Project root scanned for files still requiring the old path
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Skip the scan for files still requiring the old path
    #[arg(long)]
    pub no_scan: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RefsArgs {
    /// Module whose dependents are listed
    pub file: PathBuf,

    /// Project root to scan
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mv() {
        let cli = Cli::try_parse_from([
            "modmove", "mv", "lib/a.js", "a.js", "--dry-run", "--ext", "js", "--ext", "cjs",
        ])
        .unwrap();

        assert_eq!(cli.extensions, vec!["js", "cjs"]);
        match cli.command {
            Commands::Mv(args) => {
                assert_eq!(args.from, PathBuf::from("lib/a.js"));
                assert_eq!(args.to, PathBuf::from("a.js"));
                assert!(args.dry_run);
                assert!(!args.no_scan);
                assert_eq!(args.root, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_refs_alias() {
        let cli = Cli::try_parse_from(["modmove", "-q", "dependents", "lib/a.js", "--root", "src"])
            .unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Refs(RefsArgs { ref root, .. }) if root.as_deref() == Some(std::path::Path::new("src"))
        ));
    }

    #[test]
    fn test_mv_requires_two_paths() {
        assert!(Cli::try_parse_from(["modmove", "mv", "a.js"]).is_err());
    }
}
