// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Mv command implementation.

use anyhow::Result;
use modmove_core::{RequireChange, find_dependents};
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use super::{CommandContext, absolute, scan_root};
use crate::cli::MvArgs;

/// Run the mv command.
pub async fn run(args: &MvArgs, ctx: &CommandContext) -> Result<()> {
    let from = absolute(&args.from)?;
    let to = absolute(&args.to)?;
    let mover = ctx.mover();

    if args.dry_run {
        let plan = mover.plan(&from, &to).await?;
        if !ctx.quiet {
            println!(
                "{} {} -> {}",
                "Would move".yellow(),
                args.from.display().cyan(),
                args.to.display().cyan()
            );
            print_changes(&plan.changes);
        }
        return Ok(());
    }

    let outcome = mover.move_file(&from, &to).await?;

    if !ctx.quiet {
        println!(
            "{} {} -> {}",
            "Moved".green(),
            args.from.display().cyan(),
            args.to.display().cyan()
        );
        print_changes(&outcome.changes);
    }

    if args.no_scan {
        return Ok(());
    }

    let root = scan_root(args.root.as_deref())?;
    debug!("Scanning {} for files requiring {}", root.display(), from.display());
    let stale = match find_dependents(mover.fs(), &root, &from).await {
        Ok(stale) => stale,
        Err(e) => {
            warn!("Dependents scan of {} failed: {}", root.display(), e);
            eprintln!(
                "{} could not scan {} for dependents: {}",
                "Warning:".yellow(),
                root.display(),
                e
            );
            return Ok(());
        }
    };

    if !stale.is_empty() {
        eprintln!(
            "{} {} file(s) still require the old location:",
            "Warning:".yellow(),
            stale.len()
        );
        for dependent in &stale {
            let file = dependent.file.strip_prefix(&root).unwrap_or(&dependent.file);
            eprintln!("  {} ({})", file.display(), dependent.specifier.dimmed());
        }
    }

    Ok(())
}

fn print_changes(changes: &[RequireChange]) {
    if changes.is_empty() {
        println!("  {}", "no relative requires changed".dimmed());
        return;
    }
    for change in changes {
        println!("  {} {} {}", change.from.red(), "->".dimmed(), change.to.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmove_core::Config;
    use std::path::Path;
    use tempfile::tempdir;

    fn context() -> CommandContext {
        CommandContext {
            config: Config::default(),
            quiet: true,
        }
    }

    fn args(root: &Path, dry_run: bool, no_scan: bool) -> MvArgs {
        MvArgs {
            from: root.join("lib/parse/a.js"),
            to: root.join("lib/a.js"),
            dry_run,
            root: Some(root.to_path_buf()),
            no_scan,
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lib/parse")).unwrap();
        std::fs::write(dir.path().join("lib/parse/a.js"), "require('./foo');\n").unwrap();
        std::fs::write(dir.path().join("index.js"), "require('./lib/parse/a');\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_dry_run_leaves_files_alone() {
        let dir = project();
        let root = dir.path();

        run(&args(root, true, false), &context()).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(root.join("lib/parse/a.js")).unwrap(),
            "require('./foo');\n"
        );
        assert!(!root.join("lib/a.js").exists());
    }

    #[tokio::test]
    async fn test_move_without_scan() {
        let dir = project();
        let root = dir.path();

        run(&args(root, false, true), &context()).await.unwrap();

        assert!(!root.join("lib/parse/a.js").exists());
        assert_eq!(
            std::fs::read_to_string(root.join("lib/a.js")).unwrap(),
            "require('./parse/foo');\n"
        );
    }

    #[tokio::test]
    async fn test_unreadable_file_does_not_fail_the_move() {
        let dir = project();
        let root = dir.path();
        std::fs::write(root.join("latin1.js"), [0x63, 0xff, 0xfe]).unwrap();

        run(&args(root, false, false), &context()).await.unwrap();

        assert!(root.join("lib/a.js").exists());
        assert!(!root.join("lib/parse/a.js").exists());
    }

    #[tokio::test]
    async fn test_missing_scan_root_is_a_warning() {
        let dir = project();
        let root = dir.path();
        let mut args = args(root, false, false);
        args.root = Some(root.join("missing"));

        run(&args, &context()).await.unwrap();

        assert!(root.join("lib/a.js").exists());
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        let dir = tempdir().unwrap();
        let err = run(&args(dir.path(), false, true), &context()).await.unwrap_err();
        assert!(err.to_string().contains("read"));
    }
}
