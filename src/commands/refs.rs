// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Refs command implementation.

use anyhow::Result;
use modmove_core::find_dependents;
use owo_colors::OwoColorize;

use super::{CommandContext, absolute, scan_root};
use crate::cli::RefsArgs;

/// Run the refs command.
pub async fn run(args: &RefsArgs, ctx: &CommandContext) -> Result<()> {
    let target = absolute(&args.file)?;
    let root = scan_root(args.root.as_deref())?;

    let dependents = find_dependents(&ctx.filesystem(), &root, &target).await?;

    if dependents.is_empty() {
        if !ctx.quiet {
            println!("{}", "No files require this module.".dimmed());
        }
        return Ok(());
    }

    for dependent in &dependents {
        let file = dependent.file.strip_prefix(&root).unwrap_or(&dependent.file);
        if ctx.quiet {
            println!("{}", file.display());
        } else {
            println!("{} {}", file.display().cyan(), dependent.specifier.dimmed());
        }
    }

    Ok(())
}
