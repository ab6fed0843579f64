use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::Value;

use super::super::args::GenerateCommand;
use super::super::scan::collect_state_files;
use super::{CommandResult, CommandSummary, GenerateSummary};
use crate::{
    config::load_config,
    core::{
        ControlScope, NegativeControl, PlatformCatalogs, ResourceCatalog, TerraformStateParser,
        TracingDiagnostics,
    },
    generator,
    render::{Render, Renderer},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let loaded = load_config(&cwd)?;

    let catalog_path = cmd.catalog.clone().unwrap_or_else(|| loaded.catalog_path());
    let mut platforms = if cmd.platforms.is_empty() {
        loaded.config.platforms.clone()
    } else {
        cmd.platforms.clone()
    };
    let mut seen = HashSet::new();
    platforms.retain(|platform| seen.insert(platform.clone()));
    let format = cmd.format.unwrap_or(loaded.config.format);

    let catalogs = PlatformCatalogs::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog: {}", catalog_path.display()))?;
    let targets = platforms
        .iter()
        .map(|platform| catalogs.require(platform).map(|c| (platform.as_str(), c)))
        .collect::<Result<Vec<_>, _>>()?;

    let files = collect_state_files(&cmd.paths, &loaded.config.ignores)?;
    if files.is_empty() {
        bail!("No state files found");
    }

    // One job per file; rayon keeps the collected order.
    let controls: Vec<NegativeControl> = files
        .par_iter()
        .map(|file| generate_file(file, &targets))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    let rendered = Renderer::from(format).render(&controls)?;
    match &cmd.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => print!("{}", rendered),
    }

    let unmatched_count = controls
        .iter()
        .filter(|c| c.scope == ControlScope::Unmatched)
        .count();

    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            state_files: files.len(),
            platforms,
            unmatched_count,
            matched_count: controls.len() - unmatched_count,
            output: cmd.output,
        }),
    })
}

/// Parse one state file and generate its controls for every target platform,
/// in platform order.
fn generate_file(
    path: &Path,
    targets: &[(&str, &ResourceCatalog)],
) -> Result<Vec<NegativeControl>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let snapshot: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

    let source_label = fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();

    let mut controls = Vec::new();
    for (platform, catalog) in targets {
        let span = tracing::warn_span!("generate", source = %source_label, platform);
        let _enter = span.enter();

        controls.extend(
            generator::generate(
                &snapshot,
                &TerraformStateParser,
                catalog,
                platform,
                &source_label,
                &TracingDiagnostics,
            )
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?,
        );
    }
    Ok(controls)
}
