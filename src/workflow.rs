//! End-to-end conversion: parse, normalize, rewrite, materialize.
use crate::assets::{copy_assets, AssetDir};
use crate::names::{normalize_names, NameMapping};
use crate::program::Program;
use crate::staging;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Program file name in both the input and output directory.
pub const PROGRAM_FILE: &str = "program.txt";
/// Extension of every asset file.
pub const ASSET_EXTENSION: &str = "bmp";

/// Result of parsing and renaming, before anything is written.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub program: Program,
    pub mapping: NameMapping,
    pub converted: Program,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub effect_count: usize,
    pub asset_count: usize,
    pub renamed_count: usize,
    pub mapping: NameMapping,
}

impl ConversionReport {
    fn new(plan: ConversionPlan, input_dir: &Path, output_dir: Option<&Path>) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.map(Path::to_path_buf),
            dry_run: output_dir.is_none(),
            effect_count: plan.program.effects.len(),
            asset_count: plan.mapping.len(),
            renamed_count: plan.mapping.renamed_count(),
            mapping: plan.mapping,
        }
    }
}

pub fn plan_conversion(input_dir: &Path) -> Result<ConversionPlan> {
    let program_path = input_dir.join(PROGRAM_FILE);
    let text = fs::read_to_string(&program_path)
        .with_context(|| format!("read program {}", program_path.display()))?;
    let program = Program::parse(&text)
        .with_context(|| format!("parse program {}", program_path.display()))?;
    tracing::info!(
        path = %program_path.display(),
        effects = program.effects.len(),
        "parsed program"
    );

    let mapping = normalize_names(&program.images())?;
    let converted = program.with_mapped_images(&mapping)?;
    tracing::info!(
        assets = mapping.len(),
        renamed = mapping.renamed_count(),
        "computed name mapping"
    );

    Ok(ConversionPlan {
        program,
        mapping,
        converted,
    })
}

/// Plan only; touches nothing on disk besides reading the program.
pub fn run_dry(input_dir: &Path) -> Result<ConversionReport> {
    let plan = plan_conversion(input_dir)?;
    Ok(ConversionReport::new(plan, input_dir, None))
}

/// Convert `input_dir` into `output_dir`.
///
/// Assets are copied before the program is written, so a missing asset
/// leaves no output program behind. Assets copied before the failure stay.
pub fn run_conversion(input_dir: &Path, output_dir: &Path) -> Result<ConversionReport> {
    let plan = plan_conversion(input_dir)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let copied = copy_assets(
        &plan.mapping,
        &AssetDir::new(input_dir, ASSET_EXTENSION),
        &AssetDir::new(output_dir, ASSET_EXTENSION),
    )?;

    let program_path = output_dir.join(PROGRAM_FILE);
    staging::write_text(&program_path, &format!("{}\n", plan.converted))?;
    tracing::info!(
        path = %program_path.display(),
        assets = copied.len(),
        "conversion complete"
    );

    Ok(ConversionReport::new(plan, input_dir, Some(output_dir)))
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
