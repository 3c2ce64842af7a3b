//! Report serialization and the terminal summary.
//!
//! Three JSON artifacts per run: `surface.json` (the classified API
//! surface), `internal-index.json` (everything else, tagged), and
//! `surface-review.json` (borderline cases for human review). The engine
//! hands over plain result sets; this layer stamps and persists them.

use crate::analysis::{BorderlineCase, ClassificationResults, InternalType, SurfaceType};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceReport {
    pub version: String,
    pub generated_at: String,
    pub total_api_types: usize,
    pub seed_types: Vec<String>,
    pub types: Vec<SurfaceType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalReport {
    pub version: String,
    pub generated_at: String,
    pub total_internal_types: usize,
    pub types: Vec<InternalType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub version: String,
    pub generated_at: String,
    pub borderline_cases: Vec<BorderlineCase>,
}

/// Paths of the three written artifacts.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub surface: PathBuf,
    pub internal: PathBuf,
    pub review: PathBuf,
}

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Stamp and write all three reports.
    pub fn write_reports(&self, results: &ClassificationResults) -> Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("failed to create output dir {}", self.output_dir.display())
        })?;

        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let surface = SurfaceReport {
            version: REPORT_VERSION.to_string(),
            generated_at: generated_at.clone(),
            total_api_types: results.surface.len(),
            seed_types: results.seed_fqcns.clone(),
            types: results.surface.clone(),
        };
        let internal = InternalReport {
            version: REPORT_VERSION.to_string(),
            generated_at: generated_at.clone(),
            total_internal_types: results.internal.len(),
            types: results.internal.clone(),
        };
        let review = ReviewReport {
            version: REPORT_VERSION.to_string(),
            generated_at,
            borderline_cases: results.borderline.clone(),
        };

        let paths = ReportPaths {
            surface: self.output_dir.join("surface.json"),
            internal: self.output_dir.join("internal-index.json"),
            review: self.output_dir.join("surface-review.json"),
        };

        write_json(&paths.surface, &surface)?;
        write_json(&paths.internal, &internal)?;
        write_json(&paths.review, &review)?;

        Ok(paths)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Human-facing run summary with the category breakdown, printed after
/// the reports are on disk.
pub fn print_summary(results: &ClassificationResults, paths: &ReportPaths) {
    println!();
    println!("{}", "Classification complete".bold());
    println!(
        "  API surface:    {} types ({})",
        results.surface.len().to_string().green(),
        paths.surface.display()
    );
    println!(
        "  Internal index: {} types ({})",
        results.internal.len(),
        paths.internal.display()
    );
    println!(
        "  Review cases:   {} ({})",
        results.borderline.len().to_string().yellow(),
        paths.review.display()
    );
    if results.deduplicated > 0 {
        println!(
            "  Removed {} redundant protocol duplicates",
            results.deduplicated
        );
    }

    let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for surface_type in &results.surface {
        *category_counts.entry(surface_type.category.as_str()).or_default() += 1;
    }

    println!();
    println!("Category breakdown:");
    for (category, count) in category_counts {
        println!("  {:<15} {}", category, count);
    }
}
