//! The classify command: load the index, build the lookup structures,
//! run the expansion, persist the three reports.

use crate::analysis::{ImportTable, SurfaceExpander};
use crate::config::ApimapConfig;
use crate::core::SymbolIndex;
use crate::io::{load_class_index, print_summary, ReportWriter};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct ClassifyConfig {
    pub index_path: PathBuf,
    /// Decompiled sources root; `decompiled` next to the index when unset.
    pub sources: Option<PathBuf>,
    /// Report directory; the index's directory when unset.
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn handle_classify(config: ClassifyConfig) -> Result<()> {
    let artifacts_dir = config
        .index_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let sources_root = config
        .sources
        .unwrap_or_else(|| artifacts_dir.join("decompiled"));
    let output_dir = config.output.unwrap_or_else(|| artifacts_dir.clone());

    let policy = ApimapConfig::load(config.config.as_deref())?;

    let class_index = load_class_index(&config.index_path)?;
    log::info!("Loaded {} types", class_index.classes.len());

    let symbol_index = SymbolIndex::build(&class_index.classes);
    let imports = ImportTable::build(&class_index.classes, &sources_root);

    log::info!("Expanding API surface...");
    let results =
        SurfaceExpander::new(&class_index.classes, &symbol_index, &imports, &policy).run();
    log::info!(
        "API surface: {} types, {} internal, {} borderline",
        results.surface.len(),
        results.internal.len(),
        results.borderline.len()
    );

    let writer = ReportWriter::new(output_dir);
    let paths = writer.write_reports(&results)?;
    print_summary(&results, &paths);

    Ok(())
}
