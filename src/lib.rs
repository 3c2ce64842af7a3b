// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::analysis::{
    BorderlineCase, ClassificationResults, ImportTable, InternalType, NameResolver,
    SurfaceExpander, SurfaceType,
};
pub use crate::config::{ApimapConfig, CategoryConfig, NamespaceConfig, SeedConfig};
pub use crate::core::{
    ApimapError, ApimapResult, ClassIndex, FieldEntry, MethodEntry, ParamEntry, SymbolIndex,
    TypeEntry,
};
pub use crate::io::{load_class_index, ReportPaths, ReportWriter};
