//! Classification engine.
//!
//! The pipeline runs in four stages: harvest import hints from decompiled
//! sources, extract referenced names from member signatures, resolve each
//! name to concrete identities, and expand reachability breadth-first
//! from the configured seeds.

pub mod expansion;
pub mod extraction;
pub mod imports;
pub mod resolver;

pub use expansion::{
    BorderlineCase, ClassificationResults, InternalType, SurfaceExpander, SurfaceType,
};
pub use extraction::{extract, extract_type_names};
pub use imports::ImportTable;
pub use resolver::NameResolver;
