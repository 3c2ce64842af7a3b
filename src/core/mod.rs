pub mod index;
pub mod types;

pub use index::SymbolIndex;
pub use types::{
    ApimapError, ApimapResult, ClassIndex, FieldEntry, MethodEntry, ParamEntry, TypeEntry,
};
