pub mod loader;
pub mod output;

pub use loader::load_class_index;
pub use output::{print_summary, ReportPaths, ReportWriter};
