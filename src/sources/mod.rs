//! Plan source implementations.

mod file;
mod plan_source;

pub use file::FileSource;
pub use plan_source::PlanSource;
