//! Core validation and plan loading types.

mod builder;
mod loader;
mod plan_check;
mod validation;

pub use builder::PlanCheckBuilder;
pub use loader::PlanLoader;
pub use plan_check::PlanCheck;
pub use validation::{Validate, ValidationReport, Validator};
