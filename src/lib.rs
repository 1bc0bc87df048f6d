//! # provision-check
//!
//! Static validation of installation plans before infrastructure provisioning.
//!
//! ## Overview
//!
//! A provisioning backend turns a plan into machines and fills in the node
//! identities afterwards. Until then, hosts and addresses in the plan are
//! template placeholders such as `${host_1}` and `${ip_1}`. This crate checks
//! a plan at that stage:
//! - Provisioner provider is set and supported
//! - Every node group has nodes and a matching expected count
//! - Node identities are placeholders, not literal values
//! - Master load balancer names are the fixed placeholders
//! - No two nodes share an identity anywhere in the plan
//!
//! Every check runs and every problem is reported, each labelled with where
//! it was found ("Master nodes: Node #2: ...").
//!
//! ## Quick Start
//!
//! ```rust
//! use provision_check::prelude::*;
//!
//! let plan = Plan::default();
//! let (valid, errors) = validate_plan_for_provisioner(&plan);
//! assert!(!valid);
//! for err in &errors {
//!     println!("{}", err);
//! }
//! ```
//!
//! Plans can also be loaded from YAML, TOML, or JSON files:
//!
//! ```rust,no_run
//! use provision_check::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let report = PlanCheck::builder()
//!     .with_file("kismatic-cluster.yaml")
//!     .build()?
//!     .validate();
//! println!("{}", report.render());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing` (default): debug events while loading and validating
//! - `json`: `ValidationReport::to_json`

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod plan;
pub mod provision;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{PlanCheck, PlanCheckBuilder, Validate, ValidationReport, Validator};
    pub use crate::error::{ErrorKind, PlanError, Result, ValidationError};
    pub use crate::plan::{MasterNodeGroup, Node, NodeGroup, OptionalNodeGroup, Plan, Provisioner};
    pub use crate::provision::{PlanValidator, validate_plan_for_provisioner};
}
