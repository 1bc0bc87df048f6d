//! Pre-provisioning plan validation.
//!
//! Checks a plan before it is handed to an infrastructure provisioner. Node
//! identities must still be template placeholders at this point; the
//! provisioner replaces them with real values once machines exist.
//!
//! # Examples
//!
//! ```rust
//! use provision_check::plan::Plan;
//! use provision_check::provision::validate_plan_for_provisioner;
//!
//! let (valid, errors) = validate_plan_for_provisioner(&Plan::default());
//! assert!(!valid);
//! assert_eq!(errors[0].to_string(), "Provisioner provider cannot be empty");
//! ```

mod duplicates;
mod group;
mod node;
mod provisioner;
mod template;

pub use duplicates::{ProvisionerNodeList, validate_no_duplicate_node_info};
pub use group::{ProvisionerMasterNodeGroup, ProvisionerNodeGroup, ProvisionerOptionalNodeGroup};
pub use node::ProvisionerNode;
pub use template::{LOAD_BALANCED_FQDN, LOAD_BALANCED_SHORT_NAME, Placeholder};

use crate::core::{Validator, ValidationReport};
use crate::error::ValidationError;
use crate::plan::Plan;

/// Run every pre-provisioning check against a plan.
///
/// Ingress is treated as a mandatory group. Use [`PlanValidator`] to relax
/// that.
pub fn validate_plan_for_provisioner(plan: &Plan) -> (bool, Vec<ValidationError>) {
    PlanValidator::new().validate(plan)
}

/// Pre-provisioning validation with options.
///
/// # Examples
///
/// ```rust
/// use provision_check::plan::Plan;
/// use provision_check::provision::PlanValidator;
///
/// let report = PlanValidator::new()
///     .with_optional_ingress(true)
///     .report(&Plan::default());
/// assert!(!report.is_valid());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanValidator {
    optional_ingress: bool,
}

impl PlanValidator {
    /// Create a validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the Ingress group to be left empty.
    pub fn with_optional_ingress(mut self, optional: bool) -> Self {
        self.optional_ingress = optional;
        self
    }

    /// Whether Ingress may be left empty.
    pub fn optional_ingress(&self) -> bool {
        self.optional_ingress
    }

    /// Validate a plan, collecting errors from every check.
    pub fn validate(&self, plan: &Plan) -> (bool, Vec<ValidationError>) {
        let entries = plan.all_nodes();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            provider = %plan.provisioner.provider,
            nodes = entries.len(),
            optional_ingress = self.optional_ingress,
            "validating plan for provisioner"
        );

        let mut v = Validator::new();
        v.validate(&plan.provisioner);
        v.validate(&ProvisionerNodeList { entries });
        v.validate_with_err_prefix("Etcd nodes", &ProvisionerNodeGroup(&plan.etcd));
        v.validate_with_err_prefix("Master nodes", &ProvisionerMasterNodeGroup(&plan.master));
        v.validate_with_err_prefix("Worker nodes", &ProvisionerNodeGroup(&plan.worker));
        if self.optional_ingress {
            v.validate_with_err_prefix(
                "Ingress nodes",
                &ProvisionerOptionalNodeGroup(Some(plan.ingress.as_ref())),
            );
        } else {
            v.validate_with_err_prefix("Ingress nodes", &ProvisionerNodeGroup(plan.ingress.as_ref()));
        }

        #[cfg(feature = "tracing")]
        {
            let errors = v.error_count();
            if errors > 0 {
                tracing::debug!(errors, "plan failed provisioner validation");
            }
        }

        v.valid()
    }

    /// Validate a plan and wrap the outcome in a report.
    pub fn report(&self, plan: &Plan) -> ValidationReport {
        self.validate(plan).into()
    }
}
