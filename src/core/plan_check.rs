//! A loaded plan paired with the checks to run against it.

use crate::core::{PlanLoader, ValidationReport};
use crate::error::Result;
use crate::plan::Plan;
use crate::provision::PlanValidator;

/// A plan loaded from its sources, ready to be validated.
///
/// # Examples
///
/// ```rust,no_run
/// use provision_check::prelude::*;
///
/// # fn example() -> Result<()> {
/// let check = PlanCheck::builder()
///     .with_file("kismatic-cluster.yaml")
///     .build()?;
///
/// let report = check.validate();
/// if !report.is_valid() {
///     eprintln!("{}", report.render());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PlanCheck {
    plan: Plan,
    loader: Option<PlanLoader>,
    validator: PlanValidator,
}

impl PlanCheck {
    /// Wrap an in-memory plan. [`reload`](Self::reload) is a no-op.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            loader: None,
            validator: PlanValidator::new(),
        }
    }

    pub(crate) fn with_loader(plan: Plan, loader: PlanLoader, validator: PlanValidator) -> Self {
        Self {
            plan,
            loader: Some(loader),
            validator,
        }
    }

    /// Use different validation options.
    pub fn with_validator(mut self, validator: PlanValidator) -> Self {
        self.validator = validator;
        self
    }

    /// The loaded plan.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Run the pre-provisioning checks against the loaded plan.
    pub fn validate(&self) -> ValidationReport {
        self.validator.report(&self.plan)
    }

    /// Re-read every source, replacing the plan only if loading succeeds.
    ///
    /// # Errors
    ///
    /// Returns the loading error and keeps the previous plan.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(loader) = &self.loader {
            self.plan = loader.load()?;
        }
        Ok(())
    }

    /// Consume the check, returning the plan.
    pub fn into_plan(self) -> Plan {
        self.plan
    }
}

impl From<Plan> for PlanCheck {
    fn from(plan: Plan) -> Self {
        Self::new(plan)
    }
}
