//! Builder for constructing PlanCheck instances.

use crate::core::{PlanCheck, PlanLoader};
use crate::error::Result;
use crate::provision::PlanValidator;
use crate::sources::{FileSource, PlanSource};
use std::path::PathBuf;

/// Builder for loading a plan and configuring its checks.
///
/// # Examples
///
/// ```rust,no_run
/// use provision_check::prelude::*;
///
/// # fn example() -> Result<()> {
/// let check = PlanCheck::builder()
///     .with_file("plan/base.yaml")
///     .with_file("plan/aws.yaml")
///     .with_optional_ingress(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct PlanCheckBuilder {
    loader: PlanLoader,
    files: i32,
    validator: PlanValidator,
}

impl PlanCheckBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            loader: PlanLoader::new(),
            files: 0,
            validator: PlanValidator::new(),
        }
    }

    /// Add a plan file.
    ///
    /// Later files are merged over earlier ones key by key, so an overlay
    /// only needs the keys it changes.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let priority = 100 + self.files * 10;
        self.files += 1;
        self.loader
            .add_source(Box::new(FileSource::new(path).with_priority(priority)));
        self
    }

    /// Add a custom plan source.
    pub fn with_source<S: PlanSource + 'static>(mut self, source: S) -> Self {
        self.loader.add_source(Box::new(source));
        self
    }

    /// Allow the Ingress group to be left empty.
    pub fn with_optional_ingress(mut self, optional: bool) -> Self {
        self.validator = self.validator.with_optional_ingress(optional);
        self
    }

    /// Load the plan.
    ///
    /// Loading failures are errors. Validation findings are not: run
    /// [`PlanCheck::validate`] on the result to get them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were configured
    /// - Any source fails to load
    /// - A merged section does not have the shape of that section
    pub fn build(self) -> Result<PlanCheck> {
        let plan = self.loader.load()?;
        Ok(PlanCheck::with_loader(plan, self.loader, self.validator))
    }
}

impl Default for PlanCheckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanCheck {
    /// Create a new builder for loading a plan.
    pub fn builder() -> PlanCheckBuilder {
        PlanCheckBuilder::new()
    }
}
