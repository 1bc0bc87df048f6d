//! Composable validation support.

use crate::error::ValidationError;

/// Trait for self-validating units.
///
/// A unit checks its own invariants and reports every problem it finds. It
/// never needs to know where it sits in a larger structure: context labels
/// are applied by the composing [`Validator`].
///
/// # Examples
///
/// ```rust
/// use provision_check::core::{Validate, Validator};
/// use provision_check::error::ValidationError;
///
/// struct Port(u16);
///
/// impl Validate for Port {
///     fn validate(&self) -> (bool, Vec<ValidationError>) {
///         let mut v = Validator::new();
///         if self.0 < 1024 {
///             v.add_error([ValidationError::custom("port must be >= 1024")]);
///         }
///         v.valid()
///     }
/// }
///
/// let mut v = Validator::new();
/// v.validate_with_err_prefix("Listener", &Port(80));
/// let (valid, errors) = v.valid();
/// assert!(!valid);
/// assert_eq!(errors[0].to_string(), "Listener: port must be >= 1024");
/// ```
pub trait Validate {
    /// Validate the unit.
    ///
    /// Returns whether the unit is valid along with every error found.
    fn validate(&self) -> (bool, Vec<ValidationError>);
}

/// Accumulates errors from any number of validation calls.
///
/// One validator is created per top-level validation call and dropped when
/// it returns.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append zero or more errors.
    pub fn add_error(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Run a unit's checks and merge its errors as-is.
    pub fn validate(&mut self, unit: &dyn Validate) {
        let (ok, errors) = unit.validate();
        if !ok {
            self.errors.extend(errors);
        }
    }

    /// Run a unit's checks and merge its errors, each prefixed with `"<prefix>: "`.
    pub fn validate_with_err_prefix(&mut self, prefix: &str, unit: &dyn Validate) {
        let (ok, errors) = unit.validate();
        if !ok {
            self.errors
                .extend(errors.into_iter().map(|e| e.with_prefix(prefix)));
        }
    }

    /// Number of errors collected so far.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Consume the validator, returning the verdict and every error collected.
    pub fn valid(self) -> (bool, Vec<ValidationError>) {
        (self.errors.is_empty(), self.errors)
    }
}

/// Outcome of validating a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Every error found, in the order the checks ran.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Render the errors one per line.
    pub fn render(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize the report as JSON with the error messages as strings.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        #[derive(serde::Serialize)]
        struct ReportView {
            valid: bool,
            errors: Vec<String>,
        }

        let view = ReportView {
            valid: self.valid,
            errors: self.errors.iter().map(ToString::to_string).collect(),
        };
        serde_json::to_string(&view)
            .map_err(|e| crate::error::PlanError::Other(format!("Failed to render report: {}", e)))
    }
}

impl From<(bool, Vec<ValidationError>)> for ValidationReport {
    fn from((valid, errors): (bool, Vec<ValidationError>)) -> Self {
        Self { valid, errors }
    }
}

impl From<ValidationReport> for (bool, Vec<ValidationError>) {
    fn from(report: ValidationReport) -> Self {
        (report.valid, report.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(Vec<&'static str>);

    impl Validate for Always {
        fn validate(&self) -> (bool, Vec<ValidationError>) {
            let mut v = Validator::new();
            v.add_error(self.0.iter().map(|m| ValidationError::custom(*m)));
            v.valid()
        }
    }

    #[test]
    fn test_empty_validator_is_valid() {
        let (ok, errors) = Validator::new().valid();
        assert!(ok);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_merges_unprefixed() {
        let mut v = Validator::new();
        v.validate(&Always(vec!["first", "second"]));
        let (ok, errors) = v.valid();
        assert!(!ok);
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_validate_with_err_prefix() {
        let mut v = Validator::new();
        v.validate_with_err_prefix("Etcd nodes", &Always(vec!["bad"]));
        v.validate_with_err_prefix("Worker nodes", &Always(vec![]));
        let (ok, errors) = v.valid();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Etcd nodes: bad");
    }

    #[test]
    fn test_nested_prefixes() {
        struct Parent;
        impl Validate for Parent {
            fn validate(&self) -> (bool, Vec<ValidationError>) {
                let mut v = Validator::new();
                v.validate_with_err_prefix("Node #3", &Always(vec!["broken"]));
                v.valid()
            }
        }

        let mut v = Validator::new();
        v.validate_with_err_prefix("Master nodes", &Parent);
        let (_, errors) = v.valid();
        assert_eq!(errors[0].to_string(), "Master nodes: Node #3: broken");
    }

    #[test]
    fn test_add_error_accepts_none() {
        let mut v = Validator::new();
        v.add_error(None);
        assert_eq!(v.error_count(), 0);
    }

    #[test]
    fn test_report_render() {
        let report = ValidationReport::from((
            false,
            vec![ValidationError::custom("a"), ValidationError::custom("b")],
        ));
        assert!(!report.is_valid());
        assert_eq!(report.render(), "a\nb");
    }
}
