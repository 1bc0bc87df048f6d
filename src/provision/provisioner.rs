//! Provisioner backend checks.

use crate::core::{Validate, Validator};
use crate::error::ValidationError;
use crate::plan::{Provisioner, infrastructure_provisioners};

impl Validate for Provisioner {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        let mut v = Validator::new();
        if self.provider.is_empty() {
            v.add_error([ValidationError::EmptyProvider]);
            return v.valid();
        }

        let options = infrastructure_provisioners();
        if !options.contains(&self.provider.as_str()) {
            v.add_error([ValidationError::UnknownProvider {
                provider: self.provider.clone(),
                options: options.iter().map(ToString::to_string).collect(),
            }]);
        }

        v.valid()
    }
}
