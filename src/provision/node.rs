//! Pre-provisioning node checks.

use super::template::Placeholder;
use crate::core::{Validate, Validator};
use crate::error::ValidationError;
use crate::plan::Node;

/// A node checked against the placeholder rules.
///
/// Host and IP must be placeholders. InternalIP is optional, but when set it
/// must be a placeholder too. Every violation is reported.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionerNode<'a>(pub &'a Node);

impl Validate for ProvisionerNode<'_> {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        let node = self.0;
        let mut v = Validator::new();

        v.add_error(Placeholder::Host.check(&node.host).err());
        v.add_error(Placeholder::Ip.check(&node.ip).err());
        if !node.internal_ip.is_empty() {
            v.add_error(Placeholder::InternalIp.check(&node.internal_ip).err());
        }

        v.valid()
    }
}
