//! Pre-provisioning node group checks.

use super::node::ProvisionerNode;
use super::template::{LOAD_BALANCED_FQDN, LOAD_BALANCED_SHORT_NAME, check_literal};
use crate::core::{Validate, Validator};
use crate::error::ValidationError;
use crate::plan::{MasterNodeGroup, NodeGroup};

/// Checks shared by every node group variant.
///
/// All checks run; a group with no nodes and a zero count gets both errors.
/// The count comparison only applies when both sides are nonzero.
pub(crate) fn check_node_group(group: &NodeGroup) -> Validator {
    let mut v = Validator::new();
    let actual = group.nodes.len();

    if actual == 0 {
        v.add_error([ValidationError::MissingNodes]);
    }
    if group.expected_count == 0 {
        v.add_error([ValidationError::InvalidNodeCount]);
    }
    if actual > 0 && group.expected_count > 0 && actual != group.expected_count {
        v.add_error([ValidationError::NodeCountMismatch {
            expected: group.expected_count,
            actual,
        }]);
    }
    for (i, node) in group.nodes.iter().enumerate() {
        v.validate_with_err_prefix(&format!("Node #{}", i + 1), &ProvisionerNode(node));
    }

    v
}

/// A mandatory node group.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionerNodeGroup<'a>(pub &'a NodeGroup);

impl Validate for ProvisionerNodeGroup<'_> {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        check_node_group(self.0).valid()
    }
}

/// The master node group, whose load balancer names must stay templated.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionerMasterNodeGroup<'a>(pub &'a MasterNodeGroup);

impl Validate for ProvisionerMasterNodeGroup<'_> {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        let master = self.0;
        let mut v = check_node_group(&master.group);

        v.add_error(check_literal(
            "Load balanced FQDN",
            &master.load_balanced_fqdn,
            LOAD_BALANCED_FQDN,
        ));
        v.add_error(check_literal(
            "Load balanced short name",
            &master.load_balanced_short_name,
            LOAD_BALANCED_SHORT_NAME,
        ));

        v.valid()
    }
}

/// A node group that may be absent.
///
/// An absent group, or one with neither nodes nor a count, is valid. A count
/// that disagrees with the nodes listed is reported alone, without checking
/// individual nodes.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionerOptionalNodeGroup<'a>(pub Option<&'a NodeGroup>);

impl Validate for ProvisionerOptionalNodeGroup<'_> {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        let Some(group) = self.0 else {
            return (true, Vec::new());
        };
        if group.nodes.is_empty() && group.expected_count == 0 {
            return (true, Vec::new());
        }
        if group.nodes.len() != group.expected_count {
            return (
                false,
                vec![ValidationError::NodeCountMismatch {
                    expected: group.expected_count,
                    actual: group.nodes.len(),
                }],
            );
        }
        ProvisionerNodeGroup(group).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Node;

    fn templated(count: usize) -> Vec<Node> {
        (1..=count)
            .map(|i| {
                Node::new(
                    format!("${{host_{}}}", i),
                    format!("${{ip_{}}}", i),
                    format!("${{internalip_{}}}", i),
                )
            })
            .collect()
    }

    fn group(expected_count: usize, nodes: usize) -> NodeGroup {
        NodeGroup {
            expected_count,
            nodes: templated(nodes),
        }
    }

    fn master(fqdn: &str, short_name: &str) -> MasterNodeGroup {
        MasterNodeGroup {
            group: group(1, 1),
            load_balanced_fqdn: fqdn.to_string(),
            load_balanced_short_name: short_name.to_string(),
        }
    }

    #[test]
    fn test_valid_group() {
        let (ok, errors) = ProvisionerNodeGroup(&group(3, 3)).validate();
        assert!(ok);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_group_reports_both_errors() {
        let (ok, errors) = ProvisionerNodeGroup(&group(0, 0)).validate();
        assert!(!ok);
        assert_eq!(
            errors,
            vec![ValidationError::MissingNodes, ValidationError::InvalidNodeCount]
        );
    }

    #[test]
    fn test_count_mismatch() {
        let (ok, errors) = ProvisionerNodeGroup(&group(3, 2)).validate();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        let message = errors[0].to_string();
        assert!(message.contains('3'));
        assert!(message.contains('2'));
    }

    #[test]
    fn test_mismatch_skipped_when_one_side_zero() {
        let (_, errors) = ProvisionerNodeGroup(&group(0, 2)).validate();
        assert_eq!(errors, vec![ValidationError::InvalidNodeCount]);

        let (_, errors) = ProvisionerNodeGroup(&group(2, 0)).validate();
        assert_eq!(errors, vec![ValidationError::MissingNodes]);
    }

    #[test]
    fn test_node_errors_prefixed_with_index() {
        let mut g = group(2, 2);
        g.nodes[1].host = "10.0.0.1".to_string();
        let (ok, errors) = ProvisionerNodeGroup(&g).validate();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("Node #2: \"10.0.0.1\""));
        assert!(errors[0].to_string().contains("Host"));
    }

    #[test]
    fn test_valid_master() {
        let m = master(LOAD_BALANCED_FQDN, LOAD_BALANCED_SHORT_NAME);
        assert!(ProvisionerMasterNodeGroup(&m).validate().0);
    }

    #[test]
    fn test_master_rejects_real_fqdn() {
        let m = master("cluster.example.com", LOAD_BALANCED_SHORT_NAME);
        let (ok, errors) = ProvisionerMasterNodeGroup(&m).validate();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("${load_balanced_fqdn}"));
    }

    #[test]
    fn test_master_runs_group_checks() {
        let mut m = master("cluster", "cluster");
        m.group = group(0, 0);
        let (_, errors) = ProvisionerMasterNodeGroup(&m).validate();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_optional_absent_or_empty() {
        assert!(ProvisionerOptionalNodeGroup(None).validate().0);
        assert!(ProvisionerOptionalNodeGroup(Some(&group(0, 0))).validate().0);
    }

    #[test]
    fn test_optional_mismatch_short_circuits() {
        let mut g = group(3, 2);
        g.nodes[0].host = "literal".to_string();
        let (ok, errors) = ProvisionerOptionalNodeGroup(Some(&g)).validate();
        assert!(!ok);
        assert_eq!(
            errors,
            vec![ValidationError::NodeCountMismatch {
                expected: 3,
                actual: 2
            }]
        );
    }

    #[test]
    fn test_optional_delegates_to_full_check() {
        let mut g = group(2, 2);
        g.nodes[0].ip = "10.0.0.1".to_string();
        let (ok, errors) = ProvisionerOptionalNodeGroup(Some(&g)).validate();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("Node #1:"));
    }
}
