//! Installation plan types.
//!
//! A plan describes the node topology of a cluster before any infrastructure
//! exists. At that stage node identities are template placeholders such as
//! `${host_1}` that the provisioning backend fills in later.

mod provider;

pub use provider::{Provider, infrastructure_provisioners};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The full installation plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Backend that will create the infrastructure
    #[serde(default)]
    pub provisioner: Provisioner,
    /// Etcd nodes
    #[serde(default)]
    pub etcd: NodeGroup,
    /// Master nodes and their load balancer
    #[serde(default)]
    pub master: MasterNodeGroup,
    /// Worker nodes
    #[serde(default)]
    pub worker: NodeGroup,
    /// Ingress nodes
    #[serde(default)]
    pub ingress: OptionalNodeGroup,
}

impl Plan {
    /// Every node in the plan, in group order Etcd, Master, Worker, Ingress.
    ///
    /// A node listed in several groups appears once per group.
    pub fn all_nodes(&self) -> Vec<NodeEntry<'_>> {
        let groups = [
            (NodeRole::Etcd, &self.etcd),
            (NodeRole::Master, &self.master.group),
            (NodeRole::Worker, &self.worker),
            (NodeRole::Ingress, &self.ingress.0),
        ];

        groups
            .into_iter()
            .flat_map(|(role, group)| {
                group.nodes.iter().enumerate().map(move |(i, node)| NodeEntry {
                    role,
                    index: i + 1,
                    node,
                })
            })
            .collect()
    }
}

/// Identifies the backend responsible for provisioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioner {
    /// Provider name, e.g. "aws"
    #[serde(default)]
    pub provider: String,
}

/// A set of nodes serving one cluster role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGroup {
    /// Number of nodes the group is meant to have
    #[serde(default)]
    pub expected_count: usize,
    /// The nodes themselves
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// The master node group plus its load balancer names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterNodeGroup {
    /// The master nodes
    #[serde(flatten)]
    pub group: NodeGroup,
    /// Fully-qualified domain name of the load balancer
    #[serde(default)]
    pub load_balanced_fqdn: String,
    /// Short name of the load balancer
    #[serde(default)]
    pub load_balanced_short_name: String,
}

/// A node group that may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionalNodeGroup(pub NodeGroup);

impl From<OptionalNodeGroup> for NodeGroup {
    fn from(group: OptionalNodeGroup) -> Self {
        group.0
    }
}

impl From<NodeGroup> for OptionalNodeGroup {
    fn from(group: NodeGroup) -> Self {
        Self(group)
    }
}

impl AsRef<NodeGroup> for OptionalNodeGroup {
    fn as_ref(&self) -> &NodeGroup {
        &self.0
    }
}

/// A single machine in the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Hostname
    #[serde(default)]
    pub host: String,
    /// Public IP address
    #[serde(default)]
    pub ip: String,
    /// Private IP address, if different from `ip`
    #[serde(default, rename = "internalip")]
    pub internal_ip: String,
}

impl Node {
    /// Create a node from its identifying fields.
    pub fn new(host: impl Into<String>, ip: impl Into<String>, internal_ip: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ip: ip.into(),
            internal_ip: internal_ip.into(),
        }
    }
}

/// The cluster role a node group serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Etcd members
    Etcd,
    /// Kubernetes control plane
    Master,
    /// Workload nodes
    Worker,
    /// Ingress controllers
    Ingress,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Etcd => "Etcd",
            Self::Master => "Master",
            Self::Worker => "Worker",
            Self::Ingress => "Ingress",
        };
        f.write_str(name)
    }
}

/// A node together with where it was listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeEntry<'a> {
    /// Group the node was listed in
    pub role: NodeRole,
    /// 1-based position within the group
    pub index: usize,
    /// The node
    pub node: &'a Node,
}

impl fmt::Display for NodeEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node #{}", self.role, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(nodes: &[(&str, &str)]) -> NodeGroup {
        NodeGroup {
            expected_count: nodes.len(),
            nodes: nodes.iter().map(|(h, ip)| Node::new(*h, *ip, "")).collect(),
        }
    }

    #[test]
    fn test_all_nodes_order_and_labels() {
        let plan = Plan {
            etcd: group(&[("${host_1}", "${ip_1}")]),
            master: MasterNodeGroup {
                group: group(&[("${host_2}", "${ip_2}"), ("${host_3}", "${ip_3}")]),
                ..Default::default()
            },
            worker: group(&[("${host_4}", "${ip_4}")]),
            ingress: group(&[("${host_5}", "${ip_5}")]).into(),
            ..Default::default()
        };

        let labels: Vec<_> = plan.all_nodes().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "Etcd node #1",
                "Master node #1",
                "Master node #2",
                "Worker node #1",
                "Ingress node #1",
            ]
        );
    }

    #[test]
    fn test_empty_plan_has_no_nodes() {
        assert!(Plan::default().all_nodes().is_empty());
    }

    #[test]
    fn test_optional_group_conversion() {
        let inner = group(&[("${host_1}", "${ip_1}")]);
        let optional = OptionalNodeGroup::from(inner.clone());
        assert_eq!(NodeGroup::from(optional), inner);
    }

    #[test]
    fn test_deserialize_master_flattened() {
        let json = r#"{
            "expected_count": 1,
            "load_balanced_fqdn": "${load_balanced_fqdn}",
            "load_balanced_short_name": "${load_balanced_short_name}",
            "nodes": [{"host": "${host_1}", "ip": "${ip_1}", "internalip": "${internalip_1}"}]
        }"#;
        let master: MasterNodeGroup = serde_json::from_str(json).unwrap();
        assert_eq!(master.group.expected_count, 1);
        assert_eq!(master.group.nodes[0].internal_ip, "${internalip_1}");
        assert_eq!(master.load_balanced_fqdn, "${load_balanced_fqdn}");
    }
}
