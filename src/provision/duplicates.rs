//! Plan-wide duplicate node detection.

use crate::core::{Validate, Validator};
use crate::error::ValidationError;
use crate::plan::{Node, NodeEntry};
use std::collections::HashMap;

type FieldAccessor = fn(&Node) -> &str;

fn host(node: &Node) -> &str {
    &node.host
}

fn ip(node: &Node) -> &str {
    &node.ip
}

fn internal_ip(node: &Node) -> &str {
    &node.internal_ip
}

/// Identifying fields, in reporting order.
const IDENTITY_FIELDS: [(&str, FieldAccessor); 3] =
    [("Host", host), ("IP", ip), ("InternalIP", internal_ip)];

/// Every node in a plan, checked for shared identities.
#[derive(Debug, Clone)]
pub struct ProvisionerNodeList<'a> {
    /// Flattened node entries
    pub entries: Vec<NodeEntry<'a>>,
}

impl Validate for ProvisionerNodeList<'_> {
    fn validate(&self) -> (bool, Vec<ValidationError>) {
        let mut v = Validator::new();
        v.add_error(validate_no_duplicate_node_info(&self.entries));
        v.valid()
    }
}

/// Report every identifying value carried by more than one entry.
///
/// One error per shared value, listing the entries that carry it. Empty
/// values are ignored. Errors come out in field order, then in order of
/// first appearance, so the result is stable for a given plan.
pub fn validate_no_duplicate_node_info(entries: &[NodeEntry<'_>]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, accessor) in IDENTITY_FIELDS {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut holders: Vec<(&str, Vec<String>)> = Vec::new();

        for entry in entries {
            let value = accessor(entry.node);
            if value.is_empty() {
                continue;
            }
            match seen.get(value) {
                Some(&slot) => holders[slot].1.push(entry.to_string()),
                None => {
                    seen.insert(value, holders.len());
                    holders.push((value, vec![entry.to_string()]));
                }
            }
        }

        errors.extend(
            holders
                .into_iter()
                .filter(|(_, labels)| labels.len() > 1)
                .map(|(value, entries)| ValidationError::DuplicateNodeInfo {
                    field,
                    value: value.to_string(),
                    entries,
                }),
        );
    }

    errors
}
