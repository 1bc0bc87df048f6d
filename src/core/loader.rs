//! Plan loader that merges multiple sources section by section.

use crate::error::{PlanError, Result};
use crate::plan::Plan;
use crate::sources::PlanSource;
use config::{Value, ValueKind};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// The top-level sections of a plan file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PlanSection {
    Provisioner,
    Etcd,
    Master,
    Worker,
    Ingress,
}

impl PlanSection {
    const ALL: [PlanSection; 5] = [
        Self::Provisioner,
        Self::Etcd,
        Self::Master,
        Self::Worker,
        Self::Ingress,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Provisioner => "provisioner",
            Self::Etcd => "etcd",
            Self::Master => "master",
            Self::Worker => "worker",
            Self::Ingress => "ingress",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(key))
    }

    /// Deserialize the merged section value into its slot in `plan`.
    fn apply(self, plan: &mut Plan, value: Value) -> Result<()> {
        match self {
            Self::Provisioner => plan.provisioner = self.read(value)?,
            Self::Etcd => plan.etcd = self.read(value)?,
            Self::Master => plan.master = self.read(value)?,
            Self::Worker => plan.worker = self.read(value)?,
            Self::Ingress => plan.ingress = self.read(value)?,
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(self, value: Value) -> Result<T> {
        value
            .try_deserialize()
            .map_err(|e| PlanError::InvalidSection {
                section: self.name(),
                reason: e.to_string(),
            })
    }
}

/// Merge `overlay` into `base`. Tables merge key by key, anything else
/// (scalars, node lists) replaces the base value.
fn merge_value(base: &mut Value, overlay: Value) {
    match overlay.kind {
        ValueKind::Table(overlay_table) => match &mut base.kind {
            ValueKind::Table(base_table) => {
                for (key, value) in overlay_table {
                    match base_table.get_mut(&key) {
                        Some(existing) => merge_value(existing, value),
                        None => {
                            base_table.insert(key, value);
                        }
                    }
                }
            }
            kind => *kind = ValueKind::Table(overlay_table),
        },
        kind => base.kind = kind,
    }
}

/// Loads a plan from one or more sources.
///
/// Sources are merged by priority, lowest first. Within a section a higher
/// priority source only replaces the keys it sets, so an overlay can change
/// `worker.expected_count` without repeating the worker nodes. Node lists are
/// replaced whole. Keys that are not plan sections are ignored.
pub struct PlanLoader {
    sources: Vec<Box<dyn PlanSource>>,
}

impl std::fmt::Debug for PlanLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanLoader")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl PlanLoader {
    /// Create a loader with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a plan source.
    pub fn add_source(&mut self, source: Box<dyn PlanSource>) {
        self.sources.push(source);
    }

    /// Load and merge every source into a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added
    /// - Any source fails to load
    /// - A merged section does not have the shape of that section
    pub fn load(&self) -> Result<Plan> {
        if self.sources.is_empty() {
            return Err(PlanError::LoadError("No plan sources specified".to_string()));
        }

        let mut sections: HashMap<PlanSection, Value> = HashMap::new();

        for source in self.sorted_sources() {
            let fragment = source.load().map_err(|e| {
                PlanError::LoadError(format!("Failed to load source '{}': {}", source.name(), e))
            })?;

            for (key, value) in fragment {
                let Some(section) = PlanSection::from_key(&key) else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(source = %source.name(), key = %key, "ignoring non-plan key");
                    continue;
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(source = %source.name(), section = section.name(), "merging plan section");

                match sections.get_mut(&section) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        sections.insert(section, value);
                    }
                }
            }
        }

        let mut plan = Plan::default();
        for section in PlanSection::ALL {
            if let Some(value) = sections.remove(&section) {
                section.apply(&mut plan, value)?;
            }
        }
        Ok(plan)
    }

    /// Source names in the order they are merged.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted_sources().map(|s| s.name()).collect()
    }

    fn sorted_sources(&self) -> impl Iterator<Item = &dyn PlanSource> {
        let mut sorted: Vec<_> = self.sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted.into_iter()
    }
}

impl Default for PlanLoader {
    fn default() -> Self {
        Self::new()
    }
}
