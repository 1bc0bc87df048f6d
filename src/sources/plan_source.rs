//! Plan source trait.

use crate::error::Result;
use std::collections::HashMap;

/// Somewhere plan sections can be read from.
///
/// Implement this to feed plans from an inventory service or a test fixture
/// alongside [`FileSource`](super::FileSource).
pub trait PlanSource: Send + Sync {
    /// Load the sections this source defines, keyed by section name
    /// (`provisioner`, `etcd`, `master`, `worker`, `ingress`).
    ///
    /// A source may define only some sections, and only some keys within a
    /// section; the loader merges them over lower-priority sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed.
    fn load(&self) -> Result<HashMap<String, config::Value>>;

    /// Name used in load errors and log events.
    fn name(&self) -> String;

    /// Merge priority, higher wins. Files added through the builder get
    /// 100, 110, 120... in the order given.
    fn priority(&self) -> i32 {
        100
    }
}
