//! Error types for provision-check.

/// Result type alias for plan loading operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors that can occur while loading a plan.
///
/// These are faults: a plan that cannot be read never reaches validation.
/// Validation findings are reported as [`ValidationError`] values instead.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Failed to load the plan from a source.
    #[error("Failed to load plan: {0}")]
    LoadError(String),

    /// A plan section does not have the expected shape.
    #[error("Invalid plan section '{section}': {reason}")]
    InvalidSection {
        /// Section name, e.g. "master"
        section: &'static str,
        /// Why it could not be read
        reason: String,
    },

    /// Failed to parse a plan file.
    #[error("Failed to parse plan: {0}")]
    ParseError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Plan error: {0}")]
    Other(String),
}

/// Broad classification of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or empty required fields, count mismatches.
    Structural,
    /// A field that should be a template placeholder is not.
    Format,
    /// Identifying fields shared between nodes.
    Referential,
    /// Unknown provisioner, non-literal load balancer placeholders.
    Domain,
}

/// A single validation finding.
///
/// The `Display` output is the message presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Custom validation error with a message.
    #[error("{0}")]
    Custom(String),

    /// The provisioner provider was left empty.
    #[error("Provisioner provider cannot be empty")]
    EmptyProvider,

    /// The provisioner provider is not one of the supported providers.
    #[error("{provider:?} is not a valid provisioner provider. Options are [{}]", .options.join(", "))]
    UnknownProvider {
        /// The rejected provider name
        provider: String,
        /// The supported provider names
        options: Vec<String>,
    },

    /// A node group without nodes.
    #[error("At least one node is required")]
    MissingNodes,

    /// A node group whose expected count is zero.
    #[error("Node count must be greater than 0")]
    InvalidNodeCount,

    /// The expected count disagrees with the nodes listed.
    #[error("Expected node count ({expected}) does not match the number of nodes provided ({actual})")]
    NodeCountMismatch {
        /// Declared node count
        expected: usize,
        /// Number of nodes listed
        actual: usize,
    },

    /// A field holds a literal value where a template placeholder is required.
    #[error("{value:?} is not a valid {field} templated string, should be '{expected}'")]
    NotTemplated {
        /// Name of the offending field
        field: &'static str,
        /// The value found
        value: String,
        /// Placeholder form the field must take
        expected: &'static str,
    },

    /// A load balancer field holds something other than its fixed placeholder.
    #[error("{field} {value:?} is not a valid templated string, should be '{expected}'")]
    LoadBalancerNotTemplated {
        /// Name of the offending field
        field: &'static str,
        /// The value found
        value: String,
        /// The exact placeholder required
        expected: &'static str,
    },

    /// A placeholder pattern could not be evaluated.
    #[error("Could not determine if {value:?} is a templated value: {reason}")]
    PatternError {
        /// The value being checked
        value: String,
        /// Why the pattern failed
        reason: String,
    },

    /// Several node entries share an identifying field.
    #[error("Duplicate {field} {value:?} is used by {}", .entries.join(", "))]
    DuplicateNodeInfo {
        /// Name of the shared field
        field: &'static str,
        /// The shared value
        value: String,
        /// Every entry carrying the value, e.g. "Etcd node #1"
        entries: Vec<String>,
    },

    /// An error raised inside a labelled context, e.g. "Master nodes".
    #[error("{prefix}: {inner}")]
    Prefixed {
        /// Context label
        prefix: String,
        /// The wrapped error
        inner: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Wrap this error in a context label.
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        Self::Prefixed {
            prefix: prefix.into(),
            inner: Box::new(self),
        }
    }

    /// Classify this error. Prefixed errors report the kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Custom(_) | Self::MissingNodes | Self::InvalidNodeCount => ErrorKind::Structural,
            Self::NodeCountMismatch { .. } => ErrorKind::Structural,
            Self::NotTemplated { .. } | Self::PatternError { .. } => ErrorKind::Format,
            Self::DuplicateNodeInfo { .. } => ErrorKind::Referential,
            Self::EmptyProvider
            | Self::UnknownProvider { .. }
            | Self::LoadBalancerNotTemplated { .. } => ErrorKind::Domain,
            Self::Prefixed { inner, .. } => inner.kind(),
        }
    }

    /// The innermost error, with every context label stripped.
    pub fn root(&self) -> &ValidationError {
        match self {
            Self::Prefixed { inner, .. } => inner.root(),
            other => other,
        }
    }
}
