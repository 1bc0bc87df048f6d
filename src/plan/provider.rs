//! Supported infrastructure provisioners.

use std::fmt;
use std::str::FromStr;

/// An infrastructure backend that can turn a plan into machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
}

impl Provider {
    /// Every supported provider.
    pub const ALL: [Provider; 2] = [Provider::Aws, Provider::Azure];

    /// The name used for this provider in plan files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown provisioner provider: {}", s))
    }
}

static PROVIDER_NAMES: [&str; Provider::ALL.len()] = {
    let mut names = [""; Provider::ALL.len()];
    let mut i = 0;
    while i < names.len() {
        names[i] = Provider::ALL[i].as_str();
        i += 1;
    }
    names
};

/// Names of every supported provisioner provider, in [`Provider::ALL`] order.
pub fn infrastructure_provisioners() -> &'static [&'static str] {
    &PROVIDER_NAMES
}
