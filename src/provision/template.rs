//! Template placeholder rules.
//!
//! Before provisioning, node identities are placeholders of the form
//! `${name_<digits>}`. The backend substitutes real values later, so a
//! literal hostname or address here means the plan was already resolved or
//! was written by hand.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Exact value required for the master load balancer FQDN.
pub const LOAD_BALANCED_FQDN: &str = "${load_balanced_fqdn}";

/// Exact value required for the master load balancer short name.
pub const LOAD_BALANCED_SHORT_NAME: &str = "${load_balanced_short_name}";

type Pattern = LazyLock<Result<Regex, regex::Error>>;

// Unanchored: a placeholder embedded in a longer value, such as
// `${host_1}.cluster.local`, is still substituted by the backend.
static HOST_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"\$\{host_[0-9]+\}"));
static IP_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"\$\{ip_[0-9]+\}"));
static INTERNAL_IP_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"\$\{internalip_[0-9]+\}"));

/// A node field that must hold an indexed placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `${host_#}`
    Host,
    /// `${ip_#}`
    Ip,
    /// `${internalip_#}`
    InternalIp,
}

impl Placeholder {
    /// Field name used in error messages.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Ip => "IP",
            Self::InternalIp => "InternalIP",
        }
    }

    /// The placeholder shape, with `#` standing for the index.
    pub fn form(&self) -> &'static str {
        match self {
            Self::Host => "${host_#}",
            Self::Ip => "${ip_#}",
            Self::InternalIp => "${internalip_#}",
        }
    }

    fn pattern(&self) -> &'static Result<Regex, regex::Error> {
        match self {
            Self::Host => &*HOST_PATTERN,
            Self::Ip => &*IP_PATTERN,
            Self::InternalIp => &*INTERNAL_IP_PATTERN,
        }
    }

    /// Check that `value` contains a placeholder of this kind.
    ///
    /// # Errors
    ///
    /// Returns `NotTemplated` naming this field and the value, or
    /// `PatternError` if the pattern itself could not be compiled.
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        match self.pattern() {
            Ok(re) if re.is_match(value) => Ok(()),
            Ok(_) => Err(ValidationError::NotTemplated {
                field: self.field(),
                value: value.to_string(),
                expected: self.form(),
            }),
            Err(e) => Err(ValidationError::PatternError {
                value: value.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Check that a load balancer field holds its fixed placeholder verbatim.
pub(crate) fn check_literal(
    field: &'static str,
    value: &str,
    expected: &'static str,
) -> Option<ValidationError> {
    (value != expected).then(|| ValidationError::LoadBalancerNotTemplated {
        field,
        value: value.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for p in [Placeholder::Host, Placeholder::Ip, Placeholder::InternalIp] {
            assert!(p.pattern().is_ok(), "{} pattern", p.field());
        }
    }

    #[test]
    fn test_host_placeholder() {
        assert!(Placeholder::Host.check("${host_1}").is_ok());
        assert!(Placeholder::Host.check("${host_42}").is_ok());
        assert!(Placeholder::Host.check("${host_}").is_err());
        assert!(Placeholder::Host.check("${host_a}").is_err());
        assert!(Placeholder::Host.check("${ip_1}").is_err());
        assert!(Placeholder::Host.check("node1.example.com").is_err());
    }

    #[test]
    fn test_embedded_placeholder_accepted() {
        assert!(Placeholder::Host.check("${host_1}.cluster.local").is_ok());
        assert!(Placeholder::Ip.check("prefix-${ip_1}").is_ok());
        assert!(Placeholder::Ip.check("${ip_1}-suffix").is_ok());
        assert!(Placeholder::InternalIp.check("node-${internalip_7}").is_ok());
    }

    #[test]
    fn test_index_digits_are_ascii() {
        assert!(Placeholder::Host.check("${host_\u{0663}}").is_err());
        assert!(Placeholder::Ip.check("10.0.0.1 ${ip}").is_err());
    }

    #[test]
    fn test_error_names_own_field() {
        let err = Placeholder::Ip.check("10.0.0.1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"10.0.0.1\" is not a valid IP templated string, should be '${ip_#}'"
        );

        let err = Placeholder::Host.check("10.0.0.1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"10.0.0.1\" is not a valid Host templated string, should be '${host_#}'"
        );
    }

    #[test]
    fn test_internal_ip_placeholder() {
        assert!(Placeholder::InternalIp.check("${internalip_3}").is_ok());
        assert!(Placeholder::InternalIp.check("${ip_3}").is_err());
    }

    #[test]
    fn test_check_literal() {
        assert!(check_literal("Load balanced FQDN", LOAD_BALANCED_FQDN, LOAD_BALANCED_FQDN).is_none());
        let err = check_literal("Load balanced FQDN", "cluster.example.com", LOAD_BALANCED_FQDN);
        assert!(err.unwrap().to_string().contains("${load_balanced_fqdn}"));
    }
}
