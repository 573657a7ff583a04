//! Maturity of an API version namespace.

use regex::Regex;
use std::sync::OnceLock;

/// How finished an API version declares itself to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    /// `v1`, `v2`, ...
    GenerallyAvailable,
    /// `v1beta1`, ...
    Prerelease,
    /// `v1alpha1`, ...
    Experimental,
    /// Anything that is not a Kubernetes API version.
    Unclassified,
}

fn ga_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v\d*$").expect("ga version regex must compile"))
}

fn beta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v\d*beta\d*$").expect("beta version regex must compile"))
}

fn alpha_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v\d*alpha\d*$").expect("alpha version regex must compile"))
}

impl Maturity {
    /// Classify a namespace name. Only the last `/`-separated segment counts.
    pub fn classify(namespace: &str) -> Self {
        let segment = namespace.rsplit('/').next().unwrap_or(namespace);
        if ga_re().is_match(segment) {
            Self::GenerallyAvailable
        } else if beta_re().is_match(segment) {
            Self::Prerelease
        } else if alpha_re().is_match(segment) {
            Self::Experimental
        } else {
            Self::Unclassified
        }
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenerallyAvailable => write!(f, "generally-available"),
            Self::Prerelease => write!(f, "pre-release"),
            Self::Experimental => write!(f, "experimental"),
            Self::Unclassified => write!(f, "unclassified"),
        }
    }
}
