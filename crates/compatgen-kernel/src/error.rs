//! Error types for compatgen kernel operations.

use crate::tags::INTERNAL_TAG_NAME;

/// A declared compatibility promise that is inconsistent with the type's
/// maturity or internal status.
///
/// Every variant names the offending type; the rendered message says which
/// rule was broken and what combination would satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    /// Neither an explicit level nor the internal tag is present.
    #[error("{type_name}: level or internal must be specified")]
    LevelOrInternalRequired { type_name: String },

    /// Internal types may only claim level 4.
    #[error(
        "{type_name}: internal APIs are only allowed to offer level 4 compatibility: long term support cannot be offered for the {type_name} API"
    )]
    InternalRequiresLevel4 { type_name: String },

    /// The enclosing version does not look like a Kubernetes API version.
    #[error(
        "{type_name}: APIs whose versions do not conform to kube apiVersion format cannot be exposed: the {type_name} API must be tagged with +{internal_tag}",
        internal_tag = INTERNAL_TAG_NAME
    )]
    UnrecognizedVersion { type_name: String },

    /// Generally available versions must promise level 1.
    #[error("{type_name}: generally available APIs must be supported for a minimum of 12 months")]
    GenerallyAvailableRequiresLevel1 { type_name: String },

    /// Beta versions cannot promise level 1.
    #[error(
        "{type_name}: pre-release (beta) APIs must offer level 2 compatibility: the {type_name} API should be versioned as generally available if you wish to offer level 1 compatibility"
    )]
    PrereleaseLevelTooStrong { type_name: String },

    /// Beta versions cannot fall back to level 4.
    #[error(
        "{type_name}: pre-release (beta) APIs must offer level 2 compatibility: the {type_name} API should be versioned as experimental (alpha) if you wish to offer level 4 compatibility"
    )]
    PrereleaseLevelTooWeak { type_name: String },

    /// Alpha versions may only claim level 4.
    #[error(
        "{type_name}: experimental (alpha) APIs are only allowed to offer level 4 compatibility: long term support cannot be offered for the {type_name} API"
    )]
    ExperimentalRequiresLevel4 { type_name: String },
}

impl PolicyViolation {
    /// Name of the API type the violation was raised for.
    pub fn type_name(&self) -> &str {
        match self {
            Self::LevelOrInternalRequired { type_name }
            | Self::InternalRequiresLevel4 { type_name }
            | Self::UnrecognizedVersion { type_name }
            | Self::GenerallyAvailableRequiresLevel1 { type_name }
            | Self::PrereleaseLevelTooStrong { type_name }
            | Self::PrereleaseLevelTooWeak { type_name }
            | Self::ExperimentalRequiresLevel4 { type_name } => type_name,
        }
    }
}

/// Errors arising while deciding the compatibility level of one declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompatError {
    /// The tags are well formed but break the level/maturity policy.
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// A compatibility tag carries a value that cannot be interpreted.
    #[error("{type_name}: invalid value {value:?} for tag +{tag}: {reason}")]
    MalformedTag {
        type_name: String,
        tag: &'static str,
        value: String,
        reason: String,
    },
}
