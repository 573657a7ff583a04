//! The level/maturity policy.
//!
//! A compatibility promise must match how finished the API version says it
//! is. The rules are evaluated in a fixed order and the first failing rule is
//! reported:
//!
//! | internal | level   | maturity     | outcome                         |
//! |----------|---------|--------------|---------------------------------|
//! | no       | absent  | any          | level or internal required      |
//! | yes      | absent  | any          | level 4                         |
//! | yes      | not 4   | any          | internal requires level 4       |
//! | yes      | 4       | any          | level 4                         |
//! | no       | any     | unclassified | must be tagged internal         |
//! | no       | not 1   | GA           | GA requires level 1             |
//! | no       | 1       | beta         | too strong for beta             |
//! | no       | 4       | beta         | too weak for beta               |
//! | no       | not 4   | alpha        | alpha requires level 4          |
//! | no       | n       | otherwise    | level n                         |

use crate::error::PolicyViolation;
use crate::level::CompatibilityLevel;
use crate::maturity::Maturity;
use crate::tags::CompatibilityTags;

/// Derive the effective compatibility level of `type_name`, or the first
/// policy rule it breaks.
pub fn validate(
    type_name: &str,
    tags: &CompatibilityTags,
    maturity: Maturity,
) -> Result<CompatibilityLevel, PolicyViolation> {
    let type_name = type_name.to_string();
    let level = match (tags.internal, tags.level) {
        (false, None) => return Err(PolicyViolation::LevelOrInternalRequired { type_name }),
        (true, None) => return Ok(CompatibilityLevel::Level4),
        (_, Some(level)) => level,
    };

    if tags.internal {
        return if level == CompatibilityLevel::Level4 {
            Ok(level)
        } else {
            Err(PolicyViolation::InternalRequiresLevel4 { type_name })
        };
    }

    match (maturity, level) {
        (Maturity::Unclassified, _) => Err(PolicyViolation::UnrecognizedVersion { type_name }),
        (Maturity::GenerallyAvailable, CompatibilityLevel::Level1) => Ok(level),
        (Maturity::GenerallyAvailable, _) => {
            Err(PolicyViolation::GenerallyAvailableRequiresLevel1 { type_name })
        }
        (Maturity::Prerelease, CompatibilityLevel::Level1) => {
            Err(PolicyViolation::PrereleaseLevelTooStrong { type_name })
        }
        (Maturity::Prerelease, CompatibilityLevel::Level4) => {
            Err(PolicyViolation::PrereleaseLevelTooWeak { type_name })
        }
        (Maturity::Prerelease, _) => Ok(level),
        (Maturity::Experimental, CompatibilityLevel::Level4) => Ok(level),
        (Maturity::Experimental, _) => {
            Err(PolicyViolation::ExperimentalRequiresLevel4 { type_name })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::CompatibilityLevel::*;

    fn tags(internal: bool, level: Option<CompatibilityLevel>) -> CompatibilityTags {
        CompatibilityTags { level, internal }
    }

    const MATURITIES: [Maturity; 4] = [
        Maturity::GenerallyAvailable,
        Maturity::Prerelease,
        Maturity::Experimental,
        Maturity::Unclassified,
    ];

    #[test]
    fn neither_level_nor_internal_fails_everywhere() {
        for maturity in MATURITIES {
            assert_eq!(
                validate("Foo", &tags(false, None), maturity),
                Err(PolicyViolation::LevelOrInternalRequired {
                    type_name: "Foo".to_string()
                })
            );
        }
    }

    #[test]
    fn internal_without_level_defaults_to_4() {
        for maturity in MATURITIES {
            assert_eq!(validate("Foo", &tags(true, None), maturity), Ok(Level4));
        }
    }

    #[test]
    fn internal_only_allows_level_4() {
        for maturity in MATURITIES {
            assert_eq!(validate("Foo", &tags(true, Some(Level4)), maturity), Ok(Level4));
            for level in [Level1, Level2, Level3] {
                assert!(matches!(
                    validate("Foo", &tags(true, Some(level)), maturity),
                    Err(PolicyViolation::InternalRequiresLevel4 { .. })
                ));
            }
        }
    }

    #[test]
    fn unclassified_versions_must_be_internal() {
        for level in CompatibilityLevel::ALL {
            assert!(matches!(
                validate("Foo", &tags(false, Some(level)), Maturity::Unclassified),
                Err(PolicyViolation::UnrecognizedVersion { .. })
            ));
        }
    }

    #[test]
    fn generally_available_requires_level_1() {
        let ga = Maturity::GenerallyAvailable;
        assert_eq!(validate("Foo", &tags(false, Some(Level1)), ga), Ok(Level1));
        for level in [Level2, Level3, Level4] {
            assert!(matches!(
                validate("Foo", &tags(false, Some(level)), ga),
                Err(PolicyViolation::GenerallyAvailableRequiresLevel1 { .. })
            ));
        }
    }

    #[test]
    fn prerelease_accepts_levels_2_and_3() {
        let beta = Maturity::Prerelease;
        assert_eq!(validate("Foo", &tags(false, Some(Level2)), beta), Ok(Level2));
        assert_eq!(validate("Foo", &tags(false, Some(Level3)), beta), Ok(Level3));
        assert!(matches!(
            validate("Foo", &tags(false, Some(Level1)), beta),
            Err(PolicyViolation::PrereleaseLevelTooStrong { .. })
        ));
        assert!(matches!(
            validate("Foo", &tags(false, Some(Level4)), beta),
            Err(PolicyViolation::PrereleaseLevelTooWeak { .. })
        ));
    }

    #[test]
    fn experimental_requires_level_4() {
        let alpha = Maturity::Experimental;
        assert_eq!(validate("Foo", &tags(false, Some(Level4)), alpha), Ok(Level4));
        for level in [Level1, Level2, Level3] {
            assert!(matches!(
                validate("Foo", &tags(false, Some(level)), alpha),
                Err(PolicyViolation::ExperimentalRequiresLevel4 { .. })
            ));
        }
    }

    #[test]
    fn violation_messages() {
        let err = validate("Foo", &tags(false, None), Maturity::GenerallyAvailable).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Foo: level or internal must be specified");

        let err = validate("Foo", &tags(false, Some(Level2)), Maturity::GenerallyAvailable)
            .unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Foo: generally available APIs must be supported for a minimum of 12 months"
        );

        let err = validate("Foo", &tags(false, Some(Level1)), Maturity::Unclassified).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Foo: APIs whose versions do not conform to kube apiVersion format cannot be exposed: the Foo API must be tagged with +openshift:compatibility-gen:internal"
        );
    }
}
