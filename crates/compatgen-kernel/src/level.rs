//! Compatibility levels.
//!
//! Level 1 is the strongest promise, level 4 is no promise at all. Each level
//! has a fixed sentence that ends up in the generated comment; downstream
//! tooling matches on these sentences, so they must not change.

/// The stability guarantee an API type offers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum CompatibilityLevel {
    /// Stable for 12 months or 3 minor releases.
    Level1,
    /// Stable for 9 months or 3 minor releases.
    Level2,
    /// Best effort.
    Level3,
    /// None.
    Level4,
}

impl CompatibilityLevel {
    pub const ALL: [Self; 4] = [Self::Level1, Self::Level2, Self::Level3, Self::Level4];

    pub fn number(self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
        }
    }

    /// The fixed explanatory sentence for this level.
    pub fn sentence(self) -> &'static str {
        match self {
            Self::Level1 => {
                "Stable within a major release for a minimum of 12 months or 3 minor releases (whichever is longer)."
            }
            Self::Level2 => {
                "Stable within a major release for a minimum of 9 months or 3 minor releases (whichever is longer)."
            }
            Self::Level3 => {
                "Will attempt to be as compatible from version to version as possible, but version to version compatibility is not guaranteed."
            }
            Self::Level4 => {
                "No compatibility is provided, the API can change at any point for any reason. These capabilities should not be used by applications needing long term support."
            }
        }
    }
}

impl From<CompatibilityLevel> for u8 {
    fn from(level: CompatibilityLevel) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for CompatibilityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Level1),
            2 => Ok(Self::Level2),
            3 => Ok(Self::Level3),
            4 => Ok(Self::Level4),
            _ => Err(format!("compatibility level must be 1, 2, 3 or 4, got {value}")),
        }
    }
}

impl std::fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::str::FromStr for CompatibilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not an integer: {s:?}"))?;
        u8::try_from(value)
            .map_err(|_| format!("compatibility level must be 1, 2, 3 or 4, got {value}"))
            .and_then(Self::try_from)
    }
}
