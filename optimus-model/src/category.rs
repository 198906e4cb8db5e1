use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Fixed set of gallery categories. The key is what appears in the `type`
/// query parameter and in the catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CategoryKey {
    Residential,
    Commercial,
    Industrial,
    CivilWorks,
    WashProjects,
}

impl CategoryKey {
    /// Every known key, in the order the landing page lists them.
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::Residential,
        CategoryKey::Commercial,
        CategoryKey::Industrial,
        CategoryKey::CivilWorks,
        CategoryKey::WashProjects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Residential => "residential",
            CategoryKey::Commercial => "commercial",
            CategoryKey::Industrial => "industrial",
            CategoryKey::CivilWorks => "civil-works",
            CategoryKey::WashProjects => "wash-projects",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryKey::Residential => "Residential Projects",
            CategoryKey::Commercial => "Commercial Projects",
            CategoryKey::Industrial => "Industrial Projects",
            CategoryKey::CivilWorks => "Civil Works",
            CategoryKey::WashProjects => "WASH Projects",
        }
    }

    /// Lenient lookup used for URL input: unknown keys yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}
