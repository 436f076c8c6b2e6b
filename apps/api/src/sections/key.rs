use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of resume sections.
///
/// Declaration order is the canonical order used whenever a stored order is
/// absent or incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
    Certifications,
}

impl SectionKey {
    /// Every key in canonical order.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Projects,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Certifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Projects => "projects",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Certifications => "certifications",
        }
    }

    /// Heading text shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::Summary => "Professional Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Projects => "Projects",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section key '{0}'")]
pub struct UnknownSectionKey(pub String);

impl FromStr for SectionKey {
    type Err = UnknownSectionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSectionKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_every_canonical_key() {
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>(), Ok(key));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("Skills".parse::<SectionKey>().is_err());
        assert!("awards".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&SectionKey::Certifications).unwrap();
        assert_eq!(json, "\"certifications\"");
    }
}
