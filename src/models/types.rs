//! Common domain type definitions
//!
//! Closed enumerations shared by the normalized record and the source table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Region a school is attributed to
///
/// The nine provinces plus the synthetic [`Region::SpecialNeeds`] category, which
/// overrides a school's nominal province when its metadata marks it as a special
/// needs school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Eastern Cape")]
    EasternCape,
    #[serde(rename = "Western Cape")]
    WesternCape,
    #[serde(rename = "Gauteng")]
    Gauteng,
    #[serde(rename = "KwaZulu-Natal")]
    KwaZuluNatal,
    #[serde(rename = "Limpopo")]
    Limpopo,
    #[serde(rename = "Mpumalanga")]
    Mpumalanga,
    #[serde(rename = "North West")]
    NorthWest,
    #[serde(rename = "Northern Cape")]
    NorthernCape,
    #[serde(rename = "Free State")]
    FreeState,
    #[serde(rename = "Special Needs")]
    SpecialNeeds,
}

impl Region {
    /// Every region, in display order
    pub const ALL: [Self; 10] = [
        Self::Gauteng,
        Self::WesternCape,
        Self::EasternCape,
        Self::KwaZuluNatal,
        Self::Limpopo,
        Self::Mpumalanga,
        Self::NorthWest,
        Self::NorthernCape,
        Self::FreeState,
        Self::SpecialNeeds,
    ];

    /// Display name, identical to the serialized form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EasternCape => "Eastern Cape",
            Self::WesternCape => "Western Cape",
            Self::Gauteng => "Gauteng",
            Self::KwaZuluNatal => "KwaZulu-Natal",
            Self::Limpopo => "Limpopo",
            Self::Mpumalanga => "Mpumalanga",
            Self::NorthWest => "North West",
            Self::NorthernCape => "Northern Cape",
            Self::FreeState => "Free State",
            Self::SpecialNeeds => "Special Needs",
        }
    }

    /// Short province code used by some sources, `None` for the synthetic category
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::EasternCape => Some("EC"),
            Self::WesternCape => Some("WC"),
            Self::Gauteng => Some("GT"),
            Self::KwaZuluNatal => Some("KZN"),
            Self::Limpopo => Some("LP"),
            Self::Mpumalanga => Some("MP"),
            Self::NorthWest => Some("NW"),
            Self::NorthernCape => Some("NC"),
            Self::FreeState => Some("FS"),
            Self::SpecialNeeds => None,
        }
    }

    /// Region for an exact province code (`"EC"`, `"KZN"`, ...)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.code() == Some(code))
    }

    /// Region for a display name, compared case-insensitively
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Funding sector of a school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    /// State school, also the fallback for unparseable input
    #[default]
    Public,
    /// Independent (private) school
    Independent,
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("PUBLIC"),
            Self::Independent => f.write_str("INDEPENDENT"),
        }
    }
}
