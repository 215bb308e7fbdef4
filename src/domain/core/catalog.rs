use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Official hotel classification
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum Classification {
    Unrated,
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
    GrandTourism,
}

impl Classification {
    pub const ALL: [Classification; 7] = [
        Self::Unrated,
        Self::OneStar,
        Self::TwoStars,
        Self::ThreeStars,
        Self::FourStars,
        Self::FiveStars,
        Self::GrandTourism,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Unrated => "SC",
            Self::OneStar => "1E",
            Self::TwoStars => "2E",
            Self::ThreeStars => "3E",
            Self::FourStars => "4E",
            Self::FiveStars => "5E",
            Self::GrandTourism => "GT",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Classification {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| CatalogError::UnknownClassification { code: s.to_owned() })
    }
}

/// Room type offered by a hotel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum RoomKind {
    Single,
    Double,
    Matrimonial,
    Triple,
    Quadruple,
    Standard,
    Superior,
    Deluxe,
    Executive,
    JuniorSuite,
    Suite,
    PresidentialSuite,
}

impl RoomKind {
    pub const ALL: [RoomKind; 12] = [
        Self::Single,
        Self::Double,
        Self::Matrimonial,
        Self::Triple,
        Self::Quadruple,
        Self::Standard,
        Self::Superior,
        Self::Deluxe,
        Self::Executive,
        Self::JuniorSuite,
        Self::Suite,
        Self::PresidentialSuite,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Single => "SENCILLA",
            Self::Double => "DOBLE",
            Self::Matrimonial => "MATRIMONIAL",
            Self::Triple => "TRIPLE",
            Self::Quadruple => "CUADRUPLE",
            Self::Standard => "ESTANDAR",
            Self::Superior => "SUPERIOR",
            Self::Deluxe => "DELUXE",
            Self::Executive => "EJECUTIVA",
            Self::JuniorSuite => "JUNIOR_SUITE",
            Self::Suite => "SUITE",
            Self::PresidentialSuite => "SUITE_PRESIDENCIAL",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RoomKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == s)
            .ok_or_else(|| CatalogError::UnknownRoomKind { code: s.to_owned() })
    }
}

/// Catalog lookup error
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[display(fmt = "Unknown hotel classification '{}'", code)]
    UnknownClassification { code: String },
    #[display(fmt = "Unknown room type '{}'", code)]
    UnknownRoomKind { code: String },
}
