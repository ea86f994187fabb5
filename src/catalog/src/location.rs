// src/catalog/src/location.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// World locations. Only battlegrounds spawn enemies.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Location {
    #[default]
    #[strum(serialize = "Desa Awal")]
    #[serde(rename = "Desa Awal")]
    StartingVillage,
    #[strum(serialize = "Hutan Misterius")]
    #[serde(rename = "Hutan Misterius")]
    MysteriousForest,
    #[strum(serialize = "Gua Terlarang")]
    #[serde(rename = "Gua Terlarang")]
    ForbiddenCave,
    #[strum(serialize = "Danau Ajaib")]
    #[serde(rename = "Danau Ajaib")]
    EnchantedLake,
    #[strum(serialize = "Gunung Berapi")]
    #[serde(rename = "Gunung Berapi")]
    Volcano,
    #[strum(serialize = "Kota Tua")]
    #[serde(rename = "Kota Tua")]
    OldTown,
    #[strum(serialize = "Istana Kerajaan")]
    #[serde(rename = "Istana Kerajaan")]
    RoyalPalace,
}

impl Location {
    pub fn is_battleground(&self) -> bool {
        !matches!(self, Location::StartingVillage)
    }

    pub fn battlegrounds() -> impl Iterator<Item = Location> {
        Location::iter().filter(Location::is_battleground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_six_battlegrounds() {
        assert_eq!(Location::battlegrounds().count(), 6);
        assert!(!Location::StartingVillage.is_battleground());
    }

    #[test]
    fn test_display_names_match_save_names() {
        assert_eq!(Location::MysteriousForest.to_string(), "Hutan Misterius");
        assert_eq!(Location::from_str("Kota Tua").unwrap(), Location::OldTown);
        let json = serde_json::to_string(&Location::RoyalPalace).unwrap();
        assert_eq!(json, "\"Istana Kerajaan\"");
    }
}
