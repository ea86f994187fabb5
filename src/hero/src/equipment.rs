// src/hero/src/equipment.rs
use catalog::ArtifactId;
use thiserror::Error;

/// 最多同时装备的神器数量
pub const MAX_EQUIPPED: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EquipError {
    #[error("all {MAX_EQUIPPED} artifact slots are in use")]
    SlotsFull,
    #[error("{0} is not in the inventory")]
    NotInInventory(String),
    #[error("{0} is not equipped")]
    NotEquipped(String),
    #[error("{0} is already owned")]
    AlreadyOwned(String),
}

/// Equipped artifacts plus carried ones. An id lives in at most one of the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loadout {
    equipped: Vec<ArtifactId>,
    inventory: Vec<ArtifactId>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipped(&self) -> &[ArtifactId] {
        &self.equipped
    }

    pub fn inventory(&self) -> &[ArtifactId] {
        &self.inventory
    }

    pub fn is_equipped(&self, id: &str) -> bool {
        self.equipped.iter().any(|e| e == id)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.is_equipped(id) || self.inventory.iter().any(|e| e == id)
    }

    pub fn free_slots(&self) -> usize {
        MAX_EQUIPPED.saturating_sub(self.equipped.len())
    }

    /// Put a newly acquired artifact into the inventory.
    pub fn stash(&mut self, id: ArtifactId) -> Result<(), EquipError> {
        if self.owns(id.as_str()) {
            return Err(EquipError::AlreadyOwned(id.to_string()));
        }
        self.inventory.push(id);
        Ok(())
    }

    /// Move an artifact from the inventory into a free slot.
    pub fn equip(&mut self, id: &str) -> Result<(), EquipError> {
        if self.equipped.len() >= MAX_EQUIPPED {
            return Err(EquipError::SlotsFull);
        }
        let index = self
            .inventory
            .iter()
            .position(|e| e == id)
            .ok_or_else(|| EquipError::NotInInventory(id.to_string()))?;
        let artifact = self.inventory.remove(index);
        self.equipped.push(artifact);
        Ok(())
    }

    /// Move an equipped artifact back to the end of the inventory.
    pub fn unequip(&mut self, id: &str) -> Result<(), EquipError> {
        let index = self
            .equipped
            .iter()
            .position(|e| e == id)
            .ok_or_else(|| EquipError::NotEquipped(id.to_string()))?;
        let artifact = self.equipped.remove(index);
        self.inventory.push(artifact);
        Ok(())
    }
}
