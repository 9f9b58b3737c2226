//! Village-wide stockpile of wood, food and herbs.
use bevy::prelude::*;

use crate::world::nodes::ResourceKind;

/// Shared stores. Herbs are counted under [`ResourceKind::Plants`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stockpile {
    wood: u32,
    food: u32,
    herbs: u32,
}

impl Stockpile {
    pub fn new(wood: u32, food: u32, herbs: u32) -> Self {
        Self { wood, food, herbs }
    }

    pub fn wood(&self) -> u32 {
        self.wood
    }

    pub fn food(&self) -> u32 {
        self.food
    }

    pub fn herbs(&self) -> u32 {
        self.herbs
    }

    pub fn quantity_of(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Food => self.food,
            ResourceKind::Plants => self.herbs,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, quantity: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(quantity);
    }

    /// Removes `quantity` if it is fully available; otherwise leaves the
    /// stockpile untouched and returns false.
    pub fn spend(&mut self, kind: ResourceKind, quantity: u32) -> bool {
        let slot = self.slot_mut(kind);
        if *slot < quantity {
            return false;
        }
        *slot -= quantity;
        true
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Plants => &mut self.herbs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stockpile_manages_quantities() {
        let mut stockpile = Stockpile::new(10, 1, 0);

        stockpile.add(ResourceKind::Wood, 12);
        stockpile.add(ResourceKind::Plants, 3);
        assert_eq!(stockpile.wood(), 22);
        assert_eq!(stockpile.quantity_of(ResourceKind::Plants), 3);

        assert!(!stockpile.spend(ResourceKind::Food, 2));
        assert_eq!(stockpile.food(), 1);
        assert!(stockpile.spend(ResourceKind::Wood, 5));
        assert_eq!(stockpile.wood(), 17);
        assert!(stockpile.spend(ResourceKind::Food, 0));
    }
}
