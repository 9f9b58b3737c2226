//! Economy messages emitted when meeples bring in stores or light the fire.
use bevy::prelude::{Event, Message};

use crate::{
    meeple::components::MeepleId,
    world::nodes::{NodeId, ResourceKind},
};

#[derive(Event, Message, Debug, Clone)]
pub struct HarvestCompletedEvent {
    pub day: u32,
    pub meeple: MeepleId,
    pub node: NodeId,
    pub resource: ResourceKind,
    pub quantity: u32,
}

#[derive(Event, Message, Debug, Clone)]
pub struct FireLitEvent {
    pub day: u32,
    pub meeple: MeepleId,
    pub hours_added: f32,
    pub hours_left: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvest_event_exposes_fields() {
        let event = HarvestCompletedEvent {
            day: 3,
            meeple: MeepleId::new(1),
            node: NodeId::new(105),
            resource: ResourceKind::Food,
            quantity: 12,
        };

        assert_eq!(event.quantity, 12);
        assert_eq!(event.resource, ResourceKind::Food);
        assert_eq!(event.meeple.to_string(), "MEEPLE-0001");
        assert_eq!(event.node.to_string(), "NODE-0105");
    }
}
