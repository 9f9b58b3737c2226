//! Harvestable trees and herb plants around the camp.
use std::{f32::consts::TAU, fmt};

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::load_or_default;

const CONFIG_PATH: &str = "config/world.toml";

/// Stable identifier of a tree or plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NODE-{:04}", self.0)
    }
}

/// What a gather order is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Food,
    Plants,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Food => "food",
            Self::Plants => "plants",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub position: Vec3,
    /// Wood never runs out; kept for symmetry with the food flag.
    pub wood_available: bool,
    pub food_available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantNode {
    pub id: NodeId,
    pub position: Vec3,
    pub available: bool,
}

/// Registry of every resource node. Nodes are never removed; depleted ones
/// simply stay unavailable.
#[derive(Resource, Debug, Clone, Default)]
pub struct ResourceWorld {
    trees: Vec<TreeNode>,
    plants: Vec<PlantNode>,
}

impl ResourceWorld {
    pub fn from_nodes(trees: Vec<TreeNode>, plants: Vec<PlantNode>) -> Self {
        Self { trees, plants }
    }

    /// Scatters trees and plants in rings around the camp.
    pub fn generate(settings: &ForestSettings, rng: &mut impl Rng) -> Self {
        let mut trees: Vec<TreeNode> = Vec::with_capacity(settings.tree_count);
        let mut attempts = 0u32;

        while trees.len() < settings.tree_count && attempts < settings.max_attempts {
            attempts += 1;
            let position = ring_position(rng, settings.tree_min_radius, settings.tree_max_radius);
            let crowded = trees
                .iter()
                .any(|tree| tree.position.distance(position) < settings.tree_min_spacing);
            if crowded {
                continue;
            }

            trees.push(TreeNode {
                id: NodeId::new(settings.tree_id_offset + attempts),
                position,
                wood_available: true,
                food_available: rng.gen_bool(settings.food_chance),
            });
        }

        let plants = (0..settings.plant_count)
            .map(|index| PlantNode {
                id: NodeId::new(settings.plant_id_offset + index as u32),
                position: ring_position(rng, settings.plant_min_radius, settings.plant_max_radius),
                available: true,
            })
            .collect();

        Self { trees, plants }
    }

    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    pub fn plants(&self) -> &[PlantNode] {
        &self.plants
    }

    pub fn tree(&self, id: NodeId) -> Option<&TreeNode> {
        self.trees.iter().find(|tree| tree.id == id)
    }

    pub fn plant(&self, id: NodeId) -> Option<&PlantNode> {
        self.plants.iter().find(|plant| plant.id == id)
    }

    /// Claims one harvest of `kind` from node `id`. Returns false when the node
    /// is missing or its depletable resource is already gone.
    pub fn take(&mut self, id: NodeId, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Wood => self
                .trees
                .iter()
                .any(|tree| tree.id == id && tree.wood_available),
            ResourceKind::Food => match self.trees.iter_mut().find(|tree| tree.id == id) {
                Some(tree) if tree.food_available => {
                    tree.food_available = false;
                    true
                }
                _ => false,
            },
            ResourceKind::Plants => match self.plants.iter_mut().find(|plant| plant.id == id) {
                Some(plant) if plant.available => {
                    plant.available = false;
                    true
                }
                _ => false,
            },
        }
    }
}

fn ring_position(rng: &mut impl Rng, min_radius: f32, max_radius: f32) -> Vec3 {
    let radius = rng.gen_range(min_radius..=max_radius);
    let theta = rng.gen_range(0.0..TAU);
    Vec3::new(radius * theta.sin(), 0.0, radius * theta.cos())
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawWorldConfig {
    #[serde(default)]
    forest: RawForestSection,
    #[serde(default)]
    plants: RawPlantSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawForestSection {
    tree_count: usize,
    max_attempts: u32,
    min_radius: f32,
    max_radius: f32,
    min_spacing: f32,
    food_chance: f64,
    id_offset: u32,
}

impl Default for RawForestSection {
    fn default() -> Self {
        Self {
            tree_count: 60,
            max_attempts: 1000,
            min_radius: 6.0,
            max_radius: 50.0,
            min_spacing: 3.0,
            food_chance: 0.25,
            id_offset: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlantSection {
    count: usize,
    min_radius: f32,
    max_radius: f32,
    id_offset: u32,
}

impl Default for RawPlantSection {
    fn default() -> Self {
        Self {
            count: 15,
            min_radius: 8.0,
            max_radius: 28.0,
            id_offset: 2000,
        }
    }
}

/// World-generation parameters from `config/world.toml`.
#[derive(Resource, Debug, Clone)]
pub struct ForestSettings {
    pub tree_count: usize,
    pub max_attempts: u32,
    pub tree_min_radius: f32,
    pub tree_max_radius: f32,
    pub tree_min_spacing: f32,
    pub food_chance: f64,
    pub tree_id_offset: u32,
    pub plant_count: usize,
    pub plant_min_radius: f32,
    pub plant_max_radius: f32,
    pub plant_id_offset: u32,
}

impl ForestSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawWorldConfig>(CONFIG_PATH).into()
    }
}

impl Default for ForestSettings {
    fn default() -> Self {
        RawWorldConfig::default().into()
    }
}

impl From<RawWorldConfig> for ForestSettings {
    fn from(value: RawWorldConfig) -> Self {
        let forest = value.forest;
        let plants = value.plants;
        let (tree_min_radius, tree_max_radius) = ordered_radii(forest.min_radius, forest.max_radius);
        let (plant_min_radius, plant_max_radius) =
            ordered_radii(plants.min_radius, plants.max_radius);
        let food_chance = if forest.food_chance.is_finite() {
            forest.food_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            tree_count: forest.tree_count,
            max_attempts: forest.max_attempts,
            tree_min_radius,
            tree_max_radius,
            tree_min_spacing: forest.min_spacing.max(0.0),
            food_chance,
            tree_id_offset: forest.id_offset,
            plant_count: plants.count,
            plant_min_radius,
            plant_max_radius,
            plant_id_offset: plants.id_offset,
        }
    }
}

fn ordered_radii(a: f32, b: f32) -> (f32, f32) {
    let a = if a.is_finite() { a.max(0.0) } else { 0.0 };
    let b = if b.is_finite() { b.max(0.0) } else { a };
    (a.min(b), a.max(b))
}
