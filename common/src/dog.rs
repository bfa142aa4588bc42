// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::ids::{DogId, LootTypeId, MapId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// The direction a dog is facing. Preserved across stop actions (an empty
/// move stops the dog but does not change `facing`).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, EnumString, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[strum(serialize = "U")]
    North,
    #[strum(serialize = "D")]
    South,
    #[strum(serialize = "R")]
    East,
    #[strum(serialize = "L")]
    West,
}

impl Direction {
    /// Unit vector this direction moves along, in world coordinates (+y is
    /// "down"/south, matching the move codes U/D/L/R).
    pub fn unit_vector(self) -> Vec2 {
        match self {
            Direction::North => Vec2::new(0.0, -1.0),
            Direction::South => Vec2::new(0.0, 1.0),
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::West => Vec2::new(-1.0, 0.0),
        }
    }
}

/// A single piece of loot sitting in a dog's bag. Keeps the catalog type and
/// value it had at the moment of pickup, independent of later map changes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BagItem {
    pub type_index: LootTypeId,
    pub value: f32,
}

/// A player's avatar: the moving entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub owner: String,
    pub map_id: MapId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Direction,
    pub bag: Vec<BagItem>,
    pub score: i64,
}

impl Dog {
    pub fn new(id: DogId, owner: String, map_id: MapId, position: Vec2) -> Self {
        Self {
            id,
            owner,
            map_id,
            position,
            velocity: Vec2::ZERO,
            facing: Direction::default(),
            bag: Vec::new(),
            score: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.velocity == Vec2::ZERO
    }

    pub fn bag_is_full(&self, capacity: usize) -> bool {
        self.bag.len() >= capacity
    }
}
