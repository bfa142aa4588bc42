// SPDX-License-Identifier: AGPL-3.0-or-later

//! The per-map immutable topology (roads, buildings, offices, loot-type
//! catalog) plus the mutable set of loot items currently present, and the
//! format-agnostic configuration structs used to build it. Loading a TOML
//! (or any other serde format) document into [`WorldConfig`] is the
//! caller's job — kept out of this crate, which only validates the result.

use crate::error::Error;
use crate::geometry::{Orientation, Point, Rect, Road};
use crate::ids::{LootItemId, LootTypeId, MapId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::HashMap;

/// One entry of a map's loot-type catalog.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LootType {
    pub index: LootTypeId,
    pub value: f32,
}

/// A piece of loot sitting on the map, waiting to be picked up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    pub id: LootItemId,
    pub type_index: LootTypeId,
    pub value: f32,
    pub position: Vec2,
}

/// Informational-only obstacle; does not clip motion.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub rect: Rect,
}

/// A deposit point that converts bag contents to score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub id: String,
    pub position: Point,
    pub offset: Point,
}

impl Office {
    pub fn world_position(&self) -> Vec2 {
        Vec2::new(
            (self.position.x + self.offset.x) as f32,
            (self.position.y + self.offset.y) as f32,
        )
    }
}

/// Per-map immutable topology plus the mutable loot population.
#[derive(Debug)]
pub struct Map {
    pub id: MapId,
    pub name: String,
    pub roads: Vec<Road>,
    pub buildings: Vec<Building>,
    pub offices: Vec<Office>,
    pub loot_types: Vec<LootType>,
    pub dog_speed: f32,
    pub bag_capacity: usize,
    pub loot: IndexMap<LootItemId, LootItem>,
}

impl Map {
    /// Whether `p` lies in the union of this map's road strips.
    pub fn is_on_road(&self, p: Vec2) -> bool {
        self.roads.iter().any(|road| road.strip().contains(p))
    }

    /// The default spawn position: the start of the first road.
    pub fn default_spawn_point(&self) -> Vec2 {
        self.roads
            .first()
            .map(|road| road.start.to_vec2())
            .unwrap_or(Vec2::ZERO)
    }

    #[cfg(feature = "server")]
    pub fn random_spawn_point(&self, rng: &mut impl rand::Rng) -> Vec2 {
        if self.roads.is_empty() {
            return Vec2::ZERO;
        }
        let lengths: Vec<f32> = self
            .roads
            .iter()
            .map(|road| match road.orientation {
                Orientation::Horizontal => (road.end as f32 - road.start.x as f32).abs().max(1.0),
                Orientation::Vertical => (road.end as f32 - road.start.y as f32).abs().max(1.0),
            })
            .collect();
        let total: f32 = lengths.iter().sum();
        let mut pick = rng.gen_range(0.0..total);
        let mut chosen = &self.roads[0];
        for (road, len) in self.roads.iter().zip(lengths.iter()) {
            if pick < *len {
                chosen = road;
                break;
            }
            pick -= len;
        }
        match chosen.orientation {
            Orientation::Horizontal => {
                let x = rng.gen_range(
                    chosen.start.x.min(chosen.end) as f32..=chosen.start.x.max(chosen.end) as f32,
                );
                Vec2::new(x, chosen.start.y as f32)
            }
            Orientation::Vertical => {
                let y = rng.gen_range(
                    chosen.start.y.min(chosen.end) as f32..=chosen.start.y.max(chosen.end) as f32,
                );
                Vec2::new(chosen.start.x as f32, y)
            }
        }
    }
}

/// The set of all maps, loaded once at startup. Exclusively owned by the
/// Application façade; the only mutable part of a [`Map`] is its `loot`
/// set, touched by the loot generator and the collision resolver.
#[derive(Debug)]
pub struct World {
    pub maps: HashMap<MapId, Map>,
    pub dog_retirement_time_seconds: f32,
}

impl World {
    pub fn from_config(config: WorldConfig) -> Result<Self, Error> {
        if config.maps.is_empty() {
            return Err(Error::Configuration("no maps configured".into()));
        }
        let mut maps = HashMap::new();
        for map_config in config.maps {
            let map = build_map(&config, map_config)?;
            if maps.insert(map.id.clone(), map).is_some() {
                return Err(Error::Configuration("duplicate map id".into()));
            }
        }
        Ok(Self {
            maps,
            dog_retirement_time_seconds: config.dog_retirement_time,
        })
    }

    pub fn map(&self, id: &MapId) -> Option<&Map> {
        self.maps.get(id)
    }

    pub fn map_mut(&mut self, id: &MapId) -> Option<&mut Map> {
        self.maps.get_mut(id)
    }
}

fn build_map(config: &WorldConfig, map_config: MapConfig) -> Result<Map, Error> {
    if map_config.roads.is_empty() {
        return Err(Error::Configuration(format!(
            "map {} has no roads",
            map_config.id
        )));
    }
    let roads = map_config
        .roads
        .iter()
        .map(|r| r.to_road())
        .collect::<Result<Vec<_>, _>>()?;
    let buildings = map_config
        .buildings
        .iter()
        .map(|b| Building {
            rect: Rect::new(b.x, b.y, b.w, b.h),
        })
        .collect();
    let offices = map_config
        .offices
        .iter()
        .map(|o| Office {
            id: o.id.clone(),
            position: Point::new(o.x, o.y),
            offset: Point::new(o.offset_x, o.offset_y),
        })
        .collect();
    let loot_types = map_config
        .loot_types
        .iter()
        .enumerate()
        .map(|(i, t)| LootType {
            index: LootTypeId(i + 1),
            value: t.value.unwrap_or(10.0),
        })
        .collect::<Vec<_>>();
    let loot_types = if loot_types.is_empty() {
        vec![LootType {
            index: LootTypeId(1),
            value: 10.0,
        }]
    } else {
        loot_types
    };

    Ok(Map {
        id: MapId(map_config.id),
        name: map_config.name,
        roads,
        buildings,
        offices,
        loot_types,
        dog_speed: map_config.dog_speed.unwrap_or(config.default_dog_speed),
        bag_capacity: map_config
            .bag_capacity
            .unwrap_or(config.default_bag_capacity) as usize,
        loot: IndexMap::new(),
    })
}

fn default_retirement_time() -> f32 {
    60.0
}

/// Top-level, format-agnostic world configuration. Deserialize with whatever
/// `serde` format the caller prefers (the `server` binary uses TOML).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub default_dog_speed: f32,
    pub default_bag_capacity: u32,
    #[serde(default = "default_retirement_time")]
    pub dog_retirement_time: f32,
    /// Reserved; currently unused. The live loot generator always spawns
    /// a fixed population — see `server::loot`.
    #[serde(default)]
    pub loot_generator_config: serde_json::Value,
    pub maps: Vec<MapConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub id: String,
    pub name: String,
    pub dog_speed: Option<f32>,
    pub bag_capacity: Option<u32>,
    #[serde(default)]
    pub roads: Vec<RoadConfig>,
    #[serde(default)]
    pub buildings: Vec<BuildingConfig>,
    #[serde(default)]
    pub offices: Vec<OfficeConfig>,
    #[serde(default)]
    pub loot_types: Vec<LootTypeConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RoadConfig {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl RoadConfig {
    fn to_road(&self) -> Result<Road, Error> {
        if self.y0 == self.y1 && self.x0 != self.x1 {
            Ok(Road {
                orientation: Orientation::Horizontal,
                start: Point::new(self.x0, self.y0),
                end: self.x1,
            })
        } else if self.x0 == self.x1 && self.y0 != self.y1 {
            Ok(Road {
                orientation: Orientation::Vertical,
                start: Point::new(self.x0, self.y0),
                end: self.y1,
            })
        } else {
            Err(Error::Configuration(format!(
                "road ({},{})-({},{}) is neither horizontal nor vertical",
                self.x0, self.y0, self.x1, self.y1
            )))
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BuildingConfig {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeConfig {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LootTypeConfig {
    pub value: Option<f32>,
}
