// SPDX-License-Identifier: AGPL-3.0-or-later

//! The loot generator: keeps each map populated with a minimal, fixed
//! population of pickups. Runs once per tick, after motion and collision.

use common::ids::IdCounter;
use common::{LootItem, LootItemId, LootType, LootTypeId, Map};
use glam::Vec2;

/// Items spawned onto an empty map.
const SPAWN_COUNT: usize = 5;

/// Fixed fractions along the map's first road, evenly spread so the spawn
/// positions don't depend on the road's length.
const SEED_FRACTIONS: [f32; SPAWN_COUNT] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// If `map.loot` is empty, spawns [`SPAWN_COUNT`] items at fixed positions
/// along its first road. A no-op on a map with no roads (rejected at
/// config-load time, so this is defensive rather than reachable) or whose
/// loot set is already non-empty.
pub fn replenish(map: &mut Map, ids: &mut IdCounter) {
    if !map.loot.is_empty() {
        return;
    }
    let Some(road) = map.roads.first() else {
        return;
    };

    let loot_type = map
        .loot_types
        .iter()
        .find(|t| t.index == LootTypeId(1))
        .copied()
        .unwrap_or(LootType {
            index: LootTypeId(1),
            value: 10.0,
        });

    let strip = road.strip();
    let start = strip.rect.min;
    let end = strip.rect.max;
    let center = (start + end) * 0.5;
    let span = end - start;

    for fraction in SEED_FRACTIONS {
        let position = match road.orientation {
            common::geometry::Orientation::Horizontal => {
                Vec2::new(start.x + span.x * fraction, center.y)
            }
            common::geometry::Orientation::Vertical => {
                Vec2::new(center.x, start.y + span.y * fraction)
            }
        };
        let id = LootItemId(ids.next());
        map.loot.insert(
            id,
            LootItem {
                id,
                type_index: loot_type.index,
                value: loot_type.value,
                position,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::world::{MapConfig, RoadConfig, WorldConfig};
    use common::{MapId, World};

    fn single_road_map() -> Map {
        let config = WorldConfig {
            default_dog_speed: 5.0,
            default_bag_capacity: 3,
            dog_retirement_time: 60.0,
            loot_generator_config: serde_json::Value::Null,
            maps: vec![MapConfig {
                id: "m".into(),
                name: "m".into(),
                dog_speed: None,
                bag_capacity: None,
                roads: vec![RoadConfig {
                    x0: 0,
                    y0: 0,
                    x1: 10,
                    y1: 0,
                }],
                buildings: vec![],
                offices: vec![],
                loot_types: vec![],
            }],
        };
        let mut world = World::from_config(config).unwrap();
        world.maps.remove(&MapId("m".into())).unwrap()
    }

    #[test]
    fn spawns_five_items_on_an_empty_map() {
        let mut map = single_road_map();
        let mut ids = IdCounter::default();
        replenish(&mut map, &mut ids);
        assert_eq!(map.loot.len(), SPAWN_COUNT);
        for item in map.loot.values() {
            assert_eq!(item.type_index, LootTypeId(1));
            assert_eq!(item.value, 10.0);
            assert!(map.is_on_road(item.position));
        }
    }

    #[test]
    fn does_not_replenish_a_non_empty_map() {
        let mut map = single_road_map();
        let mut ids = IdCounter::default();
        replenish(&mut map, &mut ids);
        let first_id = *map.loot.keys().next().unwrap();
        replenish(&mut map, &mut ids);
        assert_eq!(map.loot.len(), SPAWN_COUNT);
        assert!(map.loot.contains_key(&first_id));
    }

    #[test]
    fn item_ids_are_never_reissued() {
        let mut map = single_road_map();
        let mut ids = IdCounter::default();
        replenish(&mut map, &mut ids);
        let first_round: Vec<LootItemId> = map.loot.keys().copied().collect();
        map.loot.clear();
        replenish(&mut map, &mut ids);
        let second_round: Vec<LootItemId> = map.loot.keys().copied().collect();
        for id in second_round {
            assert!(!first_round.contains(&id));
        }
    }

    #[test]
    fn a_configured_loot_type_overrides_the_default_value() {
        let config = WorldConfig {
            default_dog_speed: 5.0,
            default_bag_capacity: 3,
            dog_retirement_time: 60.0,
            loot_generator_config: serde_json::Value::Null,
            maps: vec![MapConfig {
                id: "m".into(),
                name: "m".into(),
                dog_speed: None,
                bag_capacity: None,
                roads: vec![RoadConfig {
                    x0: 0,
                    y0: 0,
                    x1: 10,
                    y1: 0,
                }],
                buildings: vec![],
                offices: vec![],
                loot_types: vec![common::world::LootTypeConfig { value: Some(25.0) }],
            }],
        };
        let mut world = World::from_config(config).unwrap();
        let mut map = world.maps.remove(&MapId("m".into())).unwrap();
        let mut ids = IdCounter::default();
        replenish(&mut map, &mut ids);
        for item in map.loot.values() {
            assert_eq!(item.type_index, LootTypeId(1));
            assert_eq!(item.value, 25.0);
        }
    }
}
