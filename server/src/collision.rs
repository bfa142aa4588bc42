// SPDX-License-Identifier: AGPL-3.0-or-later

//! The collision resolver: for a dog's per-tick motion segment, finds
//! pickups and office-returns ordered by time-of-impact and applies their
//! inventory effects.

use common::geometry::{ITEM_PICKUP_RADIUS, OFFICE_RETURN_RADIUS};
use common::{BagItem, Dog, LootItemId, Map};
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Kind {
    Pickup(LootItemId),
    OfficeReturn,
}

#[derive(Copy, Clone, Debug)]
struct Event {
    t: f32,
    order: usize,
    kind: Kind,
}

/// Earliest `t` in `[0, 1]` at which a point moving along `a -> b` enters
/// the circle of `radius` centered on `center`. A zero-length segment hits
/// at `t = 0` iff it starts inside the circle.
fn earliest_hit(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let d = b - a;
    let f = a - center;
    let a_coef = d.length_squared();

    if a_coef <= f32::EPSILON {
        return (f.length_squared() <= radius * radius).then_some(0.0);
    }

    let c_coef = f.length_squared() - radius * radius;
    if c_coef <= 0.0 {
        // Already inside at the start of the segment.
        return Some(0.0);
    }

    let b_coef = 2.0 * f.dot(d);
    let discriminant = b_coef * b_coef - 4.0 * a_coef * c_coef;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b_coef - sqrt_disc) / (2.0 * a_coef);
    (0.0..=1.0).contains(&t1).then_some(t1)
}

/// Applies every pickup/office-return event along `start -> end`, in
/// ascending time order (ties broken by insertion order), mutating `dog`
/// and `map.loot` in place.
pub fn resolve(dog: &mut Dog, map: &mut Map, start: Vec2, end: Vec2) {
    let mut events = Vec::new();
    let mut order = 0usize;

    for item in map.loot.values() {
        if let Some(t) = earliest_hit(start, end, item.position, ITEM_PICKUP_RADIUS) {
            events.push(Event {
                t,
                order,
                kind: Kind::Pickup(item.id),
            });
            order += 1;
        }
    }
    for office in &map.offices {
        if let Some(t) = earliest_hit(start, end, office.world_position(), OFFICE_RETURN_RADIUS) {
            events.push(Event {
                t,
                order,
                kind: Kind::OfficeReturn,
            });
            order += 1;
        }
    }

    events.sort_by(|a, b| {
        a.t.partial_cmp(&b.t)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.order.cmp(&b.order))
    });

    for event in events {
        match event.kind {
            Kind::Pickup(id) => {
                if dog.bag_is_full(map.bag_capacity) {
                    continue;
                }
                // Already picked up by an earlier event this tick (e.g. two
                // office visits can't double-hit the same item, but a prior
                // pickup event for the same id could in principle appear
                // twice if the sweep test degenerates).
                let Some(item) = map.loot.get(&id) else {
                    continue;
                };
                let bag_item = BagItem {
                    type_index: item.type_index,
                    value: item.value,
                };
                dog.bag.push(bag_item);
                map.loot.shift_remove(&id);
            }
            Kind::OfficeReturn => {
                let total: f32 = dog.bag.iter().map(|item| item.value).sum();
                dog.score += total.round() as i64;
                dog.bag.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::world::{MapConfig, OfficeConfig, RoadConfig, WorldConfig};
    use common::{LootItem, LootItemId, LootTypeId, MapId, World};

    fn map_with_office_and_loot() -> common::Map {
        let config = WorldConfig {
            default_dog_speed: 10.0,
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
                offices: vec![OfficeConfig {
                    id: "office".into(),
                    x: 8,
                    y: 0,
                    offset_x: 0,
                    offset_y: 0,
                }],
                loot_types: vec![],
            }],
        };
        let mut world = World::from_config(config).unwrap();
        let mut map = world.maps.remove(&MapId("m".into())).unwrap();
        map.loot.insert(
            LootItemId(1),
            LootItem {
                id: LootItemId(1),
                type_index: LootTypeId(1),
                value: 10.0,
                position: Vec2::new(2.0, 0.0),
            },
        );
        map
    }

    #[test]
    fn picks_up_loot_along_the_path() {
        let mut map = map_with_office_and_loot();
        let mut dog = Dog::new(common::DogId(1), "rex".into(), map.id.clone(), Vec2::ZERO);
        resolve(&mut dog, &mut map, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0));
        assert_eq!(dog.bag.len(), 1);
        assert!(map.loot.is_empty());
    }

    #[test]
    fn full_bag_skips_pickup_but_keeps_moving() {
        let mut map = map_with_office_and_loot();
        let mut dog = Dog::new(common::DogId(1), "rex".into(), map.id.clone(), Vec2::ZERO);
        dog.bag = vec![
            BagItem {
                type_index: LootTypeId(1),
                value: 10.0,
            };
            map.bag_capacity
        ];
        let before = dog.bag.len();
        resolve(&mut dog, &mut map, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0));
        assert_eq!(dog.bag.len(), before);
        assert_eq!(map.loot.len(), 1);
    }

    #[test]
    fn pickup_then_return_in_one_tick_scores_and_empties_bag() {
        let mut map = map_with_office_and_loot();
        let mut dog = Dog::new(common::DogId(1), "rex".into(), map.id.clone(), Vec2::ZERO);
        resolve(
            &mut dog,
            &mut map,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert_eq!(dog.score, 10);
        assert!(dog.bag.is_empty());
        assert!(map.loot.is_empty());
    }
}
