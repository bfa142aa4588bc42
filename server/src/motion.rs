// SPDX-License-Identifier: AGPL-3.0-or-later

//! The motion constrainer: given a starting position already on the road
//! network, a velocity and a time step, computes the final position and
//! whether the move was clipped by a road boundary.

use common::{Error, Map};
use glam::Vec2;

const EPSILON: f32 = 1e-4;

/// Computes `start + velocity * dt`, clamped to the road strip(s)
/// containing `start`. Motion can continue onto any road whose strip also
/// contains `start` — a dog at a junction picks whichever strip carries it
/// furthest along its velocity.
pub fn constrain(map: &Map, start: Vec2, velocity: Vec2, dt: f32) -> Result<(Vec2, bool), Error> {
    if velocity == Vec2::ZERO {
        return Ok((start, false));
    }

    let target = start + velocity * dt;
    let direction = velocity.normalize();

    let mut containing = map
        .roads
        .iter()
        .map(|road| road.strip())
        .filter(|strip| strip.contains(start))
        .peekable();

    if containing.peek().is_none() {
        return Err(Error::WorldInvariant(format!(
            "dog at {start:?} is not on any road strip of map {}",
            map.id
        )));
    }

    let mut best = start;
    let mut best_progress = f32::NEG_INFINITY;
    for strip in containing {
        let candidate = strip.clamp(target);
        let progress = (candidate - start).dot(direction);
        if progress > best_progress {
            best_progress = progress;
            best = candidate;
        }
    }

    let clipped = best.distance(target) > EPSILON;
    Ok((best, clipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::world::{MapConfig, RoadConfig, WorldConfig};
    use common::World;

    fn single_road_map(x1: i32) -> common::Map {
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
                    x1,
                    y1: 0,
                }],
                buildings: vec![],
                offices: vec![],
                loot_types: vec![],
            }],
        };
        let mut world = World::from_config(config).unwrap();
        world.maps.remove(&common::MapId("m".into())).unwrap()
    }

    #[test]
    fn zero_velocity_is_a_no_op() {
        let map = single_road_map(10);
        let (end, clipped) = constrain(&map, Vec2::new(3.0, 0.0), Vec2::ZERO, 1.0).unwrap();
        assert_eq!(end, Vec2::new(3.0, 0.0));
        assert!(!clipped);
    }

    #[test]
    fn unconstrained_motion_is_not_clipped() {
        let map = single_road_map(10);
        let (end, clipped) =
            constrain(&map, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 1.0).unwrap();
        assert_eq!(end, Vec2::new(5.0, 0.0));
        assert!(!clipped);
    }

    #[test]
    fn motion_past_the_road_end_is_clipped() {
        let map = single_road_map(5);
        let (end, clipped) =
            constrain(&map, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 1.0).unwrap();
        assert_eq!(end, Vec2::new(5.0, 0.0));
        assert!(clipped);
    }

    #[test]
    fn off_road_start_is_a_world_invariant_error() {
        let map = single_road_map(10);
        let result = constrain(&map, Vec2::new(0.0, 100.0), Vec2::new(1.0, 0.0), 1.0);
        assert!(matches!(result, Err(Error::WorldInvariant(_))));
    }
}
