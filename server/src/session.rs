// SPDX-License-Identifier: AGPL-3.0-or-later

//! The session registry: owns every joined [`Player`]/[`Dog`] pair and the
//! three indices (token, player-id, dog-id) that must stay mutually
//! consistent at every quiescent point. Built on surrogate-key maps rather
//! than position-indexed sequences, per the design note that a rewrite
//! should prefer the former.

use common::ids::IdCounter;
use common::{Direction, Dog, DogId, Error, Map, MapId, Player, PlayerId, PlayerMeta, Token};
use fxhash::FxHashMap;
use std::str::FromStr;
use std::time::Instant;

/// Everything the session registry owns for one joined player.
pub struct Session {
    pub player: Player,
    pub meta: PlayerMeta,
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: FxHashMap<PlayerId, Session>,
    dogs: FxHashMap<DogId, Dog>,
    by_token: FxHashMap<Token, PlayerId>,
    ids: IdCounter,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins a new player onto `map`, spawning its dog at `spawn_point`.
    /// `map` is passed in (rather than looked up) so the caller decides the
    /// randomize-spawn policy; this module only wires the result together.
    pub fn join(
        &mut self,
        user_name: String,
        map: &Map,
        spawn_point: glam::Vec2,
        now: Instant,
    ) -> Result<(Token, PlayerId), Error> {
        if user_name.is_empty() {
            return Err(Error::BadRequest("user name must not be empty".into()));
        }

        let id = self.ids.next();
        let player_id = PlayerId(id);
        let dog_id = DogId(id);
        let token = Token::generate();

        let dog = Dog::new(dog_id, user_name.clone(), map.id.clone(), spawn_point);
        let player = Player {
            id: player_id,
            name: user_name,
            dog_id,
            map_id: map.id.clone(),
            token,
        };

        self.dogs.insert(dog_id, dog);
        self.by_token.insert(token, player_id);
        self.sessions.insert(
            player_id,
            Session {
                player,
                meta: PlayerMeta::new(now),
            },
        );

        Ok((token, player_id))
    }

    pub fn find_by_token(&self, token: Token) -> Option<&Player> {
        let player_id = self.by_token.get(&token)?;
        self.sessions.get(player_id).map(|s| &s.player)
    }

    pub fn dog(&self, dog_id: DogId) -> Option<&Dog> {
        self.dogs.get(&dog_id)
    }

    pub fn dog_mut(&mut self, dog_id: DogId) -> Option<&mut Dog> {
        self.dogs.get_mut(&dog_id)
    }

    pub fn players_on_same_map(&self, token: Token) -> Vec<&Player> {
        let Some(subject) = self.find_by_token(token) else {
            return Vec::new();
        };
        let map_id = subject.map_id.clone();
        self.sessions
            .values()
            .map(|s| &s.player)
            .filter(|p| p.map_id == map_id)
            .collect()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.sessions.values().map(|s| &s.player)
    }

    pub fn dogs(&self) -> impl Iterator<Item = &Dog> {
        self.dogs.values()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.sessions.keys().copied()
    }

    pub fn meta(&self, player_id: PlayerId) -> Option<&PlayerMeta> {
        self.sessions.get(&player_id).map(|s| &s.meta)
    }

    pub fn meta_mut(&mut self, player_id: PlayerId) -> Option<&mut PlayerMeta> {
        self.sessions.get_mut(&player_id).map(|s| &mut s.meta)
    }

    /// Applies a move code, mutating the player's dog velocity/facing and
    /// the player's idle-start bookkeeping. `dog_speed` is the owning map's
    /// configured speed.
    pub fn set_action(
        &mut self,
        player_id: PlayerId,
        move_code: &str,
        dog_speed: f32,
        now: Instant,
    ) -> Result<bool, Error> {
        let Some(session) = self.sessions.get(&player_id) else {
            return Ok(false);
        };
        let dog_id = session.player.dog_id;

        if move_code.is_empty() {
            let Some(dog) = self.dogs.get_mut(&dog_id) else {
                return Ok(false);
            };
            dog.velocity = glam::Vec2::ZERO;
            if let Some(meta) = self.sessions.get_mut(&player_id).map(|s| &mut s.meta) {
                if meta.idle_start.is_none() {
                    meta.idle_start = Some(now);
                }
            }
            return Ok(true);
        }

        let Ok(direction) = Direction::from_str(move_code) else {
            return Err(Error::BadRequest(format!("unknown move code: {move_code}")));
        };

        let Some(dog) = self.dogs.get_mut(&dog_id) else {
            return Ok(false);
        };
        dog.facing = direction;
        dog.velocity = direction.unit_vector() * dog_speed;

        if let Some(meta) = self.sessions.get_mut(&player_id).map(|s| &mut s.meta) {
            meta.idle_start = None;
        }
        Ok(true)
    }

    /// Removes every trace of a player: the three indices plus its dog.
    /// Returns the session and dog for the caller to build a
    /// [`common::RetiredRecord`] from, if it existed and wasn't already
    /// retired.
    pub fn remove(&mut self, player_id: PlayerId) -> Option<(Player, PlayerMeta, Dog)> {
        let session = self.sessions.remove(&player_id)?;
        self.by_token.remove(&session.player.token);
        let dog = self.dogs.remove(&session.player.dog_id)?;
        Some((session.player, session.meta, dog))
    }
}

/// Never true by construction alone; exposed for invariant tests that want
/// to assert token/player-id/dog-id indices agree with each other.
#[cfg(test)]
pub(crate) fn indices_consistent(registry: &SessionRegistry) -> bool {
    registry.by_token.len() == registry.sessions.len()
        && registry
            .by_token
            .iter()
            .all(|(token, id)| registry.sessions.get(id).map(|s| &s.player.token) == Some(token))
        && registry
            .sessions
            .values()
            .all(|s| registry.dogs.contains_key(&s.player.dog_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::world::{MapConfig, RoadConfig, WorldConfig};
    use common::World;

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
    fn join_rejects_an_empty_name() {
        let map = single_road_map();
        let mut registry = SessionRegistry::new();
        let result = registry.join(String::new(), &map, glam::Vec2::ZERO, Instant::now());
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    #[test]
    fn join_then_find_by_token_round_trips() {
        let map = single_road_map();
        let mut registry = SessionRegistry::new();
        let (token, player_id) = registry
            .join("rex".into(), &map, glam::Vec2::ZERO, Instant::now())
            .unwrap();
        let player = registry.find_by_token(token).unwrap();
        assert_eq!(player.id, player_id);
        assert!(indices_consistent(&registry));
    }

    #[test]
    fn set_action_with_empty_code_stops_the_dog_and_marks_idle() {
        let map = single_road_map();
        let mut registry = SessionRegistry::new();
        let (token, player_id) = registry
            .join("rex".into(), &map, glam::Vec2::ZERO, Instant::now())
            .unwrap();
        registry
            .set_action(player_id, "R", map.dog_speed, Instant::now())
            .unwrap();
        registry
            .set_action(player_id, "", map.dog_speed, Instant::now())
            .unwrap();
        let dog_id = registry.find_by_token(token).unwrap().dog_id;
        let dog = registry.dog(dog_id).unwrap();
        assert_eq!(dog.velocity, glam::Vec2::ZERO);
        assert_eq!(dog.facing, Direction::East);
        assert!(registry.meta(player_id).unwrap().idle_start.is_some());
    }

    #[test]
    fn set_action_rejects_an_unknown_move_code() {
        let map = single_road_map();
        let mut registry = SessionRegistry::new();
        let (_, player_id) = registry
            .join("rex".into(), &map, glam::Vec2::ZERO, Instant::now())
            .unwrap();
        let result = registry.set_action(player_id, "X", map.dog_speed, Instant::now());
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    #[test]
    fn remove_excises_all_three_indices() {
        let map = single_road_map();
        let mut registry = SessionRegistry::new();
        let (token, player_id) = registry
            .join("rex".into(), &map, glam::Vec2::ZERO, Instant::now())
            .unwrap();
        let (player, _, _) = registry.remove(player_id).unwrap();
        assert!(registry.find_by_token(token).is_none());
        assert!(registry.dog(player.dog_id).is_none());
        assert!(indices_consistent(&registry));
    }
}
