// SPDX-License-Identifier: AGPL-3.0-or-later

//! The Application façade: the sole mutable owner of the world and the
//! session registry. Every public operation and every tick takes the
//! façade's lock for its full duration; read-only queries take it in shared
//! mode and copy results out before releasing it.

use crate::records::RecordsSink;
use crate::session::SessionRegistry;
use crate::{collision, loot, motion, retirement};
use common::ids::IdCounter;
use common::{Error, MapId, Player, Token, World};
use glam::Vec2;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Optional hook invoked whenever a player retires, in addition to the
/// records sink. Mirrors spec §6.2's `SetRetirementCallback` — most callers
/// don't need it, since the sink already durably records the same data.
pub type RetirementCallback = Box<dyn Fn(&str, i64, f64) + Send + Sync>;

struct AppState {
    world: World,
    sessions: SessionRegistry,
    loot_ids: IdCounter,
    retirement_time: Duration,
    retirement_callback: Option<RetirementCallback>,
}

/// The façade itself. Cheap to clone (an `Arc` around it is the caller's
/// job); internally a single [`RwLock`].
pub struct Application {
    state: RwLock<AppState>,
    sink: Box<dyn RecordsSink>,
}

impl Application {
    pub fn new(world: World, sink: Box<dyn RecordsSink>) -> Self {
        let retirement_time = Duration::from_secs_f32(world.dog_retirement_time_seconds);
        Self {
            state: RwLock::new(AppState {
                world,
                sessions: SessionRegistry::new(),
                loot_ids: IdCounter::default(),
                retirement_time,
                retirement_callback: None,
            }),
            sink,
        }
    }

    pub fn set_retirement_callback(&self, callback: RetirementCallback) {
        self.state.write().unwrap().retirement_callback = Some(callback);
    }

    /// `JoinGame(name, map_id)`. `randomize_spawn` selects between a
    /// uniform-random point on the map's road network and its default spawn
    /// point.
    pub fn join(
        &self,
        name: String,
        map_id: &MapId,
        randomize_spawn: bool,
    ) -> Result<(Token, common::PlayerId), Error> {
        let mut state = self.state.write().unwrap();
        let now = Instant::now();

        let map = state
            .world
            .map(map_id)
            .ok_or_else(|| Error::BadRequest(format!("unknown map: {map_id}")))?;

        let spawn_point = if randomize_spawn {
            map.random_spawn_point(&mut rand::thread_rng())
        } else {
            map.default_spawn_point()
        };

        state.sessions.join(name, map, spawn_point, now)
    }

    /// `GetGameState(token)`: every player sharing the caller's map.
    pub fn get_game_state(&self, token: Token) -> Vec<Player> {
        let state = self.state.read().unwrap();
        state
            .sessions
            .players_on_same_map(token)
            .into_iter()
            .cloned()
            .collect()
    }

    /// `GetPlayers(token)`: identical surface to `get_game_state` per spec
    /// §6.2 (both "empty means unauthorized").
    pub fn get_players(&self, token: Token) -> Vec<Player> {
        self.get_game_state(token)
    }

    /// `SetPlayerAction(token, move)`.
    pub fn set_player_action(&self, token: Token, move_code: &str) -> Result<bool, Error> {
        let mut state = self.state.write().unwrap();
        let Some(player) = state.sessions.find_by_token(token) else {
            return Err(Error::Unauthorized);
        };
        let player_id = player.id;
        let map_id = player.map_id.clone();
        let dog_speed = state
            .world
            .map(&map_id)
            .map(|m| m.dog_speed)
            .unwrap_or(0.0);
        state
            .sessions
            .set_action(player_id, move_code, dog_speed, Instant::now())
    }

    /// `Tick(Δ)`: motion, then collision, then loot replenishment, then
    /// retirement — in that order, for every dog in a deterministic
    /// (id-ascending) sequence, matching §4.8's "stable sequence order"
    /// requirement without the position-indexed sequence the source used.
    pub fn tick(&self, dt: Duration) -> Result<(), Error> {
        let mut state = self.state.write().unwrap();
        let now = Instant::now();
        let dt_secs = dt.as_secs_f32();

        let mut dog_ids: Vec<_> = state.sessions.dogs().map(|d| d.id).collect();
        dog_ids.sort();

        for dog_id in dog_ids {
            let Some(dog) = state.sessions.dog(dog_id) else {
                continue;
            };
            let map_id = dog.map_id.clone();
            let start = dog.position;
            let velocity = dog.velocity;

            let Some(map) = state.world.map(&map_id) else {
                continue;
            };
            let (end, clipped) = motion::constrain(map, start, velocity, dt_secs)?;

            let Some(map) = state.world.map_mut(&map_id) else {
                continue;
            };
            let Some(dog) = state.sessions.dog_mut(dog_id) else {
                continue;
            };
            dog.position = end;
            if clipped {
                dog.velocity = Vec2::ZERO;
            }
            collision::resolve(dog, map, start, end);
        }

        let map_ids: Vec<_> = state.world.maps.keys().cloned().collect();
        for map_id in map_ids {
            if let Some(map) = state.world.map_mut(&map_id) {
                loot::replenish(map, &mut state.loot_ids);
            }
        }

        let retirement_time = state.retirement_time;
        let due = retirement::collect_due(&state.sessions, retirement_time, now);
        for player_id in due {
            let record = retirement::retire(&mut state.sessions, self.sink.as_ref(), player_id, now);
            if let (Some(record), Some(callback)) = (record, state.retirement_callback.as_ref()) {
                callback(&record.name, record.score, record.play_time_ms as f64 / 1000.0);
            }
        }

        Ok(())
    }
}
