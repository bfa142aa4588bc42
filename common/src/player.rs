// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::ids::{DogId, MapId, PlayerId};
use crate::token::Token;
use serde::Serialize;
use std::time::Instant;

/// A joined player: display name plus the id of the dog/map it controls.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub dog_id: DogId,
    pub map_id: MapId,
    #[serde(skip)]
    pub token: Token,
}

/// Bookkeeping for a player that isn't part of its public projection: join
/// time (for play-time accounting) and idle tracking (for retirement).
#[derive(Debug)]
pub struct PlayerMeta {
    pub join_time: Instant,
    pub idle_start: Option<Instant>,
}

impl PlayerMeta {
    pub fn new(now: Instant) -> Self {
        Self {
            join_time: now,
            idle_start: None,
        }
    }
}
