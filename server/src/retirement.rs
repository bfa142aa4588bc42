// SPDX-License-Identifier: AGPL-3.0-or-later

//! The retirement controller: tracks idle time per player and, once a dog
//! has been idle long enough, retires it atomically with respect to the
//! façade lock.

use crate::records::RecordsSink;
use crate::session::SessionRegistry;
use common::{PlayerId, RetiredRecord};
use std::time::{Duration, Instant};

/// Returns the ids of every player that has been idle for at least
/// `retirement_time`. Does not retire them itself — the caller decides
/// ordering against the rest of the tick.
pub fn collect_due(
    registry: &SessionRegistry,
    retirement_time: Duration,
    now: Instant,
) -> Vec<PlayerId> {
    let mut due = Vec::new();
    for player_id in registry.player_ids() {
        let Some(meta) = registry.meta(player_id) else {
            continue;
        };
        if let Some(idle_start) = meta.idle_start {
            if now.duration_since(idle_start) >= retirement_time {
                due.push(player_id);
            }
        }
    }
    due
}

/// Retires one player: computes play time, appends a [`RetiredRecord`] to
/// the sink (logging and swallowing a sink failure per the documented
/// policy — the player is still marked retired in memory even if the
/// record is lost), then excises the player from every index. Returns the
/// retired record (for the optional retirement callback), or `None` if the
/// player was already gone.
pub fn retire(
    registry: &mut SessionRegistry,
    sink: &dyn RecordsSink,
    player_id: PlayerId,
    now: Instant,
) -> Option<RetiredRecord> {
    let (player, meta, dog) = registry.remove(player_id)?;
    let play_time_seconds = now.duration_since(meta.join_time).as_secs_f64();
    let record = RetiredRecord::new(player.name, dog.score, play_time_seconds);

    if let Err(error) = sink.add(&record) {
        log::error!("records sink unavailable, dropping record for player {player_id:?}: {error}");
    }

    Some(record)
}
