// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared data model for the Lost and Found game server: geometry, world
//! topology, dogs, players and retired-player records. Owned exclusively by
//! the server's Application façade; this crate is pure data plus the small
//! amount of validation logic that belongs with it (e.g. road-config
//! parsing). The simulation algorithms themselves (motion, collision, loot
//! generation, sessions) live in the `server` crate, which is the sole
//! mutator of these types.

pub mod dog;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod player;
pub mod record;
pub mod token;
pub mod world;

pub use dog::{BagItem, Direction, Dog};
pub use error::Error;
pub use geometry::{Point, Rect, Road, RoadStrip, ITEM_PICKUP_RADIUS, OFFICE_RETURN_RADIUS};
pub use ids::{DogId, LootItemId, LootTypeId, MapId, PlayerId};
pub use player::{Player, PlayerMeta};
pub use record::RetiredRecord;
pub use token::Token;
pub use world::{Building, LootItem, LootType, Map, Office, World, WorldConfig};

pub type Result<T> = std::result::Result<T, Error>;
