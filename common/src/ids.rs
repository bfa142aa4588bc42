// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed id wrappers. They carry no behavior beyond hashing and comparing as
//! their payload — their only job is to stop a `DogId` being passed where a
//! `PlayerId` was expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(
            Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(DogId);
numeric_id!(PlayerId);
numeric_id!(LootItemId);

/// Index into a map's loot-type catalog.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LootTypeId(pub usize);

impl Display for LootTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A map's stable string identifier, as configured.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MapId(pub String);

impl Display for MapId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for MapId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Monotonically increasing counter used for both dog/player ids (shared
/// numbering space per the process, not per map) and loot item ids (numbered
/// per map, never reissued after removal).
#[derive(Debug, Default)]
pub struct IdCounter(u64);

impl IdCounter {
    pub fn next(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}
