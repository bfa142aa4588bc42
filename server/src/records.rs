// SPDX-License-Identifier: AGPL-3.0-or-later

//! The records sink: a durable, crash-safe store of retired-player records,
//! queried back in ranked order. The `rusqlite` backend is accessed through
//! a hand-rolled bounded connection pool (`Mutex` + `Condvar`) rather than
//! `r2d2`, matching the shared-resource policy described for this
//! component: an acquirer blocks on a condition variable until a connection
//! is returned.

use common::RetiredRecord;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Condvar, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool is closed")]
    PoolClosed,
}

/// The interface the retirement controller appends through and the ranking
/// query reads from.
pub trait RecordsSink: Send + Sync {
    fn add(&self, record: &RetiredRecord) -> Result<(), SinkError>;
    fn top(&self, start: usize, max: usize) -> Result<Vec<RetiredRecord>, SinkError>;
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS retired_players (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    score INTEGER NOT NULL,
    play_time_ms INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS retired_players_ranking
    ON retired_players (score DESC, play_time_ms ASC, name ASC);
";

struct Pool {
    connections: Mutex<Vec<Connection>>,
    available: Condvar,
}

impl Pool {
    fn acquire(&self) -> Connection {
        let mut guard = self.connections.lock().unwrap();
        loop {
            if let Some(connection) = guard.pop() {
                return connection;
            }
            guard = self.available.wait(guard).unwrap();
        }
    }

    fn release(&self, connection: Connection) {
        self.connections.lock().unwrap().push(connection);
        self.available.notify_one();
    }
}

/// The `rusqlite`-backed sink. Opens `size` connections up front against the
/// same database file; callers block in [`Pool::acquire`] until one is free.
pub struct SqliteSink {
    pool: Pool,
}

impl SqliteSink {
    pub fn open(path: &Path, size: usize) -> Result<Self, SinkError> {
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let connection = Connection::open(path)?;
            connection.execute_batch(SCHEMA)?;
            connections.push(connection);
        }
        Ok(Self {
            pool: Pool {
                connections: Mutex::new(connections),
                available: Condvar::new(),
            },
        })
    }
}

impl RecordsSink for SqliteSink {
    fn add(&self, record: &RetiredRecord) -> Result<(), SinkError> {
        let connection = self.pool.acquire();
        let result = connection.execute(
            "INSERT INTO retired_players (id, name, score, play_time_ms) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id.to_string(),
                record.name,
                record.score,
                record.play_time_ms as i64,
            ],
        );
        self.pool.release(connection);
        result.map(|_| ()).map_err(SinkError::from)
    }

    fn top(&self, start: usize, max: usize) -> Result<Vec<RetiredRecord>, SinkError> {
        let connection = self.pool.acquire();
        let result = (|| {
            let mut statement = connection.prepare(
                "SELECT id, name, score, play_time_ms FROM retired_players \
                 ORDER BY score DESC, play_time_ms ASC, name ASC \
                 LIMIT ?1 OFFSET ?2",
            )?;
            let rows = statement.query_map(params![max as i64, start as i64], |row| {
                let id: String = row.get(0)?;
                Ok(RetiredRecord {
                    id: id.parse().unwrap_or_default(),
                    name: row.get(1)?,
                    score: row.get(2)?,
                    play_time_ms: row.get::<_, i64>(3)? as u64,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })();
        self.pool.release(connection);
        Ok(result?)
    }
}

/// An in-memory sink used by tests and by callers that run without a
/// database path configured.
#[derive(Default)]
pub struct InMemorySink {
    records: Mutex<Vec<RetiredRecord>>,
}

impl InMemorySink {
    pub fn records(&self) -> Vec<RetiredRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl RecordsSink for InMemorySink {
    fn add(&self, record: &RetiredRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn top(&self, start: usize, max: usize) -> Result<Vec<RetiredRecord>, SinkError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.play_time_ms.cmp(&b.play_time_ms))
                .then(a.name.cmp(&b.name))
        });
        Ok(records.into_iter().skip(start).take(max).collect())
    }
}
