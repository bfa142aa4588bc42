// SPDX-License-Identifier: AGPL-3.0-or-later

use log::LevelFilter;
use std::net::SocketAddr;
use structopt::StructOpt;

/// Server options, to be specified as arguments.
#[derive(Debug, StructOpt)]
pub struct Options {
    /// Path to the world configuration TOML file.
    #[structopt(long, default_value = "world.toml")]
    pub world_config: String,
    /// Address to bind the HTTP listener to.
    #[structopt(long, default_value = "0.0.0.0:8080")]
    pub bind_address: SocketAddr,
    /// Tick period, in milliseconds.
    #[structopt(long, default_value = "50")]
    pub tick_period_ms: u64,
    /// Overrides the world-configured dog retirement time, in seconds.
    #[structopt(long)]
    pub dog_retirement_time: Option<f32>,
    /// Path to the records sqlite database. Omit to run with an in-memory
    /// sink (records are lost on restart).
    #[structopt(long)]
    pub records_db: Option<String>,
    /// Number of pooled connections to the records database.
    #[structopt(long, default_value = "4")]
    pub records_pool_size: usize,
    /// Randomize spawn position on join instead of using the map default.
    #[structopt(long)]
    pub randomize_spawn: bool,
    /// Log simulation diagnostics.
    #[cfg_attr(debug_assertions, structopt(long, default_value = "info"))]
    #[cfg_attr(not(debug_assertions), structopt(long, default_value = "warn"))]
    pub debug_sim: LevelFilter,
    /// Log session diagnostics.
    #[cfg_attr(debug_assertions, structopt(long, default_value = "info"))]
    #[cfg_attr(not(debug_assertions), structopt(long, default_value = "warn"))]
    pub debug_session: LevelFilter,
    /// Log this crate's own diagnostics (HTTP adapter, wiring).
    #[cfg_attr(debug_assertions, structopt(long, default_value = "info"))]
    #[cfg_attr(not(debug_assertions), structopt(long, default_value = "warn"))]
    pub debug_server: LevelFilter,
}
