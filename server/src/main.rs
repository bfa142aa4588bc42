// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::facade::Application;
use crate::options::Options;
use crate::records::{InMemorySink, RecordsSink, SqliteSink};
use common::World;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use structopt::StructOpt;

mod collision;
mod facade;
mod http;
mod logging;
mod loot;
mod motion;
mod options;
mod records;
mod retirement;
mod session;

fn load_world(options: &Options) -> World {
    let text = std::fs::read_to_string(&options.world_config).unwrap_or_else(|error| {
        panic!(
            "could not read world config {}: {error}",
            options.world_config
        )
    });
    let mut config: common::world::WorldConfig =
        toml::from_str(&text).unwrap_or_else(|error| panic!("malformed world config: {error}"));
    if let Some(override_seconds) = options.dog_retirement_time {
        config.dog_retirement_time = override_seconds;
    }
    World::from_config(config).unwrap_or_else(|error| panic!("invalid world config: {error}"))
}

fn open_sink(options: &Options) -> Box<dyn RecordsSink> {
    match &options.records_db {
        Some(path) => Box::new(
            SqliteSink::open(Path::new(path), options.records_pool_size)
                .unwrap_or_else(|error| panic!("could not open records database: {error}")),
        ),
        None => {
            log::warn!("no --records-db given; retired-player records will not survive a restart");
            Box::new(InMemorySink::default())
        }
    }
}

#[tokio::main]
async fn main() {
    let options = Options::from_args();
    logging::init_logger(&options);

    let world = load_world(&options);
    let sink = open_sink(&options);
    let randomize_spawn = options.randomize_spawn;
    let tick_period = Duration::from_millis(options.tick_period_ms);
    let bind_address = options.bind_address;

    let app = Arc::new(Application::new(world, sink));

    {
        let app = Arc::clone(&app);
        std::thread::spawn(move || loop {
            std::thread::sleep(tick_period);
            if let Err(error) = app.tick(tick_period) {
                log::error!("tick failed: {error}");
            }
        });
    }

    let router = http::router(app, randomize_spawn);
    log::info!("listening on {bind_address}");
    axum::Server::bind(&bind_address)
        .serve(router.into_make_service())
        .await
        .unwrap_or_else(|error| panic!("http server error: {error}"));
}
