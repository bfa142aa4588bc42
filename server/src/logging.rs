// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::options::Options;

pub(crate) fn init_logger(options: &Options) {
    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    logger.filter_module("server", options.debug_server);
    logger.filter_module("server::motion", options.debug_sim);
    logger.filter_module("server::collision", options.debug_sim);
    logger.filter_module("server::loot", options.debug_sim);
    logger.filter_module("server::session", options.debug_session);
    logger.filter_module("server::retirement", options.debug_session);
    logger.init();
}
