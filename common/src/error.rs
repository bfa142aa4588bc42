// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// The error taxonomy for the simulation and session subsystem.
///
/// `Configuration` is fatal at startup. `WorldInvariant` indicates a bug in
/// the caller or the simulation itself; it is returned as an ordinary
/// `Result::Err` rather than a panic, since the tick loop is expected to log
/// and move on rather than bring the process down over one dog's bad state.
/// `Unauthorized` and `BadRequest` are ordinary, expected outcomes that
/// callers branch on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or incomplete world configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Unknown or retired token.
    #[error("unauthorized")]
    Unauthorized,
    /// Empty user name, unknown map, or unknown move code.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A dog ended up off-road, or the session indices went inconsistent.
    /// Indicates a bug in the caller or the simulation itself.
    #[error("world invariant violated: {0}")]
    WorldInvariant(String),
}
