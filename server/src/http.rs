// SPDX-License-Identifier: AGPL-3.0-or-later

//! A thin JSON adapter over the Application façade. Deliberately small:
//! this is not a reimplementation of a full websocket/admin/CDN serving
//! layer, just enough surface for the façade operations of §6.2 to have a
//! realistic caller.

use crate::facade::Application;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use common::{MapId, Player, Token};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone)]
struct HttpState {
    app: Arc<Application>,
    randomize_spawn: bool,
}

pub fn router(app: Arc<Application>, randomize_spawn: bool) -> Router {
    Router::new()
        .route("/join", post(join))
        .route("/players", get(players))
        .route("/state", get(state))
        .route("/action", post(action))
        .with_state(HttpState {
            app,
            randomize_spawn,
        })
}

#[derive(Deserialize)]
struct JoinRequest {
    name: String,
    map_id: String,
}

async fn join(
    State(http_state): State<HttpState>,
    Json(request): Json<JoinRequest>,
) -> impl IntoResponse {
    match http_state.app.join(
        request.name,
        &MapId(request.map_id),
        http_state.randomize_spawn,
    ) {
        Ok((token, player_id)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "token": token.to_string(),
                "player_id": player_id.0,
            })),
        )
            .into_response(),
        Err(common::Error::BadRequest(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: String,
}

fn parse_token(raw: &str) -> Result<Token, StatusCode> {
    Token::from_str(raw).map_err(|_| StatusCode::UNAUTHORIZED)
}

async fn players(
    State(http_state): State<HttpState>,
    Query(query): Query<TokenQuery>,
) -> impl IntoResponse {
    match parse_token(&query.token) {
        Ok(token) => Json(http_state.app.get_players(token)).into_response(),
        Err(status) => status.into_response(),
    }
}

async fn state(
    State(http_state): State<HttpState>,
    Query(query): Query<TokenQuery>,
) -> impl IntoResponse {
    match parse_token(&query.token) {
        Ok(token) => {
            let players: Vec<Player> = http_state.app.get_game_state(token);
            if players.is_empty() {
                StatusCode::UNAUTHORIZED.into_response()
            } else {
                Json(players).into_response()
            }
        }
        Err(status) => status.into_response(),
    }
}

#[derive(Deserialize)]
struct ActionRequest {
    token: String,
    #[serde(rename = "move")]
    move_code: String,
}

async fn action(
    State(http_state): State<HttpState>,
    Json(request): Json<ActionRequest>,
) -> impl IntoResponse {
    let token = match parse_token(&request.token) {
        Ok(token) => token,
        Err(status) => return status.into_response(),
    };
    match http_state.app.set_player_action(token, &request.move_code) {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => StatusCode::UNAUTHORIZED.into_response(),
        Err(common::Error::Unauthorized) => StatusCode::UNAUTHORIZED.into_response(),
        Err(common::Error::BadRequest(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
