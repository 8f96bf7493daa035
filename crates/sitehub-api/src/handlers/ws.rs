//! WebSocket upgrade handler.

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use sitehub_realtime::{InboundMessage, OutboundMessage};
use sitehub_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::auth::context_from_token;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let ctx = context_from_token(&state.jwt_decoder, &query.token)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(state, ctx, socket)))
}

/// Drives one established connection until either side closes.
async fn handle_socket(state: AppState, ctx: RequestContext, mut socket: WebSocket) {
    let (handle, mut outbound_rx) =
        match state
            .realtime
            .register(ctx.user_id, ctx.username.clone(), ctx.role)
        {
            Ok(registered) => registered,
            Err(e) => {
                let _ = socket
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::AGAIN,
                        reason: e.message.into(),
                    })))
                    .await;
                return;
            }
        };

    let conn_id = handle.id;
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut ping = tokio::time::interval(state.realtime.ping_interval());

    // Outbound: queued events plus periodic keepalive pings
    let outbound_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                msg = outbound_rx.recv() => {
                    let Some(msg) = msg else { break };
                    if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match InboundMessage::parse(text.as_str()) {
                Some(InboundMessage::Ping) => {
                    handle.send(OutboundMessage::pong().to_json());
                }
                None => debug!(conn_id = %conn_id, "Ignoring unrecognized frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.realtime.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %ctx.user_id,
        "WebSocket connection closed"
    );
}
