use std::collections::VecDeque;

use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use leptos::prelude::{RwSignal, Update};
use pricestf_api_types::websocket::{ClientMessage, ServerMessage};
use pricestf_api_types::AuthRefresh;

use crate::api;
use crate::error::AppError;
use crate::global_state::access_token::TokenStore;
use crate::ws::{push_feed_entry, FeedEntry, FeedEventKind};

const DEFAULT_WS_URL: &str = "wss://ws.prices.tf";

fn ws_url() -> &'static str {
    option_env!("PRICESTF_WS_URL").unwrap_or(DEFAULT_WS_URL)
}

/// Drives the push channel and folds price changes into `feed`. Purely
/// reactive: reconnects and backoff belong to the transport, so when the
/// stream ends the task does too. Returns once the feed signal is disposed
/// or the socket closes.
pub(crate) async fn price_feed(
    feed: RwSignal<VecDeque<FeedEntry>>,
    store: TokenStore,
) -> Result<(), AppError> {
    let socket =
        WebSocket::open(ws_url()).map_err(|error| AppError::Network(error.to_string()))?;
    log::info!("price feed connected");
    let (mut write, mut read) = socket.split();
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                Ok(ServerMessage::AuthRequired) => {
                    // fire-and-forget: a failed handshake is logged and the
                    // feed keeps folding whatever the server still sends
                    match api::refresh_access_token(&store).await {
                        Ok(access_token) => {
                            let reply = ClientMessage::Auth(AuthRefresh { access_token });
                            match write.send(Message::Text(serde_json::to_string(&reply)?)).await {
                                Ok(()) => log::info!("price feed authenticated"),
                                Err(error) => {
                                    log::error!("failed to send feed auth reply: {error}")
                                }
                            }
                        }
                        Err(error) => log::error!("token refresh for price feed failed: {error}"),
                    }
                }
                Ok(ServerMessage::PriceChanged(record)) => {
                    let entry = FeedEntry {
                        kind: FeedEventKind::PriceChanged,
                        record,
                    };
                    if feed.try_update(|feed| push_feed_entry(feed, entry)).is_none() {
                        log::info!("feed signal disposed, closing price feed");
                        return Ok(());
                    }
                }
                Ok(ServerMessage::PriceUpdated(record)) => {
                    // defined by the feed schema but consumed by no view
                    log::debug!("ignoring price update for {}", record.sku);
                }
                // malformed frames are dropped without surfacing an error
                Err(error) => log::debug!("dropping malformed feed frame: {error}"),
            },
            Ok(Message::Bytes(_)) => log::error!("unexpected binary frame on price feed"),
            Err(error) => log::error!("price feed transport error: {error:?}"),
        }
    }
    log::info!("price feed closed");
    Ok(())
}
