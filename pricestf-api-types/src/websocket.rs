//! Messages exchanged over the realtime price feed. Every frame is a JSON
//! envelope `{ "type": ..., "data": ... }`.

use serde::{Deserialize, Serialize};

use crate::{AuthRefresh, Price};

/// Frames pushed by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Sent after connecting; `data` is null. The client must answer with
    /// [`ClientMessage::Auth`] before price events are considered valid.
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// A new price-history sample was recorded for an item.
    #[serde(rename = "PRICE_CHANGED")]
    PriceChanged(Price),
    /// An item's current price record changed. Defined by the feed schema;
    /// no view consumes it today.
    #[serde(rename = "PRICE_UPDATED")]
    PriceUpdated(Price),
}

/// Frames sent by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "AUTH")]
    Auth(AuthRefresh),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_auth_required() {
        let message: ServerMessage =
            serde_json::from_str(r#"{"type":"AUTH_REQUIRED","data":null}"#).unwrap();
        assert_eq!(message, ServerMessage::AuthRequired);
    }

    #[test]
    fn decodes_price_changed() {
        let json = r#"{
            "type": "PRICE_CHANGED",
            "data": {
                "sku": "263;6",
                "buyHalfScrap": 122,
                "buyKeys": 0,
                "sellHalfScrap": 133,
                "sellKeys": 0,
                "createdAt": "2022-02-10T11:33:01.616Z"
            }
        }"#;
        match serde_json::from_str::<ServerMessage>(json).unwrap() {
            ServerMessage::PriceChanged(price) => assert_eq!(price.sku, "263;6"),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(serde_json::from_str::<ServerMessage>("not json").is_err());
        assert!(serde_json::from_str::<ServerMessage>(r#"{"type":"NOT_A_TYPE"}"#).is_err());
        assert!(
            serde_json::from_str::<ServerMessage>(r#"{"type":"PRICE_CHANGED","data":"oops"}"#)
                .is_err()
        );
    }

    #[test]
    fn auth_reply_wire_shape() {
        let reply = ClientMessage::Auth(AuthRefresh {
            access_token: "abc123".to_string(),
        });
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "AUTH", "data": {"accessToken": "abc123"}})
        );
    }
}
