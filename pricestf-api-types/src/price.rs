use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A price in the two in-game denominations: keys (high unit) and half-scrap
/// (low unit, 18 half-scrap to one refined metal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub keys: i64,
    pub half_scrap: i64,
}

/// A computed price snapshot as the API reports it. The same shape carries
/// both an item's current price and a single sample of its price history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub sku: String,
    pub buy_half_scrap: i64,
    pub buy_keys: i64,
    pub sell_half_scrap: i64,
    pub sell_keys: i64,
    pub created_at: DateTime<Utc>,
}

impl Price {
    pub fn buy(&self) -> CurrencyPair {
        CurrencyPair {
            keys: self.buy_keys,
            half_scrap: self.buy_half_scrap,
        }
    }

    pub fn sell(&self) -> CurrencyPair {
        CurrencyPair {
            keys: self.sell_keys,
            half_scrap: self.sell_half_scrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_wire_record() {
        let json = r#"{
            "sku": "263;6",
            "buyHalfScrap": 122,
            "buyKeys": 0,
            "sellHalfScrap": 133,
            "sellKeys": 2,
            "createdAt": "2022-02-10T11:33:01.616Z"
        }"#;
        let price: Price = serde_json::from_str(json).unwrap();
        assert_eq!(price.sku, "263;6");
        assert_eq!(
            price.buy(),
            CurrencyPair {
                keys: 0,
                half_scrap: 122
            }
        );
        assert_eq!(
            price.sell(),
            CurrencyPair {
                keys: 2,
                half_scrap: 133
            }
        );
        assert_eq!(
            price.created_at,
            Utc.with_ymd_and_hms(2022, 2, 10, 11, 33, 1).unwrap()
                + chrono::Duration::milliseconds(616)
        );
    }
}
