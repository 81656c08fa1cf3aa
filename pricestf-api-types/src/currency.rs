//! Pure price math: folding a two-denomination price into one comparable
//! scalar, formatting it for humans, and deciding which unit a history
//! window should be plotted in.

use chrono::{DateTime, Utc};

use crate::{CurrencyPair, Price};

/// SKU of the key item whose sell price doubles as the key/metal exchange
/// rate.
pub const KEY_SKU: &str = "5021;6";

/// Half-scrap per refined metal.
pub const HALF_SCRAP_PER_REFINED: i64 = 18;

impl CurrencyPair {
    /// Linearizes the pair into half-scrap using the current key rate
    /// (the key item's sell-side half-scrap count).
    pub fn scalar_value(&self, key_rate: i64) -> i64 {
        self.half_scrap + self.keys * key_rate
    }

    /// Renders the pair as `"<N> key(s), <M> ref"`. The key segment is
    /// omitted at zero keys, the metal segment at zero metal; an all-zero
    /// pair still renders as `"0 ref"`.
    pub fn display(&self) -> String {
        let mut out = String::new();
        if self.keys != 0 {
            out = format!("{} {}", self.keys, if self.keys == 1 { "key" } else { "keys" });
        }
        let metal = truncate(self.half_scrap as f64 / HALF_SCRAP_PER_REFINED as f64);
        if metal != 0.0 || out.is_empty() {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&format!("{metal} ref"));
        }
        out
    }
}

const ROUNDING_EPSILON: f64 = 0.001;

/// Rounds to two decimals, half away from zero. Values within 0.001 of the
/// next integer always round up, which absorbs the float error the decimal
/// scaling introduces near whole-unit boundaries and keeps the function
/// idempotent.
pub fn truncate(value: f64) -> f64 {
    let factor = 100.0;
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    round_half_away_with_epsilon(scaled) / factor
}

fn round_half_away_with_epsilon(value: f64) -> f64 {
    let magnitude = value.abs();
    let rounded = if magnitude + ROUNDING_EPSILON > magnitude.ceil() {
        magnitude.ceil()
    } else {
        magnitude.round()
    };
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// One plottable sample: scalar values for the axes, display strings for the
/// tooltip. Derived from a history record and the key rate current at render
/// time, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub buy_value: i64,
    pub sell_value: i64,
    pub buy_display: String,
    pub sell_display: String,
    pub created_at: DateTime<Utc>,
}

impl NormalizedPoint {
    pub fn from_record(record: &Price, key_rate: i64) -> Self {
        let buy = record.buy();
        let sell = record.sell();
        Self {
            buy_value: buy.scalar_value(key_rate),
            sell_value: sell.scalar_value(key_rate),
            buy_display: buy.display(),
            sell_display: sell.display(),
            created_at: record.created_at,
        }
    }
}

/// Whether a history window should be labelled in keys rather than metal:
/// true once any sell-side sample exceeds the key's own sell value. The key
/// item itself is always metal-priced.
pub fn is_key_priced(viewed_sku: &str, key_price: &Price, points: &[NormalizedPoint]) -> bool {
    if viewed_sku == KEY_SKU {
        return false;
    }
    let key_rate = key_price.sell().half_scrap;
    if key_rate <= 0 {
        return false;
    }
    let key_scalar = key_price.sell().scalar_value(key_rate);
    points.iter().any(|point| point.sell_value > key_scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(keys: i64, half_scrap: i64) -> CurrencyPair {
        CurrencyPair { keys, half_scrap }
    }

    fn record(sku: &str, sell_keys: i64, sell_half_scrap: i64) -> Price {
        Price {
            sku: sku.to_string(),
            buy_half_scrap: 0,
            buy_keys: 0,
            sell_half_scrap,
            sell_keys,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn truncate_boundaries() {
        assert_eq!(truncate(1.9995), 2.0);
        assert_eq!(truncate(1.994), 1.99);
        assert_eq!(truncate(-1.9995), -2.0);
        assert_eq!(truncate(0.0), 0.0);
        assert_eq!(truncate(0.5), 0.5);
    }

    #[test]
    fn truncate_is_idempotent() {
        for value in [
            0.0, 0.005, 0.5, 1.0, 1.99, 1.994, 1.9995, 2.5, 3.333, 17.555, 100.004, -1.99,
            -1.9995, -3.333, 1234.5678,
        ] {
            let once = truncate(value);
            assert_eq!(truncate(once), once, "not idempotent for {value}");
        }
    }

    #[test]
    fn scalar_value_uses_key_rate() {
        assert_eq!(pair(2, 18).scalar_value(50), 118);
        assert_eq!(pair(0, 9).scalar_value(50), 9);
    }

    #[test]
    fn display_strings() {
        assert_eq!(pair(0, 0).display(), "0 ref");
        assert_eq!(pair(1, 0).display(), "1 key");
        assert_eq!(pair(2, 18).display(), "2 keys, 1 ref");
        assert_eq!(pair(0, 9).display(), "0.5 ref");
        assert_eq!(pair(3, 0).display(), "3 keys");
    }

    #[test]
    fn normalizes_record() {
        let mut price = record("263;6", 2, 18);
        price.buy_half_scrap = 9;
        let point = NormalizedPoint::from_record(&price, 50);
        assert_eq!(point.buy_value, 9);
        assert_eq!(point.sell_value, 118);
        assert_eq!(point.buy_display, "0.5 ref");
        assert_eq!(point.sell_display, "2 keys, 1 ref");
    }

    #[test]
    fn key_priced_when_window_exceeds_key_rate() {
        let key_price = record(KEY_SKU, 0, 50);
        let cheap = vec![NormalizedPoint::from_record(&record("1;6", 0, 30), 50)];
        let expensive = vec![NormalizedPoint::from_record(&record("2;6", 2, 0), 50)];
        assert!(!is_key_priced("1;6", &key_price, &cheap));
        assert!(is_key_priced("2;6", &key_price, &expensive));
        // the key item itself always reads in metal
        assert!(!is_key_priced(KEY_SKU, &key_price, &expensive));
    }
}
