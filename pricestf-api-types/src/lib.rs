mod auth;
mod paginated;
mod price;

pub mod currency;
pub mod websocket;

pub use auth::AuthRefresh;
pub use paginated::{PageMeta, Paginated};
pub use price::{CurrencyPair, Price};
