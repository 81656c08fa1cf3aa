//! Typed wrappers over the pricing API. Every request except token issuance
//! carries the cached bearer token; a 401 triggers exactly one
//! refresh-and-retry before the error is surfaced.

use gloo_net::http::{Request, Response};
use pricestf_api_types::{AuthRefresh, Paginated, Price};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::global_state::access_token::TokenStore;

const DEFAULT_API_BASE: &str = "https://api2.prices.tf";

fn api_base() -> &'static str {
    option_env!("PRICESTF_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HistoryOrder {
    Ascending,
    Descending,
}

impl HistoryOrder {
    fn as_str(&self) -> &'static str {
        match self {
            HistoryOrder::Ascending => "ASC",
            HistoryOrder::Descending => "DESC",
        }
    }
}

pub(crate) async fn get_price(store: &TokenStore, sku: &str) -> AppResult<Price> {
    fetch_json(store, &format!("/prices/{sku}"), &[]).await
}

pub(crate) async fn get_history(
    store: &TokenStore,
    sku: &str,
    order: HistoryOrder,
    page: u32,
    limit: Option<u32>,
) -> AppResult<Paginated<Price>> {
    let mut query = vec![
        ("order", order.as_str().to_string()),
        ("page", page.to_string()),
    ];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    fetch_json(store, &format!("/history/{sku}"), &query).await
}

pub(crate) async fn get_history_interval(
    store: &TokenStore,
    sku: &str,
    interval_ms: i64,
) -> AppResult<Vec<Price>> {
    fetch_json(
        store,
        &format!("/history/{sku}/interval"),
        &[("interval", interval_ms.to_string())],
    )
    .await
}

/// Issues a fresh access token from the implicit session and caches it.
/// Deliberately exempt from the bearer/refresh logic of [`fetch_json`].
/// Concurrent callers may each refresh; every refresh yields a valid token.
pub(crate) async fn refresh_access_token(store: &TokenStore) -> AppResult<String> {
    let response = Request::post(&format!("{}/auth/access", api_base()))
        .send()
        .await?;
    if !response.ok() {
        return Err(AppError::Unauthorized);
    }
    let refresh: AuthRefresh = response
        .json()
        .await
        .map_err(|error| AppError::Api(error.to_string()))?;
    store.set(&refresh.access_token);
    Ok(refresh.access_token)
}

async fn send_request(
    store: &TokenStore,
    path: &str,
    query: &[(&str, String)],
) -> AppResult<Response> {
    let url = format!("{}{path}", api_base());
    let mut request = Request::get(&url);
    for (key, value) in query {
        request = request.query([(*key, value.as_str())]);
    }
    if let Some(token) = store.get() {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }
    Ok(request.send().await?)
}

const UNAUTHORIZED: u16 = 401;
const FORBIDDEN: u16 = 403;
const NOT_FOUND: u16 = 404;

async fn fetch_json<T>(store: &TokenStore, path: &str, query: &[(&str, String)]) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let mut response = send_request(store, path, query).await?;
    if response.status() == UNAUTHORIZED {
        refresh_access_token(store).await?;
        response = send_request(store, path, query).await?;
    }
    match response.status() {
        NOT_FOUND => Err(AppError::NotFound),
        UNAUTHORIZED | FORBIDDEN => Err(AppError::Unauthorized),
        _ if response.ok() => response
            .json()
            .await
            .map_err(|error| AppError::Api(error.to_string())),
        status => Err(AppError::Network(format!("unexpected status {status}"))),
    }
}
