use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use pricestf_api_types::currency::{NormalizedPoint, KEY_SKU};
use pricestf_api_types::Price;

use crate::api::{self, HistoryOrder};
use crate::components::loading::Loading;
use crate::components::meta::MetaTitle;
use crate::components::price_history_chart::PriceHistoryChart;
use crate::error::{AppError, AppResult};
use crate::global_state::access_token::TokenStore;

const HOUR_MS: i64 = 60 * 60 * 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HistoryMode {
    /// Page-based retrieval, newest page first, older pages loaded on demand.
    Paged,
    /// Server-side downsampling into buckets of the given width.
    Interval(i64),
}

fn mode_from_choice(choice: &str) -> HistoryMode {
    match choice {
        "1h" => HistoryMode::Interval(HOUR_MS),
        "6h" => HistoryMode::Interval(6 * HOUR_MS),
        "1d" => HistoryMode::Interval(24 * HOUR_MS),
        "1w" => HistoryMode::Interval(7 * 24 * HOUR_MS),
        _ => HistoryMode::Paged,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HistoryWindow {
    points: Vec<NormalizedPoint>,
    key_price: Price,
    total_pages: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Loading,
    Ready,
    Failed(AppError),
}

/// All mutable state of one history view, with pure transitions. Responses
/// carry the generation token handed out when their request context began;
/// a token that no longer matches means the view has moved on (sku or mode
/// changed mid-flight) and the response is dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HistoryState {
    generation: u64,
    phase: Phase,
    points: Vec<NormalizedPoint>,
    key_price: Option<Price>,
    page: u32,
    total_pages: Option<u32>,
    loading_more: bool,
}

impl HistoryState {
    /// Starts a new request context: clears the loaded window and
    /// invalidates every outstanding response.
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.points = Vec::new();
        self.key_price = None;
        self.page = 1;
        self.total_pages = None;
        self.loading_more = false;
        self.generation
    }

    /// Starts a backward-pagination request inside the current context.
    /// Returns the token and the page to fetch, or None when there is
    /// nothing left to load.
    fn begin_older_page(&mut self) -> Option<(u64, u32)> {
        if !self.can_load_more() {
            return None;
        }
        self.loading_more = true;
        Some((self.generation, self.page + 1))
    }

    fn apply_window(&mut self, token: u64, window: HistoryWindow) -> bool {
        if token != self.generation {
            return false;
        }
        self.phase = Phase::Ready;
        self.points = window.points;
        self.key_price = Some(window.key_price);
        self.total_pages = window.total_pages;
        true
    }

    /// Prepends an older page ahead of the already-loaded samples, keeping
    /// the overall window ascending by time.
    fn apply_older_page(&mut self, token: u64, page: u32, window: HistoryWindow) -> bool {
        if token != self.generation {
            return false;
        }
        self.loading_more = false;
        let mut merged = window.points;
        merged.append(&mut self.points);
        self.points = merged;
        self.key_price = Some(window.key_price);
        self.total_pages = window.total_pages;
        self.page = page;
        true
    }

    fn apply_error(&mut self, token: u64, error: AppError) -> bool {
        if token != self.generation {
            return false;
        }
        self.loading_more = false;
        self.phase = Phase::Failed(error);
        true
    }

    fn can_load_more(&self) -> bool {
        !self.loading_more
            && matches!(self.phase, Phase::Ready)
            && self
                .total_pages
                .map(|total| self.page < total)
                .unwrap_or(false)
    }
}

/// Fetches one history window together with the key price it must be
/// normalized against.
async fn fetch_window(
    store: TokenStore,
    sku: String,
    mode: HistoryMode,
    page: u32,
) -> AppResult<HistoryWindow> {
    match mode {
        HistoryMode::Paged => {
            let (history, key_price) = futures::try_join!(
                api::get_history(&store, &sku, HistoryOrder::Descending, page, None),
                api::get_price(&store, KEY_SKU),
            )?;
            let key_rate = key_price.sell().half_scrap;
            let total_pages = Some(history.meta.total_pages);
            Ok(HistoryWindow {
                points: normalize_window(history.items, key_rate),
                key_price,
                total_pages,
            })
        }
        HistoryMode::Interval(interval_ms) => {
            let (samples, key_price) = futures::try_join!(
                api::get_history_interval(&store, &sku, interval_ms),
                api::get_price(&store, KEY_SKU),
            )?;
            let key_rate = key_price.sell().half_scrap;
            Ok(HistoryWindow {
                points: normalize_window(samples, key_rate),
                key_price,
                total_pages: None,
            })
        }
    }
}

/// Normalizes a response window and orders it ascending by time.
fn normalize_window(records: Vec<Price>, key_rate: i64) -> Vec<NormalizedPoint> {
    let mut points: Vec<_> = records
        .iter()
        .map(|record| NormalizedPoint::from_record(record, key_rate))
        .collect();
    points.sort_by_key(|point| point.created_at);
    points
}

#[component]
pub fn ItemPage() -> impl IntoView {
    let params = use_params_map();
    let sku = Memo::new(move |_| params.with(|params| params.get("sku")).unwrap_or_default());
    let store = use_context::<TokenStore>().unwrap_or_default();
    let (mode, set_mode) = signal(HistoryMode::Paged);
    let history = RwSignal::new(HistoryState::default());

    Effect::new(move |_| {
        let sku = sku.get();
        let mode = mode.get();
        let Some(token) = history.try_update(|state| state.begin()) else {
            return;
        };
        if sku.is_empty() {
            history.update(|state| {
                state.apply_error(token, AppError::ParamMissing);
            });
            return;
        }
        spawn_local(async move {
            let result = fetch_window(store, sku, mode, 1).await;
            history.try_update(|state| match result {
                Ok(window) => {
                    state.apply_window(token, window);
                }
                Err(error) => {
                    state.apply_error(token, error);
                }
            });
        });
    });

    let load_more = move |_| {
        let Some(Some((token, page))) = history.try_update(|state| state.begin_older_page())
        else {
            return;
        };
        let sku = sku.get_untracked();
        spawn_local(async move {
            let result = fetch_window(store, sku, HistoryMode::Paged, page).await;
            history.try_update(|state| match result {
                Ok(window) => {
                    state.apply_older_page(token, page, window);
                }
                Err(error) => {
                    state.apply_error(token, error);
                }
            });
        });
    };

    let key_price = Memo::new(move |_| history.with(|state| state.key_price.clone()));
    let points = Memo::new(move |_| history.with(|state| state.points.clone()));
    let phase = Memo::new(move |_| history.with(|state| state.phase.clone()));
    let can_load_more = Memo::new(move |_| history.with(|state| state.can_load_more()));

    view! {
        <MetaTitle title=move || format!("Price history of {}", sku.get()) />
        <div class="container mx-auto mt-10">
            <div class="text-center">
                <h1 class="text-xl">"Price history of " {move || sku.get()}</h1>
            </div>
            <div class="text-center mt-5 flex flex-row flex-wrap justify-center items-center gap-3">
                <Show when=move || can_load_more.get()>
                    <button
                        class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded"
                        on:click=load_more
                    >
                        "Load more data"
                    </button>
                </Show>
                <select
                    class="border border-gray-300 rounded py-2 px-3 bg-white"
                    on:change=move |event| {
                        set_mode.set(mode_from_choice(&event_target_value(&event)))
                    }
                >
                    <option value="pages" selected=move || mode.get() == HistoryMode::Paged>
                        "Latest samples"
                    </option>
                    <option
                        value="1h"
                        selected=move || mode.get() == HistoryMode::Interval(HOUR_MS)
                    >
                        "1 hour buckets"
                    </option>
                    <option
                        value="6h"
                        selected=move || mode.get() == HistoryMode::Interval(6 * HOUR_MS)
                    >
                        "6 hour buckets"
                    </option>
                    <option
                        value="1d"
                        selected=move || mode.get() == HistoryMode::Interval(24 * HOUR_MS)
                    >
                        "1 day buckets"
                    </option>
                    <option
                        value="1w"
                        selected=move || mode.get() == HistoryMode::Interval(7 * 24 * HOUR_MS)
                    >
                        "1 week buckets"
                    </option>
                </select>
            </div>
            <div class="rounded-xl shadow-md px-4 h-96 py-10">
                {move || match phase.get() {
                    Phase::Failed(AppError::NotFound) => {
                        view! {
                            <div
                                role="status"
                                class="bg-amber-100 text-amber-800 border border-amber-300 rounded-xl p-4 text-center"
                            >
                                "No price history recorded for this item."
                            </div>
                        }
                            .into_any()
                    }
                    Phase::Failed(error) => {
                        view! {
                            <div
                                role="alert"
                                class="bg-red-100 text-red-800 border border-red-300 rounded-xl p-4 text-center"
                            >
                                <strong class="font-semibold">"Error: "</strong>
                                <span>{error.to_string()}</span>
                            </div>
                        }
                            .into_any()
                    }
                    _ => {
                        match key_price.get() {
                            None => {
                                view! {
                                    <div class="flex justify-center"><Loading /></div>
                                }
                                    .into_any()
                            }
                            Some(_) if points.with(|points| points.len() < 2) => {
                                view! {
                                    <div
                                        role="status"
                                        class="bg-amber-100 text-amber-800 border border-amber-300 rounded-xl p-4 text-center"
                                    >
                                        "Not enough price history to draw a chart yet."
                                    </div>
                                }
                                    .into_any()
                            }
                            Some(_) => {
                                view! {
                                    <PriceHistoryChart sku=sku points=points key_price=key_price />
                                }
                                    .into_any()
                            }
                        }
                    }
                }}
            </div>
        </div>
    }
}
