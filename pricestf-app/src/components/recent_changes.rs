use std::collections::VecDeque;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::relative_time::RelativeToNow;
use crate::global_state::access_token::TokenStore;
use crate::ws::price_feed::price_feed;
use crate::ws::{FeedEntry, FeedEventKind};

/// Rolling ticker of the most recent price changes pushed over the socket.
/// The feed lives in a component-local signal, so navigating away drops it
/// and closes the socket task.
#[component]
pub fn RecentChanges() -> impl IntoView {
    let feed = RwSignal::new(VecDeque::<FeedEntry>::new());
    let store = use_context::<TokenStore>().unwrap_or_default();
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(error) = price_feed(feed, store).await {
                log::error!("price feed task ended: {error}");
            }
        });
    });

    view! {
        <div class="mt-8">
            <Show when=move || feed.with(|feed| feed.is_empty())>
                <div class="text-center text-gray-500 animate-pulse py-10">
                    "Waiting for price updates..."
                </div>
            </Show>
            <div class="flex flex-row flex-wrap justify-center gap-4">
                <For
                    each={move || feed.get().into_iter().collect::<Vec<_>>()}
                    key=|entry| (entry.record.sku.clone(), entry.record.created_at)
                    children=move |entry: FeedEntry| view! { <FeedCard entry /> }
                />
            </div>
        </div>
    }
}

#[component]
fn FeedCard(entry: FeedEntry) -> impl IntoView {
    let href = format!("/items/{}", entry.record.sku);
    let kind_label = match entry.kind {
        FeedEventKind::PriceChanged => "price change",
    };
    let buy = entry.record.buy().display();
    let sell = entry.record.sell().display();
    view! {
        <A href=href attr:class="block rounded-xl shadow-md bg-white p-4 w-64 hover:shadow-lg">
            <div class="text-xs uppercase tracking-wide text-blue-500">{kind_label}</div>
            <div class="font-bold font-mono">{entry.record.sku.clone()}</div>
            <div class="text-sm text-gray-700">"Buy: " {buy}</div>
            <div class="text-sm text-gray-700">"Sell: " {sell}</div>
            <div class="text-xs text-gray-400 mt-1">
                <RelativeToNow timestamp=entry.record.created_at />
            </div>
        </A>
    }
}
