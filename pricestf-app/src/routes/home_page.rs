use leptos::prelude::*;

use crate::components::meta::{MetaDescription, MetaTitle};
use crate::components::recent_changes::RecentChanges;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <MetaTitle title="Prices.tf - Automatically generated prices for Team Fortress 2" />
        <MetaDescription text="Prices.tf - Automatically and reliably pricing Team Fortress 2 items" />
        <div class="container mx-auto mt-10">
            <div class="text-center">
                <h1 class="text-xl">"Recent price changes"</h1>
            </div>
            <RecentChanges />
        </div>
    }
}
