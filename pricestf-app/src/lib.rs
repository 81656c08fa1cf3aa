pub(crate) mod api;
pub(crate) mod components;
pub(crate) mod error;
pub(crate) mod footer;
pub(crate) mod global_state;
pub(crate) mod main_nav;
pub mod routes;
pub(crate) mod ws;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::footer::Footer;
use crate::global_state::access_token::TokenStore;
use crate::main_nav::MainNav;
use crate::routes::home_page::HomePage;
use crate::routes::item_page::ItemPage;
use crate::routes::not_found::NotFound;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(TokenStore::default());

    view! {
        <Title text="Prices.tf" />
        <Router>
            <div class="flex flex-col min-h-screen">
                <MainNav />
                <main class="grow">
                    <Routes fallback=NotFound>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/items/:sku") view=ItemPage />
                    </Routes>
                </main>
                <Footer />
            </div>
        </Router>
    }
}
