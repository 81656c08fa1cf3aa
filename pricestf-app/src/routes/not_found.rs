use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <Title text="Page Not Found - Prices.tf" />
        <div class="container mx-auto mt-10 text-center space-y-4">
            <h1 class="text-xl">"Page not found"</h1>
            <p class="text-gray-600">"The page you are looking for does not exist."</p>
            <A href="/" attr:class="text-blue-500 hover:underline">
                "Back to the home page"
            </A>
        </div>
    }
}
