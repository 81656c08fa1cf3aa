use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn MainNav() -> impl IntoView {
    let (expanded, set_expanded) = signal(false);

    view! {
        <nav class="flex items-center flex-wrap bg-blue-500 p-3">
            <A href="/" attr:class="inline-flex items-center p-2 mr-4">
                <span class="text-xl text-white font-bold uppercase tracking-wide">
                    "Prices.tf"
                </span>
            </A>
            <button
                class="inline-flex p-3 hover:bg-blue-600 rounded lg:hidden text-white ml-auto outline-none"
                on:click=move |_| set_expanded.update(|expanded| *expanded = !*expanded)
            >
                "\u{2630}"
            </button>
            <div class=move || {
                if expanded.get() {
                    "w-full lg:inline-flex lg:flex-grow lg:w-auto"
                } else {
                    "hidden w-full lg:inline-flex lg:flex-grow lg:w-auto"
                }
            }>
                <div class="lg:inline-flex lg:flex-row lg:ml-auto lg:w-auto w-full lg:items-center items-start flex flex-col lg:h-auto">
                    <A
                        href="/"
                        attr:class="lg:inline-flex lg:w-auto w-full px-3 py-2 rounded text-white font-bold items-center justify-center hover:bg-blue-600"
                    >
                        "Home"
                    </A>
                </div>
            </div>
        </nav>
    }
}
