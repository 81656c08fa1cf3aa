use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-gray-100">
            <div class="container mx-auto px-6 pt-10 pb-6">
                <p>"\u{a9} Copyright 2022 Prices.tf"</p>
                <p class="text-xs">
                    "Powered by "
                    <a
                        href="https://steampowered.com"
                        target="_blank"
                        class="no-underline hover:underline"
                    >
                        "Steam"
                    </a>
                    " and "
                    <a
                        href="https://backpack.tf"
                        target="_blank"
                        class="no-underline hover:underline"
                    >
                        "backpack.tf"
                    </a>
                    "."
                </p>
            </div>
        </footer>
    }
}
