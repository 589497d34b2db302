use dioxus::prelude::*;

mod api;
mod cache;
mod cache_service;
mod components;
mod db;
mod diagnostics;
mod playback;
mod server;

use components::AppShell;

const FAVICON: Asset = asset!("/assets/favicon.ico");
const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Meta { name: "theme-color", content: "#008080" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Quranic Audio Player" }

        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
