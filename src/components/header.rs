use crate::components::{view_label, AppView, Icon};
use dioxus::prelude::*;

/// Top chrome: brand mark plus the view switcher.
#[component]
pub fn Header() -> Element {
    let mut current_view = use_context::<Signal<AppView>>();
    let active = current_view();

    rsx! {
        header { class: "app-header",
            div { class: "brand",
                Icon { name: "book-open".to_string(), class: "icon-lg".to_string() }
                span { class: "brand-name", "Quranic Audio Player" }
            }

            nav { class: "app-nav",
                for view in [AppView::Home, AppView::About, AppView::Contact] {
                    button {
                        class: if active == view { "nav-link nav-link-active" } else { "nav-link" },
                        onclick: move |_| current_view.set(view),
                        "{view_label(&view)}"
                    }
                }
            }
        }
    }
}
