//! Defines the shared application view state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Home,
    About,
    Contact,
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::Home => "Listen",
        AppView::About => "About",
        AppView::Contact => "Contact",
    }
}

/// Which browsing panel is open on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTab {
    Reciters,
    Surahs,
}
