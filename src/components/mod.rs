mod about;
mod app;
mod app_view;
mod audio_controller;
mod contact;
mod header;
mod icons;
mod particles;
mod player;
mod reciter_selector;
mod section_bar;
pub mod selection;
mod surah_selector;
mod text_display;

pub use about::AboutView;
pub use app::{
    AppShell, CatalogErrorSignal, LoadingFlags, SelectedSectionSignal, ShowTextSignal,
    ShuffleSignal, SurahNavigator,
};
pub use app_view::{view_label, AppView, BrowseTab};
pub use audio_controller::{AudioController, PlaybackHandle};
pub use contact::ContactView;
pub use header::Header;
pub use icons::Icon;
pub use particles::ParticleBackground;
pub use player::Player;
pub use reciter_selector::ReciterSelector;
pub use section_bar::SectionBar;
pub use surah_selector::SurahSelector;
pub use text_display::TextDisplay;
