//! Single-entry state machine behind the gallery page.
//!
//! The host feeds user input and navigation as [`Event`]s into
//! [`GalleryController::update`] and applies the returned [`Effect`]s in
//! order. State is owned by the controller; nothing here is global.

use std::sync::Arc;

use optimus_model::{CategoryKey, GalleryItem, GalleryView};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{
    catalog::Catalog,
    lightbox::{Lightbox, LightboxError},
    view_state::ViewState,
};

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A category card was chosen. The key is unvalidated input.
    SelectCategory(String),
    GoBack,
    /// The browser moved through history (back/forward).
    HistoryChanged(Url),
    /// A rendered card was clicked; the index comes from the card.
    OpenItem(usize),
    Next,
    Prev,
    CloseLightbox,
    KeyPressed(Key),
    /// The host could not start video playback.
    PlaybackFailed(String),
    ToggleMenu,
    CloseMenu,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("no category is active")]
    NoActiveCategory,

    #[error(transparent)]
    Lightbox(#[from] LightboxError),
}

/// Instruction for the presentation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetTitle(String),
    /// Push a history entry without reloading the page.
    PushHistory(Url),
    ScrollToTop,
    Render(GalleryView),
    FreezeScroll,
    RestoreScroll,
    ShowItem {
        index: usize,
        total: usize,
        item: GalleryItem,
        /// Set for videos; the host should attempt playback and report a
        /// failure through [`Event::PlaybackFailed`].
        autoplay: bool,
    },
    StopVideo,
    HideLightbox,
    ShowMenu,
    HideMenu,
    Rejected(Rejection),
}

#[derive(Debug, Clone)]
pub struct GalleryController {
    catalog: Arc<Catalog>,
    url: Url,
    view: ViewState,
    rendered: GalleryView,
    lightbox: Option<Lightbox>,
    menu_open: bool,
    // Menu and lightbox both freeze page scroll; only the last release
    // restores it.
    scroll_locks: u8,
}

impl GalleryController {
    /// Build the controller for a freshly loaded page at `url`.
    pub fn load(catalog: Arc<Catalog>, url: Url) -> (Self, Vec<Effect>) {
        let view = ViewState::from_url(&url);
        let rendered = render(&catalog, view);
        let controller = Self {
            catalog,
            url,
            view,
            rendered: rendered.clone(),
            lightbox: None,
            menu_open: false,
            scroll_locks: 0,
        };
        let effects = vec![Effect::SetTitle(view.title()), Effect::Render(rendered)];
        (controller, effects)
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn rendered(&self) -> &GalleryView {
        &self.rendered
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scroll_frozen(&self) -> bool {
        self.scroll_locks > 0
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            Event::SelectCategory(raw) => match CategoryKey::parse(&raw) {
                Some(category) => {
                    self.close_lightbox(&mut effects);
                    self.navigate(ViewState::Gallery(category), &mut effects);
                }
                None => {
                    warn!(key = %raw, "ignoring unknown gallery category");
                    effects.push(Effect::Rejected(Rejection::UnknownCategory(raw)));
                }
            },
            Event::GoBack => {
                if self.view != ViewState::Landing {
                    self.close_lightbox(&mut effects);
                    self.navigate(ViewState::Landing, &mut effects);
                }
            }
            Event::HistoryChanged(url) => {
                self.close_lightbox(&mut effects);
                self.view = ViewState::from_url(&url);
                self.url = url;
                self.rendered = render(&self.catalog, self.view);
                effects.push(Effect::SetTitle(self.view.title()));
                effects.push(Effect::Render(self.rendered.clone()));
            }
            Event::OpenItem(index) => self.open_item(index, &mut effects),
            Event::Next => self.step(Lightbox::next, &mut effects),
            Event::Prev => self.step(Lightbox::prev, &mut effects),
            Event::CloseLightbox => self.close_lightbox(&mut effects),
            Event::KeyPressed(key) => self.key_pressed(key, &mut effects),
            Event::PlaybackFailed(reason) => {
                debug!(%reason, "video playback was not started");
            }
            Event::ToggleMenu => {
                if self.menu_open {
                    self.close_menu(&mut effects);
                } else {
                    self.menu_open = true;
                    self.lock_scroll(&mut effects);
                    effects.push(Effect::ShowMenu);
                }
            }
            Event::CloseMenu => self.close_menu(&mut effects),
        }

        effects
    }

    fn navigate(&mut self, view: ViewState, effects: &mut Vec<Effect>) {
        self.view = view;
        view.apply_to_url(&mut self.url);
        self.rendered = render(&self.catalog, view);

        effects.push(Effect::SetTitle(view.title()));
        effects.push(Effect::PushHistory(self.url.clone()));
        effects.push(Effect::ScrollToTop);
        effects.push(Effect::Render(self.rendered.clone()));
    }

    fn open_item(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if self.view == ViewState::Landing {
            effects.push(Effect::Rejected(Rejection::NoActiveCategory));
            return;
        }

        match Lightbox::open(self.rendered.display_sequence(), index) {
            Ok(lightbox) => {
                if self.lightbox.is_none() {
                    self.lock_scroll(effects);
                } else if self.current_is_video() {
                    effects.push(Effect::StopVideo);
                }
                self.lightbox = Some(lightbox);
                self.show_current(effects);
            }
            Err(err) => {
                warn!(index, error = %err, "lightbox open rejected");
                effects.push(Effect::Rejected(err.into()));
            }
        }
    }

    fn step(
        &mut self,
        advance: fn(&mut Lightbox) -> &GalleryItem,
        effects: &mut Vec<Effect>,
    ) {
        if self.lightbox.is_none() {
            return;
        }
        if self.current_is_video() {
            effects.push(Effect::StopVideo);
        }
        if let Some(lightbox) = self.lightbox.as_mut() {
            advance(lightbox);
        }
        self.show_current(effects);
    }

    fn show_current(&self, effects: &mut Vec<Effect>) {
        if let Some(lightbox) = &self.lightbox {
            let item = lightbox.current().clone();
            effects.push(Effect::ShowItem {
                index: lightbox.index(),
                total: lightbox.len(),
                autoplay: item.is_video(),
                item,
            });
        }
    }

    fn current_is_video(&self) -> bool {
        self.lightbox
            .as_ref()
            .is_some_and(|lightbox| lightbox.current().is_video())
    }

    fn close_lightbox(&mut self, effects: &mut Vec<Effect>) {
        if self.lightbox.is_none() {
            return;
        }
        if self.current_is_video() {
            effects.push(Effect::StopVideo);
        }
        self.lightbox = None;
        effects.push(Effect::HideLightbox);
        self.unlock_scroll(effects);
    }

    fn close_menu(&mut self, effects: &mut Vec<Effect>) {
        if !self.menu_open {
            return;
        }
        self.menu_open = false;
        effects.push(Effect::HideMenu);
        self.unlock_scroll(effects);
    }

    fn key_pressed(&mut self, key: Key, effects: &mut Vec<Effect>) {
        if self.lightbox.is_some() {
            match key {
                Key::Escape => self.close_lightbox(effects),
                Key::ArrowRight => self.step(Lightbox::next, effects),
                Key::ArrowLeft => self.step(Lightbox::prev, effects),
                Key::Other => {}
            }
        } else if key == Key::Escape {
            self.close_menu(effects);
        }
    }

    fn lock_scroll(&mut self, effects: &mut Vec<Effect>) {
        if self.scroll_locks == 0 {
            effects.push(Effect::FreezeScroll);
        }
        self.scroll_locks += 1;
    }

    fn unlock_scroll(&mut self, effects: &mut Vec<Effect>) {
        self.scroll_locks = self.scroll_locks.saturating_sub(1);
        if self.scroll_locks == 0 {
            effects.push(Effect::RestoreScroll);
        }
    }
}

fn render(catalog: &Catalog, view: ViewState) -> GalleryView {
    match view {
        ViewState::Landing => GalleryView::Landing,
        ViewState::Gallery(category) => catalog.render(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optimus_model::{MediaKind, NO_ITEMS_PLACEHOLDER, routes::gallery::TYPE_PARAM};

    fn item(src: &str, group: &str, kind: MediaKind) -> GalleryItem {
        GalleryItem {
            source: src.into(),
            alt_text: format!("{src} alt"),
            caption: String::new(),
            media_kind: kind,
            categories: [CategoryKey::WashProjects].into_iter().collect(),
            group_label: group.into(),
            client_label: None,
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_items(vec![
            item("a.jpg", "Borehole", MediaKind::Image),
            item("b.mp4", "Toilet Block", MediaKind::Video),
            item("c.jpg", "Borehole", MediaKind::Image),
        ]))
    }

    fn page(query: &str) -> Url {
        Url::parse(&format!("https://site.test/gallery.html{query}")).unwrap()
    }

    fn type_param(url: &Url) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == TYPE_PARAM)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn load_with_known_type_starts_in_gallery() {
        let (controller, effects) =
            GalleryController::load(catalog(), page("?type=wash-projects"));
        assert_eq!(
            controller.view_state(),
            ViewState::Gallery(CategoryKey::WashProjects)
        );
        assert_eq!(effects[0], Effect::SetTitle("WASH Projects | Optimus".into()));
        assert!(matches!(effects[1], Effect::Render(GalleryView::Groups { .. })));
    }

    #[test]
    fn select_and_go_back_sync_the_url() {
        for key in CategoryKey::ALL {
            let (mut controller, _) = GalleryController::load(catalog(), page(""));
            let effects = controller.update(Event::SelectCategory(key.as_str().into()));
            assert_eq!(type_param(controller.url()).as_deref(), Some(key.as_str()));
            assert!(effects.contains(&Effect::PushHistory(controller.url().clone())));
            assert!(effects.contains(&Effect::ScrollToTop));

            let effects = controller.update(Event::GoBack);
            assert_eq!(type_param(controller.url()), None);
            assert_eq!(controller.view_state(), ViewState::Landing);
            assert!(effects.contains(&Effect::Render(GalleryView::Landing)));
        }
    }

    #[test]
    fn url_load_matches_programmatic_selection() {
        for key in CategoryKey::ALL {
            let query = format!("?type={}", key.as_str());
            let (loaded, _) = GalleryController::load(catalog(), page(&query));
            let (mut selected, _) = GalleryController::load(catalog(), page(""));
            selected.update(Event::SelectCategory(key.as_str().into()));
            assert_eq!(loaded.rendered(), selected.rendered());
        }
    }

    #[test]
    fn unknown_category_is_rejected_without_state_change() {
        let (mut controller, _) = GalleryController::load(catalog(), page(""));
        let effects = controller.update(Event::SelectCategory("bridges".into()));
        assert_eq!(
            effects,
            vec![Effect::Rejected(Rejection::UnknownCategory("bridges".into()))]
        );
        assert_eq!(controller.view_state(), ViewState::Landing);
        assert_eq!(controller.url().query(), None);
    }

    #[test]
    fn empty_category_renders_only_the_placeholder() {
        let (mut controller, _) = GalleryController::load(catalog(), page(""));
        controller.update(Event::SelectCategory("residential".into()));
        match controller.rendered() {
            GalleryView::Empty { message, .. } => {
                assert_eq!(message, NO_ITEMS_PLACEHOLDER)
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(controller.rendered().card_count(), 0);

        let effects = controller.update(Event::OpenItem(0));
        assert_eq!(
            effects,
            vec![Effect::Rejected(Rejection::Lightbox(LightboxError::Empty))]
        );
        assert!(!controller.scroll_frozen());
    }

    #[test]
    fn lightbox_follows_grouped_order_and_wraps() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));

        let effects = controller.update(Event::OpenItem(0));
        assert_eq!(effects[0], Effect::FreezeScroll);
        assert!(controller.scroll_frozen());

        // Grouped order is a.jpg, c.jpg (Borehole) then b.mp4.
        let sources: Vec<_> = controller
            .lightbox()
            .unwrap()
            .items()
            .iter()
            .map(|i| i.source.clone())
            .collect();
        assert_eq!(sources, ["a.jpg", "c.jpg", "b.mp4"]);

        let effects = controller.update(Event::Prev);
        assert_eq!(controller.lightbox().unwrap().index(), 2);
        assert!(matches!(
            effects.last(),
            Some(Effect::ShowItem { index: 2, total: 3, autoplay: true, .. })
        ));

        let effects = controller.update(Event::Next);
        assert_eq!(effects[0], Effect::StopVideo);
        assert_eq!(controller.lightbox().unwrap().index(), 0);
    }

    #[test]
    fn closing_on_a_video_stops_it_and_restores_scroll() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));
        controller.update(Event::OpenItem(2));
        let effects = controller.update(Event::KeyPressed(Key::Escape));
        assert_eq!(
            effects,
            vec![Effect::StopVideo, Effect::HideLightbox, Effect::RestoreScroll]
        );
        assert!(controller.lightbox().is_none());
        assert!(!controller.scroll_frozen());
    }

    #[test]
    fn arrow_keys_only_act_while_lightbox_is_open() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));
        assert!(controller.update(Event::KeyPressed(Key::ArrowRight)).is_empty());

        controller.update(Event::OpenItem(0));
        controller.update(Event::KeyPressed(Key::ArrowRight));
        assert_eq!(controller.lightbox().unwrap().index(), 1);
        controller.update(Event::KeyPressed(Key::ArrowLeft));
        assert_eq!(controller.lightbox().unwrap().index(), 0);
    }

    #[test]
    fn open_in_landing_is_rejected() {
        let (mut controller, _) = GalleryController::load(catalog(), page(""));
        assert_eq!(
            controller.update(Event::OpenItem(0)),
            vec![Effect::Rejected(Rejection::NoActiveCategory)]
        );
    }

    #[test]
    fn history_change_rederives_view_and_closes_lightbox() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));
        controller.update(Event::OpenItem(1));

        let effects = controller.update(Event::HistoryChanged(page("")));
        assert_eq!(controller.view_state(), ViewState::Landing);
        assert!(controller.lightbox().is_none());
        assert!(effects.contains(&Effect::HideLightbox));
        assert!(!effects.iter().any(|e| matches!(e, Effect::PushHistory(_))));

        controller.update(Event::HistoryChanged(page("?type=bogus")));
        assert_eq!(controller.view_state(), ViewState::Landing);
    }

    #[test]
    fn menu_and_lightbox_share_the_scroll_lock() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));

        assert_eq!(
            controller.update(Event::ToggleMenu),
            vec![Effect::FreezeScroll, Effect::ShowMenu]
        );
        let effects = controller.update(Event::OpenItem(0));
        assert!(!effects.contains(&Effect::FreezeScroll));

        controller.update(Event::CloseLightbox);
        assert!(controller.scroll_frozen(), "menu still holds the lock");

        assert_eq!(
            controller.update(Event::CloseMenu),
            vec![Effect::HideMenu, Effect::RestoreScroll]
        );
        assert!(controller.update(Event::CloseMenu).is_empty());
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let (mut controller, _) =
            GalleryController::load(catalog(), page("?type=wash-projects"));
        controller.update(Event::OpenItem(2));
        let effects =
            controller.update(Event::PlaybackFailed("NotAllowedError".into()));
        assert!(effects.is_empty());
        assert!(controller.lightbox().is_some());
    }
}
