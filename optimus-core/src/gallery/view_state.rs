use optimus_model::{CategoryKey, routes::gallery::TYPE_PARAM};
use url::Url;

pub const SITE_NAME: &str = "Optimus";
pub const LANDING_TITLE: &str = "Project Gallery | Optimus";

/// Which page of the gallery is showing. The address bar's `type` query
/// parameter is the only persisted form of this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Landing,
    Gallery(CategoryKey),
}

impl ViewState {
    /// Derive the view from a URL. A missing or unknown `type` value falls
    /// back to the landing view.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs()
            .find(|(key, _)| key == TYPE_PARAM)
            .and_then(|(_, value)| CategoryKey::parse(&value))
            .map(ViewState::Gallery)
            .unwrap_or(ViewState::Landing)
    }

    /// Write this view into `url`, replacing any existing `type` pair and
    /// leaving other query pairs untouched.
    pub fn apply_to_url(&self, url: &mut Url) {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != TYPE_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        if retained.is_empty() && self.category().is_none() {
            return;
        }

        let mut query = url.query_pairs_mut();
        query.extend_pairs(retained);
        if let Some(category) = self.category() {
            query.append_pair(TYPE_PARAM, category.as_str());
        }
    }

    pub fn category(&self) -> Option<CategoryKey> {
        match self {
            ViewState::Landing => None,
            ViewState::Gallery(category) => Some(*category),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ViewState::Landing => LANDING_TITLE.to_string(),
            ViewState::Gallery(category) => {
                format!("{} | {SITE_NAME}", category.display_name())
            }
        }
    }
}
