//! Route definitions shared by the server and its clients.

pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

pub mod contact {
    /// Self-hosted relay endpoint used by the site's own form script.
    pub const SUBMIT: &str = "/api/contact";
    /// Compatibility path for deployments that used to post to a hosted
    /// serverless function.
    pub const HOSTED_SUBMIT: &str = "/.netlify/functions/contact";
}

pub mod gallery {
    pub const VIEW: &str = "/api/gallery";
    pub const CATEGORIES: &str = "/api/gallery/categories";
    /// Query parameter carrying the active category.
    pub const TYPE_PARAM: &str = "type";
}

pub mod assets {
    pub const IMAGES: &str = "/Images";
    pub const PROFILE: &str = "/Profile";
    /// Single segments are downloads, deeper paths serve the profile tree.
    pub const PROFILE_PATH: &str = "/Profile/{*path}";
}
