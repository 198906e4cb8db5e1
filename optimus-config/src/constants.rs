pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Port on which SMTP expects TLS from the first byte instead of STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_IMAGES_DIR: &str = "Images";
pub const DEFAULT_PROFILE_DIR: &str = "Profile";
pub const DEFAULT_CATALOG_FILE: &str = "catalog.toml";
