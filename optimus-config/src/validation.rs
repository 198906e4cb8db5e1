use crate::models::Config;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Non-fatal problems worth surfacing at startup. The server still runs;
/// inquiries fail with a configuration error until they are fixed.
pub fn check(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.smtp.is_none() {
        warnings.push_with_hint(
            "SMTP relay is not configured; contact submissions will fail",
            "Set SMTP_HOST, SMTP_USER and SMTP_PASS (or SMTP_PASS_FILE)",
        );
    }

    if config.contact.recipient.is_none() {
        warnings.push_with_hint(
            "No inquiry recipient configured; contact submissions will fail",
            "Set CONTACT_RECIPIENT to the mailbox that should receive inquiries",
        );
    } else if config.contact.sender.is_none() {
        warnings.push(
            "CONTACT_SENDER not set; inquiries are sent from the recipient address",
        );
    }

    if !config.site.static_dir.exists() {
        warnings.push_with_hint(
            format!(
                "Static directory {} does not exist",
                config.site.static_dir.display()
            ),
            "Run `optimus-server build` to assemble the site",
        );
    }

    if !config.site.catalog_path.exists() {
        warnings.push(format!(
            "Gallery catalog {} not found; the gallery will be empty",
            config.site.catalog_path.display()
        ));
    }

    if config.cors.is_wildcard_included() && !config.dev_mode {
        warnings.push(
            "CORS allows any origin; set CORS_ALLOWED_ORIGINS to restrict it",
        );
    }

    warnings
}
