use std::{fs, path::Path, sync::Arc};

use async_trait::async_trait;
use axum_test::TestServer;
use mockall::mock;
use optimus_config::{
    Config, ConfigMetadata, ContactConfig, CorsConfig, ServerConfig,
    SiteConfig,
};
use optimus_core::gallery::Catalog;
use optimus_model::ContactRequest;
use optimus_server::{
    AppState, create_app,
    mail::{ContactMailer, MailError},
};
use tempfile::TempDir;

mock! {
    pub Mailer {}

    #[async_trait]
    impl ContactMailer for Mailer {
        async fn send(&self, request: &ContactRequest) -> Result<(), MailError>;
        async fn verify(&self) -> Result<(), MailError>;
    }
}

pub const CATALOG: &str = r#"
[[items]]
src = "Images/wash/borehole-1.jpg"
alt = "Borehole rig"
caption = "Drilling at Chongwe"
categories = ["wash-projects"]
group = "Chongwe Borehole"
client = "Ministry of Water Development"

[[items]]
src = "Images/wash/borehole-2.mp4"
kind = "video"
categories = ["wash-projects", "civil-works"]
group = "Chongwe Borehole"

[[items]]
src = "Images/civil/culvert.jpg"
alt = "Box culvert"
categories = ["civil-works"]
group = "Mumbwa Road Culverts"
"#;

/// A site root on disk with the layout the server expects.
// Code is used by test modules, but not in this scope
#[allow(unused)]
#[derive(Debug)]
pub struct TestSite {
    pub dir: TempDir,
    pub config: Config,
}

#[allow(unused)]
impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        fs::create_dir_all(root.join("static")).unwrap();
        fs::write(root.join("static/index.html"), "<h1>Optimus</h1>").unwrap();

        fs::create_dir_all(root.join("Images/projects")).unwrap();
        fs::write(root.join("Images/projects/hero.jpg"), b"jpeg-bytes").unwrap();

        fs::create_dir_all(root.join("Profile")).unwrap();
        fs::write(root.join("Profile/Company Profile.pdf"), b"%PDF-1.7").unwrap();

        fs::write(root.join("catalog.toml"), CATALOG).unwrap();

        let config = config_for(root);
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn state(&self, mailer: Option<Arc<dyn ContactMailer>>) -> AppState {
        let catalog = Catalog::load(&self.config.site.catalog_path)
            .expect("catalog loads");
        AppState::new(Arc::new(self.config.clone()), Arc::new(catalog), mailer)
    }

    pub fn server(&self, mailer: Option<Arc<dyn ContactMailer>>) -> TestServer {
        TestServer::new(create_app(self.state(mailer))).expect("test server")
    }
}

pub fn config_for(root: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        site: SiteConfig {
            root: root.to_path_buf(),
            static_dir: root.join("static"),
            images_dir: root.join("Images"),
            profile_dir: root.join("Profile"),
            catalog_path: root.join("catalog.toml"),
        },
        smtp: None,
        contact: ContactConfig {
            recipient: Some("office@optimus.test".into()),
            sender: None,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".into()],
        },
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}
