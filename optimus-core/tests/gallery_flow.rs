use std::{io::Write, sync::Arc};

use optimus_core::gallery::{
    Catalog, CatalogError, Effect, Event, GalleryController, ViewState,
};
use optimus_core::model::{CategoryKey, GalleryView};
use url::Url;

const CATALOG: &str = r#"
[[items]]
src = "Images/wash/borehole-1.jpg"
alt = "Borehole rig on site"
caption = "Drilling at Chongwe"
categories = ["wash-projects"]
group = "Chongwe Borehole"
client = "Ministry of Water Development"
"#;

fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write catalog");
    file
}

#[test]
fn catalog_file_drives_the_controller() {
    let file = write_catalog(CATALOG);
    let catalog = Arc::new(Catalog::load(file.path()).expect("catalog loads"));
    let url = Url::parse("https://optimusbcc.co.zm/gallery.html").unwrap();

    let (mut controller, effects) = GalleryController::load(catalog, url);
    assert_eq!(controller.view_state(), ViewState::Landing);
    assert!(effects.contains(&Effect::Render(GalleryView::Landing)));

    controller.update(Event::SelectCategory("wash-projects".into()));
    match controller.rendered() {
        GalleryView::Groups { groups, category, .. } => {
            assert_eq!(*category, CategoryKey::WashProjects);
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].cards.len(), 1);
            assert_eq!(
                groups[0].cards[0].item.client_label.as_deref(),
                Some("Ministry of Water Development")
            );
        }
        other => panic!("expected one group, got {other:?}"),
    }

    controller.update(Event::SelectCategory("residential".into()));
    assert!(matches!(controller.rendered(), GalleryView::Empty { .. }));
    assert_eq!(controller.url().query(), Some("type=residential"));
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("catalog.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn malformed_catalog_is_a_parse_error() {
    let file = write_catalog("[[items]\nsrc = ");
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}
