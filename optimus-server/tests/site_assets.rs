use axum::http::StatusCode;

mod common;
use common::TestSite;

#[tokio::test]
async fn profile_download_is_an_attachment() {
    let site = TestSite::new();
    let server = site.server(None);

    let response = server.get("/Profile/Company%20Profile.pdf").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.7");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"Company Profile.pdf\""
    );
}

#[tokio::test]
async fn traversal_attempts_are_invalid_filenames() {
    let site = TestSite::new();
    std::fs::write(site.root().join("secret.txt"), "do not serve").unwrap();
    let server = site.server(None);

    for path in ["/Profile/..%2Fsecret.txt", "/Profile/..%5Csecret.txt"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Invalid filename");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_out_of_profile_is_denied() {
    let site = TestSite::new();
    let outside = site.root().join("secret.txt");
    std::fs::write(&outside, "do not serve").unwrap();
    std::os::unix::fs::symlink(&outside, site.root().join("Profile/leak.pdf")).unwrap();
    let server = site.server(None);

    let response = server.get("/Profile/leak.pdf").await;

    response.assert_status(StatusCode::FORBIDDEN);
    response.assert_text("Access denied");
}

#[tokio::test]
async fn missing_profile_file_is_not_found() {
    let site = TestSite::new();
    let server = site.server(None);

    let response = server.get("/Profile/Brochure.pdf").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("File not found");
}

#[tokio::test]
async fn nested_profile_files_are_served_from_the_tree() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.root().join("Profile/certs")).unwrap();
    std::fs::write(site.root().join("Profile/certs/nceic.pdf"), b"%PDF-cert").unwrap();
    let server = site.server(None);

    let response = server.get("/Profile/certs/nceic.pdf").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-cert");
    assert!(response.maybe_header("content-disposition").is_none());

    server
        .get("/Profile/certs/missing.pdf")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn images_resolve_with_and_without_extension() {
    let site = TestSite::new();
    let server = site.server(None);

    let exact = server.get("/Images/projects/hero.jpg").await;
    exact.assert_status_ok();
    assert_eq!(exact.as_bytes().as_ref(), b"jpeg-bytes");

    let bare = server.get("/Images/projects/hero").await;
    bare.assert_status_ok();
    assert_eq!(bare.as_bytes().as_ref(), b"jpeg-bytes");

    server
        .get("/Images/projects/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_serves_static_index() {
    let site = TestSite::new();
    let server = site.server(None);

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_text("<h1>Optimus</h1>");
}

#[tokio::test]
async fn health_reports_relay_and_catalog() {
    let site = TestSite::new();
    let server = site.server(None);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["catalog"]["items"], 3);
    assert_eq!(body["checks"]["mail_relay"], false);
    assert_eq!(body["checks"]["static_dir"], true);

    server.get("/ping").await.assert_status_ok();
}
