//! Backend client tests against a scripted local HTTP server.

mod common;

use common::{sample_preview, Reply, TestServer};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use vidgrab::api::client::{EMPTY_PAYLOAD_MESSAGE, MISSING_FILE_MESSAGE};
use vidgrab::api::{request_download, request_preview, FormatKind, HttpBackend};
use vidgrab::utils::error::UNREACHABLE_MESSAGE;
use vidgrab::utils::AppSettings;
use vidgrab::VidgrabError;

#[tokio::test]
async fn preview_success_is_normalized() {
    let server = TestServer::start(vec![("/preview", Reply::json(200, sample_preview()))]).await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let preview = assert_ok!(request_preview(&backend, "https://youtu.be/abc").await);
    assert_eq!(preview.title, "Sample Video");
    assert_eq!(preview.duration_seconds, 3725);
    assert_eq!(preview.view_count, 1_234_567);
    assert_eq!(preview.formats.len(), 3);

    let audio = &preview.formats[0];
    assert_eq!(audio.kind, FormatKind::Audio);
    assert_eq!(audio.video_codec, None);
    let video_only = &preview.formats[1];
    assert_eq!(video_only.audio_codec, None);
    assert_eq!(video_only.height, Some(1080));

    let requests = server.recorded();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /preview"));
    assert_eq!(requests[0].json(), json!({ "url": "https://youtu.be/abc" }));
}

#[tokio::test]
async fn preview_failure_carries_backend_message() {
    let server = TestServer::start(vec![(
        "/preview",
        Reply::json(400, json!({ "success": false, "message": "Video unavailable" })),
    )])
    .await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let err = assert_err!(request_preview(&backend, "https://youtu.be/abc").await);
    assert!(matches!(err, VidgrabError::Preview(ref m) if m == "Video unavailable"));
}

#[tokio::test]
async fn unreachable_backend_is_a_preview_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let settings = AppSettings {
        backend_url: format!("http://{}", addr),
        ..Default::default()
    };
    let backend = HttpBackend::new(&settings).expect("backend");

    let err = assert_err!(request_preview(&backend, "https://youtu.be/abc").await);
    assert!(matches!(err, VidgrabError::Preview(_)));
    assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
}

#[tokio::test]
async fn binary_download_uses_header_filename() {
    let server = TestServer::start(vec![(
        "/download",
        Reply::file("video/mp4", b"\x00\x00\x00\x18ftypmp42")
            .with_header("Content-Disposition", "attachment; filename=\"My Clip.mp4\""),
    )])
    .await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let result = assert_ok!(request_download(&backend, "https://youtu.be/abc", "22", false).await);
    assert_eq!(result.filename, "My Clip.mp4");
    assert_eq!(result.bytes, b"\x00\x00\x00\x18ftypmp42");

    let requests = server.recorded();
    assert_eq!(
        requests[0].json(),
        json!({ "url": "https://youtu.be/abc", "format_id": "22", "extract_audio": false })
    );
}

#[tokio::test]
async fn binary_download_without_header_gets_mode_default() {
    let server = TestServer::start(vec![("/download", Reply::file("audio/mpeg", b"ID3"))]).await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let result = assert_ok!(request_download(&backend, "https://youtu.be/abc", "140", true).await);
    assert_eq!(result.filename, "audio.mp3");
}

#[tokio::test]
async fn json_error_body_becomes_download_error() {
    let server = TestServer::start(vec![(
        "/download",
        Reply::json(500, json!({ "success": false, "message": "Format not available" })),
    )])
    .await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let err = assert_err!(request_download(&backend, "https://youtu.be/abc", "999", false).await);
    assert_eq!(err.user_message(), "Format not available");
}

#[tokio::test]
async fn error_status_without_message_names_the_status() {
    let server = TestServer::start(vec![(
        "/download",
        Reply {
            status: 502,
            content_type: "text/html",
            headers: Vec::new(),
            body: b"<html>Bad Gateway</html>".to_vec(),
        },
    )])
    .await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let err = assert_err!(request_download(&backend, "https://youtu.be/abc", "22", false).await);
    assert_eq!(err.user_message(), "Download failed (HTTP 502)");
}

#[tokio::test]
async fn empty_payload_is_rejected() {
    let server = TestServer::start(vec![("/download", Reply::file("video/mp4", b""))]).await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let err = assert_err!(request_download(&backend, "https://youtu.be/abc", "22", false).await);
    assert_eq!(err.user_message(), EMPTY_PAYLOAD_MESSAGE);
}

#[tokio::test]
async fn json_handoff_fetches_prepared_file() {
    let server = TestServer::start(vec![
        (
            "/download",
            Reply::json(200, json!({ "success": true, "filename": "clip.webm" })),
        ),
        ("/get_file", Reply::file("video/webm", b"webm-bytes")),
    ])
    .await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let result = assert_ok!(request_download(&backend, "https://youtu.be/abc", "43", false).await);
    assert_eq!(result.filename, "clip.webm");
    assert_eq!(result.bytes, b"webm-bytes");

    let requests = server.recorded();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].request_line.starts_with("GET /get_file?filename=clip.webm"));
}

#[tokio::test]
async fn json_success_without_filename_is_an_error() {
    let server =
        TestServer::start(vec![("/download", Reply::json(200, json!({ "success": true })))]).await;
    let backend = HttpBackend::new(&server.settings()).expect("backend");

    let err = assert_err!(request_download(&backend, "https://youtu.be/abc", "22", false).await);
    assert_eq!(err.user_message(), MISSING_FILE_MESSAGE);
}
