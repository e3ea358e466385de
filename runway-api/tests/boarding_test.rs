use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use image::{Rgba, RgbaImage};
use runway_api::{app, AppState};
use runway_core::repository::{BookingRepository, StyleConfigRepository};
use runway_core::{BookingPassRecord, StyleConfigSummary};
use runway_pass::layout::TextOp;
use runway_pass::{AssetStore, BoardingPassService, Compositor, RenderError, StyleRegistry, TextPainter};
use serde_json::Value;
use tower::ServiceExt;

struct InMemoryBookings(HashMap<String, BookingPassRecord>);

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn find_pass_record(
        &self,
        booking_id: &str,
    ) -> Result<Option<BookingPassRecord>, Box<dyn Error + Send + Sync>> {
        Ok(self.0.get(booking_id).cloned())
    }
}

struct InMemoryStyles(HashMap<i64, (String, String)>);

#[async_trait]
impl StyleConfigRepository for InMemoryStyles {
    async fn find_boarding_style(
        &self,
        id: i64,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        Ok(self.0.get(&id).map(|(_, data)| data.clone()))
    }

    async fn list_boarding_styles(
        &self,
    ) -> Result<Vec<StyleConfigSummary>, Box<dyn Error + Send + Sync>> {
        Ok(self
            .0
            .iter()
            .map(|(id, (name, _))| StyleConfigSummary {
                id: *id,
                name: name.clone(),
                description: None,
                draw_function: Some("kja".to_string()),
            })
            .collect())
    }
}

/// Fills the text box instead of rasterising glyphs.
struct BoxPainter;

impl TextPainter for BoxPainter {
    fn paint(&self, canvas: &mut RgbaImage, op: &TextOp) -> Result<(), RenderError> {
        let (x, y) = (op.x.max(0) as u32, op.y.max(0) as u32);
        let width = op.text.len() as u32 * 4;
        for px in x..(x + width).min(canvas.width()) {
            for py in y..(y + 4).min(canvas.height()) {
                canvas.put_pixel(px, py, op.color);
            }
        }
        Ok(())
    }
}

fn record() -> BookingPassRecord {
    BookingPassRecord {
        flight_number: "KL1234".to_string(),
        seat: Some("12A".to_string()),
        serve_class: Some("Economy Class".to_string()),
        departure: Some("Amsterdam AMS".to_string()),
        arrival: Some("Jakarta CGK".to_string()),
        flight_datetime: Some(1_700_000_000),
        note: Some("Window please".to_string()),
        user_id: Some("7".to_string()),
        passenger_name: Some("John Smith".to_string()),
        boarding_style: None,
        flight_default_style: Some("kja".to_string()),
    }
}

fn setup(templates: &[&str]) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for name in templates {
        RgbaImage::from_pixel(2100, 800, Rgba([12, 30, 80, 255]))
            .save(dir.path().join(name))
            .unwrap();
    }

    let mut bookings = HashMap::new();
    bookings.insert("AB12".to_string(), record());
    let mut no_seat = record();
    no_seat.seat = None;
    bookings.insert("CD34".to_string(), no_seat);

    let mut styles = HashMap::new();
    styles.insert(5, ("Classic".to_string(), r#"{"draw_function":"kja"}"#.to_string()));

    let passes = BoardingPassService::new(
        Arc::new(InMemoryBookings(bookings)),
        Arc::new(InMemoryStyles(styles)),
        Arc::new(StyleRegistry::builtin()),
        Arc::new(Compositor::new(AssetStore::new(dir.path()), Arc::new(BoxPainter))),
    );

    let router = app(AppState {
        passes: Arc::new(passes),
    });
    (router, dir)
}

async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

#[tokio::test]
async fn test_png_boarding_pass() {
    let (router, _dir) = setup(&["default_economy.png"]);
    let (status, headers, body) = get(router, "/api/boarding_pass/AB12/default").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"boarding_pass_AB12.png\""
    );
    let decoded = image::load_from_memory(&body).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2100, 800));
}

#[tokio::test]
async fn test_pdf_boarding_pass() {
    let (router, _dir) = setup(&["kja_bp.png"]);
    let (status, headers, body) = get(router, "/api/boarding_pass_pdf/AB12/kja").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"boarding_pass_AB12.pdf\""
    );
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_stored_style_id_resolves_to_renderer() {
    // only the kja template exists, so a 200 means config 5 picked kja
    let (router, _dir) = setup(&["kja_bp.png"]);
    let (status, _, _) = get(router.clone(), "/api/boarding_pass/AB12/5").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get(router, "/api/boarding_pass/AB12").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_style_falls_back_to_default() {
    let (router, _dir) = setup(&["default_economy.png"]);
    for uri in ["/api/boarding_pass/AB12/concorde", "/api/boarding_pass/AB12/999"] {
        let (status, headers, _) = get(router.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    }
}

#[tokio::test]
async fn test_missing_booking_is_404() {
    let (router, _dir) = setup(&["default_economy.png"]);
    let (status, headers, body) = get(router, "/api/boarding_pass_pdf/ZZ99/default").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Booking not found");
}

#[tokio::test]
async fn test_render_failure_is_500_with_message() {
    let (router, _dir) = setup(&["default_economy.png"]);
    let (status, _, body) = get(router.clone(), "/api/boarding_pass/CD34/default").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to generate boarding pass: "));
    assert!(message.contains("seat"));

    // kja template is absent
    let (status, _, body) = get(router, "/api/boarding_pass/AB12/kja").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("kja_bp.png"));
}

#[tokio::test]
async fn test_boarding_styles_and_health() {
    let (router, _dir) = setup(&[]);
    let (status, _, body) = get(router.clone(), "/api/boarding_styles").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["styles"], serde_json::json!(["default", "kja"]));
    assert_eq!(json["configs"][0]["id"], 5);
    assert_eq!(json["configs"][0]["draw_function"], "kja");

    let (status, _, body) = get(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
