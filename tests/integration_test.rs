use idcard_ocr::server::{router, AppState};
use idcard_ocr::{Config, ExtractedRecord, OcrEngine, OcrError, OcrResult};
use image::{DynamicImage, GrayImage, Luma};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;

const FRONT_WIDTH: u32 = 30;
const BACK_WIDTH: u32 = 40;

const FRONT_TEXT: &str = "Government of India\n\
    To Arjun Mehta\n\
    DOB: 23/11/1994\n\
    MALE\n\
    4321 8765 2109\n\
    VID: 9999 8888 7777 6666";

const BACK_TEXT: &str = "Address:\n\
    S/O Rakesh Mehta, House 21\n\
    MG Road, Near Bus Stand\n\
    Bengaluru Urban District\n\
    Karnataka - 560038\n\
    1947 help@uidai.gov.in";

/// Engine stand-in that tells the sides apart by image width
struct CardFixtureEngine;

impl OcrEngine for CardFixtureEngine {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn description(&self) -> &'static str {
        "Returns canned card text keyed by image width"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let text = match image.width() {
            FRONT_WIDTH => FRONT_TEXT,
            BACK_WIDTH => BACK_TEXT,
            other => {
                return Err(OcrError::ProcessingError(format!(
                    "no fixture for width {}",
                    other
                )))
            }
        };

        Ok(OcrResult {
            text: text.to_string(),
            confidence: Some(0.9),
        })
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["eng".to_string()]
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ErrorResponse {
    error: String,
    code: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct HealthResponse {
    status: String,
    version: String,
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(config: Config) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let app = router(AppState::new(Arc::new(CardFixtureEngine), config));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn png_of_width(width: u32) -> Vec<u8> {
    let img = GrayImage::from_pixel(width, 20, Luma([240]));
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn image_part(bytes: Vec<u8>, filename: &str) -> Part {
    Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("image/png")
        .unwrap()
}

async fn post_card(base_url: &str, form: Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/ocr", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start(Config::default()).await;

    let response: HealthResponse = reqwest::get(format!("{}/health", server.base_url))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.status, "ok");
    assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_card_fields_are_extracted_from_both_sides() {
    let server = TestServer::start(Config::default()).await;

    let form = Form::new()
        .part("front", image_part(png_of_width(FRONT_WIDTH), "front.png"))
        .part("back", image_part(png_of_width(BACK_WIDTH), "back.png"));

    let response = post_card(&server.base_url, form).await;
    assert!(
        response.status().is_success(),
        "Expected success status, got {}",
        response.status()
    );

    let record: ExtractedRecord = response.json().await.expect("Failed to parse record");
    assert_eq!(
        record,
        ExtractedRecord {
            number: "4321 8765 2109".to_string(),
            name: "Arjun Mehta".to_string(),
            dob: "23/11/1994".to_string(),
            address: "S/O Rakesh Mehta, House 21 MG Road, Near Bus Stand \
                      Bengaluru Urban District Karnataka - 560038"
                .to_string(),
        }
    );
}

#[tokio::test]
async fn test_swapped_sides_yield_empty_fields() {
    let server = TestServer::start(Config::default()).await;

    // Back photo uploaded as front and vice versa
    let form = Form::new()
        .part("back", image_part(png_of_width(FRONT_WIDTH), "front.png"))
        .part("front", image_part(png_of_width(BACK_WIDTH), "back.png"));

    let response = post_card(&server.base_url, form).await;
    assert!(response.status().is_success());

    let record: ExtractedRecord = response.json().await.expect("Failed to parse record");
    assert_eq!(record, ExtractedRecord::default());
}

#[tokio::test]
async fn test_missing_back_image_is_rejected() {
    let server = TestServer::start(Config::default()).await;

    let form = Form::new().part("front", image_part(png_of_width(FRONT_WIDTH), "front.png"));

    let response = post_card(&server.base_url, form).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: ErrorResponse = response.json().await.expect("Failed to parse error");
    assert_eq!(body.code, "MISSING_IMAGE");
    assert_eq!(body.error, "Both front and back images are required.");
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let config = Config {
        max_file_size: 64,
        ..Config::default()
    };
    let server = TestServer::start(config).await;

    let form = Form::new()
        .part("front", image_part(vec![0u8; 128], "front.png"))
        .part("back", image_part(png_of_width(BACK_WIDTH), "back.png"));

    let response = post_card(&server.base_url, form).await;
    assert_eq!(response.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);

    let body: ErrorResponse = response.json().await.expect("Failed to parse error");
    assert_eq!(body.code, "IMAGE_TOO_LARGE");
}

#[tokio::test]
async fn test_engine_failure_is_a_server_error() {
    let server = TestServer::start(Config::default()).await;

    let form = Form::new()
        .part("front", image_part(png_of_width(FRONT_WIDTH), "front.png"))
        .part("back", image_part(png_of_width(55), "back.png"));

    let response = post_card(&server.base_url, form).await;
    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );

    let body: ErrorResponse = response.json().await.expect("Failed to parse error");
    assert_eq!(body.code, "PROCESSING_ERROR");
}
