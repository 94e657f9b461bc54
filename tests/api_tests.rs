//! HTTP API Tests
//!
//! End-to-end tests over the full router with a mock model injected through
//! the application state, so no ONNX assets are needed. These verify the
//! endpoint contracts: status codes, headers, payload shapes, and the
//! binary/base64 round-trip law.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine;
use tower::util::ServiceExt;

use speecht5_server::core::{SAMPLE_RATE, SpeakerStore, SpeechModel, Waveform};
use speecht5_server::{AppState, routes};

/// Deterministic mock model: a short ramp, long enough to be audible.
struct RampModel;

impl SpeechModel for RampModel {
    fn synthesize(&self, _text: &str, _embedding: &[f32]) -> anyhow::Result<Waveform> {
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 / 1600.0) - 0.5).collect();
        Ok(Waveform::new(samples, SAMPLE_RATE))
    }
}

/// Mock model that always fails, for server-fault paths.
struct BrokenModel;

impl SpeechModel for BrokenModel {
    fn synthesize(&self, _text: &str, _embedding: &[f32]) -> anyhow::Result<Waveform> {
        anyhow::bail!("device out of memory")
    }
}

fn test_app_with(model: Arc<dyn SpeechModel>, speakers: usize) -> Router {
    let store = Arc::new(SpeakerStore::from_vectors(
        (0..speakers).map(|i| vec![i as f32; 512]).collect(),
    ));
    let state = Arc::new(AppState::from_parts(model, store));
    routes::api::create_api_router().with_state(state)
}

fn test_app() -> Router {
    test_app_with(Arc::new(RampModel), 100)
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn health_reports_models_loaded() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["models_loaded"], true);
}

#[tokio::test]
async fn synthesize_returns_wav_attachment() {
    let request = json_request("/synthesize", r#"{"text":"hello world","speaker_id":7}"#);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/wav"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"speech.wav\""
    );

    let bytes = body_bytes(response).await;
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().sample_rate, 16_000);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 1600);
}

#[tokio::test]
async fn synthesize_json_round_trips_to_the_binary_encoding() {
    let app = test_app();

    let binary = app
        .clone()
        .oneshot(json_request("/synthesize", r#"{"text":"hello world"}"#))
        .await
        .unwrap();
    let wav = body_bytes(binary).await;

    let structured = app
        .oneshot(json_request("/synthesize_json", r#"{"text":"hello world"}"#))
        .await
        .unwrap();
    assert_eq!(structured.status(), StatusCode::OK);
    let json = body_json(structured).await;

    assert_eq!(json["sample_rate"], 16_000);
    assert_eq!(json["format"], "wav");
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(json["audio_base64"].as_str().unwrap())
        .unwrap();
    assert_eq!(decoded, wav);
}

#[tokio::test]
async fn missing_text_is_a_400_with_an_error_body() {
    let request = json_request("/synthesize", r#"{"speaker_id":0}"#);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no text provided"));
}

#[tokio::test]
async fn empty_text_is_a_400() {
    let request = json_request("/synthesize_json", r#"{"text":""}"#);
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_speaker_is_a_400_naming_the_bounds() {
    let request = json_request("/synthesize", r#"{"text":"hello","speaker_id":500}"#);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("500"));
    assert!(message.contains("out of range"));
}

#[tokio::test]
async fn model_failure_is_a_500_with_the_cause() {
    let app = test_app_with(Arc::new(BrokenModel), 100);

    let request = json_request("/synthesize", r#"{"text":"hello"}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("device out of memory")
    );
}

#[tokio::test]
async fn speakers_lists_ids_in_order_with_first_five_samples() {
    let request = Request::builder()
        .uri("/speakers")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_speakers"], 100);
    assert_eq!(json["speaker_ids"].as_array().unwrap().len(), 100);
    assert_eq!(
        json["sample_speakers"],
        serde_json::json!([0, 1, 2, 3, 4])
    );
}

#[tokio::test]
async fn speakers_sample_shrinks_with_a_small_store() {
    let app = test_app_with(Arc::new(RampModel), 3);

    let request = Request::builder()
        .uri("/speakers")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["total_speakers"], 3);
    assert_eq!(json["sample_speakers"], serde_json::json!([0, 1, 2]));
}

#[tokio::test]
async fn speaker_id_defaults_to_the_first_speaker() {
    let request = json_request("/synthesize", r#"{"text":"hi"}"#);
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
