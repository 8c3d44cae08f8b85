#![allow(dead_code)]

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use ocr_service::config::OcrConfig;
use ocr_service::services::providers::mock::MockVisionProvider;
use ocr_service::services::VisionProvider;
use ocr_service::startup::Application;
use reqwest::multipart;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockVisionProvider>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(provider: MockVisionProvider) -> Self {
        Self::spawn_with_config(provider, test_config(&[])).await
    }

    pub async fn spawn_with_config(provider: MockVisionProvider, config: OcrConfig) -> Self {
        let provider = Arc::new(provider);
        let vision_provider: Arc<dyn VisionProvider> = provider.clone();

        let app = Application::build_with_provider(config, vision_provider)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        wait_until_healthy(&client, &address).await;

        TestApp {
            address,
            port,
            provider,
            client,
        }
    }

    pub async fn post_ocr(&self, form: multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/ocr", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Poll `/health` until the server answers.
pub async fn wait_until_healthy(client: &reqwest::Client, address: &str) {
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}

/// Config on a random port with a test credential plus `overrides`.
pub fn test_config(overrides: &[(&str, &str)]) -> OcrConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GEMINI_API_KEY".to_string(), TEST_API_KEY.to_string());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    OcrConfig::from_lookup(CoreConfig { port: 0 }, |key| vars.get(key).cloned())
        .expect("Failed to load configuration")
}

pub fn encode_image(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode image");
    buf
}

pub fn white_png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([255u8, 255, 255]));
    encode_image(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// A PNG that compresses badly, for exercising large uploads.
pub fn noisy_png(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    let img = ImageBuffer::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        Rgb([next(), next(), next()])
    });
    encode_image(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

pub fn file_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> multipart::Form {
    multipart::Form::new().part(
        "file",
        multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .unwrap(),
    )
}
