use crate::constants::{
    IMAGE_MODEL, VALIDATION_MODEL, VALIDATION_PING, WALLPAPER_ASPECT_RATIO, WALLPAPER_COUNT,
    WALLPAPER_PROMPT_PREFIX,
};
use crate::gemini::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    RequestContent, RequestPart,
};
use crate::wallpaper::make_data_uri;
use futures::future::join_all;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use std::error::Error;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub fn build_headers(api_key: &str) -> Result<HeaderMap, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, HeaderValue::from_str(api_key)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn model_url(api_base: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", api_base, model)
}

pub fn build_validation_request() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: VALIDATION_PING.to_string(),
            }],
        }],
        generation_config: None,
    }
}

pub fn build_wallpaper_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: format!("{} {}", WALLPAPER_PROMPT_PREFIX, prompt),
            }],
        }],
        generation_config: Some(GenerationConfig {
            image_config: ImageConfig {
                aspect_ratio: WALLPAPER_ASPECT_RATIO.to_string(),
            },
        }),
    }
}

/// First inline image in the response, as a data URI. `None` when the
/// response carries no candidates, no content, or only text parts.
pub fn extract_inline_image(response: &GenerateContentResponse) -> Option<String> {
    for candidate in &response.candidates {
        let content = match &candidate.content {
            Some(content) => content,
            None => continue,
        };
        for part in &content.parts {
            if let Some(inline) = &part.inline_data {
                if !inline.data.is_empty() {
                    return Some(make_data_uri(&inline.mime_type, &inline.data));
                }
            }
        }
    }
    None
}

/// Checks the key with one cheap text request. Network, auth, and quota
/// failures all collapse to `false`.
pub async fn validate_api_key(client: &Client, api_base: &str, api_key: &str) -> bool {
    let headers = match build_headers(api_key) {
        Ok(headers) => headers,
        Err(_) => return false,
    };
    let response = client
        .post(model_url(api_base, VALIDATION_MODEL))
        .headers(headers)
        .json(&build_validation_request())
        .send()
        .await;

    match response {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            log::debug!("key validation request failed: {}", e);
            false
        }
    }
}

/// One generation attempt. Any failure along the way, or a response without
/// an inline image, is a `None` slot rather than an error.
async fn request_single_wallpaper(
    client: &Client,
    api_base: &str,
    api_key: &str,
    prompt: &str,
) -> Option<String> {
    let headers = build_headers(api_key).ok()?;
    let response = client
        .post(model_url(api_base, IMAGE_MODEL))
        .headers(headers)
        .json(&build_wallpaper_request(prompt))
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            log::warn!("wallpaper request failed: {}", e);
            return None;
        }
    };
    if !response.status().is_success() {
        log::warn!("wallpaper request returned status {}", response.status());
        return None;
    }
    let body = match response.json::<GenerateContentResponse>().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("wallpaper response was not valid JSON: {}", e);
            return None;
        }
    };
    extract_inline_image(&body)
}

/// Issues four independent single-image requests concurrently and returns the
/// data URIs of the ones that produced an image. Parallel single-image calls
/// are used instead of one batched request because candidate-count support is
/// inconsistent across image models; this guarantees four attempts and
/// tolerates partial failure. Errors only when all four come back empty.
pub async fn generate_wallpapers(
    client: &Client,
    api_base: &str,
    api_key: &str,
    prompt: &str,
) -> Result<Vec<String>, Box<dyn Error>> {
    let attempts = (0..WALLPAPER_COUNT)
        .map(|_| request_single_wallpaper(client, api_base, api_key, prompt));
    let urls: Vec<String> = join_all(attempts).await.into_iter().flatten().collect();

    log::info!("{}/{} wallpaper attempts succeeded", urls.len(), WALLPAPER_COUNT);

    if urls.is_empty() {
        return Err("no images generated".into());
    }
    Ok(urls)
}
