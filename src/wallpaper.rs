use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// One generated wallpaper, held in memory for the current session only.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub id: String,
    /// `data:{mime};base64,{payload}` URI as returned by the generation client.
    pub url: String,
    /// The prompt this image was generated from, used by remix.
    pub prompt: String,
    pub created_at: u64,
}

impl GeneratedImage {
    pub fn new(url: String, prompt: String) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            prompt,
            created_at,
        }
    }

    pub fn file_name(&self) -> String {
        let ext = split_data_uri(&self.url)
            .map(|(mime, _)| extension_for_mime(mime))
            .unwrap_or("png");
        format!("mood-canvas-{}.{}", self.id, ext)
    }

    /// Decodes the embedded base64 payload back into raw image bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let (_, payload) =
            split_data_uri(&self.url).ok_or("image payload is not a data URI")?;
        Ok(base64::decode(payload)?)
    }
}

pub fn make_data_uri(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_payload)
}

/// Splits `data:{mime};base64,{payload}` into `(mime, payload)`.
pub fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() || payload.is_empty() {
        return None;
    }
    Some((mime, payload))
}

pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        _ => "png",
    }
}
