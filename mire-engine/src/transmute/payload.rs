// payload.rs - Image payloads and generateContent bodies

use serde::{Deserialize, Serialize};

use crate::error::EditError;

const DEFAULT_MIME: &str = "image/png";
const STRIPPED_SUBTYPES: [&str; 4] = ["png", "jpeg", "jpg", "webp"];

/// Base64 image data plus its MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub mime: String,
    pub data: String,
}

impl InlineImage {
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self { mime: mime.into(), data: base64::encode(bytes) }
    }

    /// Accepts a `data:image/<type>;base64,` URL or raw base64. The header
    /// is stripped for png, jpeg, jpg and webp; the MIME type is read from
    /// any `image/<letters>` header and defaults to png.
    pub fn from_data_url(url: &str) -> Self {
        let header = parse_header(url);
        let mime = header.map_or(DEFAULT_MIME, |(mime, _)| mime);
        let data = match header {
            Some((mime, rest)) if STRIPPED_SUBTYPES.contains(&&mime["image/".len()..]) => rest,
            _ => url,
        };
        Self { mime: mime.to_string(), data: data.to_string() }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, EditError> {
        base64::decode(&self.data).map_err(|e| EditError::Decode(e.to_string()))
    }
}

/// Splits `data:image/<letters>;base64,<rest>` into (mime, rest).
fn parse_header(url: &str) -> Option<(&str, &str)> {
    let body = url.strip_prefix("data:")?;
    let (mime, rest) = body.split_once(";base64,")?;
    let subtype = mime.strip_prefix("image/")?;
    if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((mime, rest))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Image first, then the instruction.
    pub fn edit(image: &InlineImage, prompt: &str) -> Self {
        let parts = vec![
            Part {
                inline_data: Some(Blob { mime_type: image.mime.clone(), data: image.data.clone() }),
                text: None,
            },
            Part { inline_data: None, text: Some(prompt.to_string()) },
        ];
        Self { contents: vec![Content { parts }] }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Data of the first inline image in the first candidate.
    pub fn first_image(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|blob| blob.data.as_str())
            .find(|data| !data.is_empty())
    }
}

/// Response body to a `data:image/png;base64,` URL.
pub fn parse_image_response(body: &str) -> Result<String, EditError> {
    let resp: GenerateResponse = serde_json::from_str(body)?;
    let data = resp.first_image().ok_or(EditError::NoImage)?;
    Ok(format!("data:{DEFAULT_MIME};base64,{data}"))
}
