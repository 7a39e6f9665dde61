// gemini.rs - generateContent client

use super::ImageEditor;
use super::payload::{GenerateRequest, InlineImage, parse_image_response};
use crate::error::EditError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Blocking JSON POST. Non-2xx responses come back as `EditError::Status`.
pub trait Transport {
    fn post_json(&self, url: &str, api_key: &str, body: &str) -> Result<String, EditError>;
}

pub struct GeminiEditor<T: Transport> {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    transport: T,
}

impl<T: Transport> GeminiEditor<T> {
    /// An empty key counts as missing.
    pub fn new(api_key: Option<String>, transport: T) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            transport,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> ImageEditor for GeminiEditor<T> {
    fn edit(&self, image: &str, prompt: &str) -> Result<String, EditError> {
        let key = self.api_key.as_deref().ok_or(EditError::MissingCredential)?;
        let image = InlineImage::from_data_url(image);
        let body = serde_json::to_string(&GenerateRequest::edit(&image, prompt))?;

        tracing::debug!(model = %self.model, mime = %image.mime, "requesting edit");
        let resp = self.transport.post_json(&self.url(), key, &body)?;
        parse_image_response(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct Canned {
        calls: Cell<usize>,
        last_url: RefCell<String>,
        reply: Result<String, u16>,
    }

    impl Canned {
        fn ok(body: &str) -> Self {
            Self { calls: Cell::new(0), last_url: RefCell::default(), reply: Ok(body.to_string()) }
        }
    }

    impl Transport for Canned {
        fn post_json(&self, url: &str, api_key: &str, _body: &str) -> Result<String, EditError> {
            assert_eq!(api_key, "k");
            self.calls.set(self.calls.get() + 1);
            *self.last_url.borrow_mut() = url.to_string();
            self.reply
                .clone()
                .map_err(|status| EditError::Status { status, body: "quota".into() })
        }
    }

    const IMAGE_REPLY: &str =
        r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"T0s="}}]}}]}"#;

    #[test]
    fn missing_key_fails_before_any_request() {
        for key in [None, Some(String::new())] {
            let editor = GeminiEditor::new(key, Canned::ok(IMAGE_REPLY));
            let err = editor.edit("data:image/png;base64,AAAA", "x").unwrap_err();
            assert!(matches!(err, EditError::MissingCredential));
            assert_eq!(editor.transport().calls.get(), 0);
        }
    }

    #[test]
    fn returns_png_data_url() {
        let editor = GeminiEditor::new(Some("k".into()), Canned::ok(IMAGE_REPLY));
        let out = editor.edit("data:image/jpeg;base64,AAAA", "x").unwrap();
        assert_eq!(out, "data:image/png;base64,T0s=");
        assert_eq!(editor.transport().calls.get(), 1);
        assert_eq!(
            *editor.transport().last_url.borrow(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn status_errors_pass_through() {
        let transport = Canned { reply: Err(429), ..Canned::ok("") };
        let editor = GeminiEditor::new(Some("k".into()), transport).with_model("other");
        let err = editor.edit("AAAA", "x").unwrap_err();
        assert!(matches!(err, EditError::Status { status: 429, .. }));
        assert!(editor.transport().last_url.borrow().contains("/models/other:"));
    }
}
