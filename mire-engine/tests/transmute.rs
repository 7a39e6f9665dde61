use std::cell::Cell;

use mire_engine::error::EditError;
use mire_engine::transmute::{DOWNLOAD_NAME, EditPanel, GENERIC_ERROR, GeminiEditor, InlineImage, Transport};

#[derive(Default)]
struct CountingTransport {
    calls: Cell<usize>,
}

impl Transport for CountingTransport {
    fn post_json(&self, _url: &str, _api_key: &str, body: &str) -> Result<String, EditError> {
        self.calls.set(self.calls.get() + 1);
        // Echo the submitted image back as the result.
        let req: serde_json::Value = serde_json::from_str(body)?;
        let data = req["contents"][0]["parts"][0]["inlineData"]["data"].clone();
        Ok(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": data } }] } }]
        })
        .to_string())
    }
}

fn source() -> String {
    InlineImage::from_bytes("image/jpeg", b"\xff\xd8\xff fake jpeg").to_data_url()
}

#[test]
fn no_credential_fails_immediately_without_network() {
    let editor = GeminiEditor::new(None, CountingTransport::default());
    let mut panel = EditPanel::new();
    panel.select_image(source());
    panel.set_prompt("make it look like the upside down");

    assert!(panel.generate(&editor));
    assert_eq!(panel.error(), Some(GENERIC_ERROR));
    assert_eq!(panel.result(), None);
    assert!(!panel.is_busy());
    assert_eq!(editor.transport().calls.get(), 0);
}

#[test]
fn configured_editor_round_trips_through_the_panel() {
    let editor = GeminiEditor::new(Some("test-key".into()), CountingTransport::default());
    let mut panel = EditPanel::new();
    panel.select_image(source());
    panel.set_prompt("add a glitch");

    assert!(panel.generate(&editor));
    assert_eq!(editor.transport().calls.get(), 1);
    assert_eq!(panel.error(), None);

    let (name, url) = panel.download().unwrap();
    assert_eq!(name, DOWNLOAD_NAME);
    assert!(url.starts_with("data:image/png;base64,"));
    let bytes = InlineImage::from_data_url(url).decode().unwrap();
    assert_eq!(bytes, b"\xff\xd8\xff fake jpeg");
}
