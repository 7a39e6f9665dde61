// panel.rs - Image edit panel state

use super::ImageEditor;

/// The only failure text the visitor ever sees.
pub const GENERIC_ERROR: &str = "Failed to process image. Ensure API key is set and try again.";
pub const DOWNLOAD_NAME: &str = "upside-down-edit.png";

#[derive(Clone, Debug, Default)]
pub struct EditPanel {
    image: Option<String>,
    prompt: String,
    busy: bool,
    result: Option<String>,
    error: Option<&'static str>,
}

impl EditPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// New source image; any previous result or error is dropped.
    pub fn select_image(&mut self, data_url: impl Into<String>) {
        self.image = Some(data_url.into());
        self.result = None;
        self.error = None;
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn can_generate(&self) -> bool {
        !self.busy && self.image.is_some() && !self.prompt.is_empty()
    }

    /// Runs one edit. Returns false without calling the editor when the
    /// image or prompt is missing.
    pub fn generate(&mut self, editor: &impl ImageEditor) -> bool {
        if !self.can_generate() {
            return false;
        }
        let Some(image) = self.image.as_deref() else {
            return false;
        };

        self.busy = true;
        self.error = None;
        match editor.edit(image, &self.prompt) {
            Ok(url) => self.result = Some(url),
            Err(e) => {
                tracing::error!(error = %e, "image edit failed");
                self.error = Some(GENERIC_ERROR);
            }
        }
        self.busy = false;
        true
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// File name and data URL for saving the result.
    pub fn download(&self) -> Option<(&'static str, &str)> {
        self.result().map(|url| (DOWNLOAD_NAME, url))
    }
}
