// transmute/ - Generative image edits
//
// A panel collects an image and a prompt and hands them to an editor. The
// shipped editor speaks Gemini generateContent over a pluggable transport,
// so the same code runs against a real HTTP client or a test double.

mod gemini;
mod panel;
mod payload;

pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiEditor, Transport};
pub use panel::{DOWNLOAD_NAME, EditPanel, GENERIC_ERROR};
pub use payload::{Blob, Content, GenerateRequest, GenerateResponse, InlineImage, Part, parse_image_response};

use crate::error::EditError;

pub trait ImageEditor {
    /// `image` is a data URL or raw base64; returns a PNG data URL.
    fn edit(&self, image: &str, prompt: &str) -> Result<String, EditError>;
}
