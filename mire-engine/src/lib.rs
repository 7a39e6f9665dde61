use wasm_bindgen::prelude::*;

// ============================================================================
// MIRE - Scroll-driven night scene with stalking creatures
// ============================================================================

pub mod config;
pub mod content;
pub mod error;
pub mod render;
pub mod scene;
pub mod scroll;
pub mod sim;
pub mod stage;
pub mod transmute;
pub mod world;

use config::SceneConfig;
use render::Encoder;
use scroll::ScrollMetrics;
use stage::Stage;

#[wasm_bindgen]
pub struct MireWorld {
    stage: Stage<Encoder>,
}

#[wasm_bindgen]
impl MireWorld {
    /// `None` when the canvas has no area; the page then shows content only.
    pub fn mount(w: u32, h: u32, seed: u32, offset: f32, scroll_h: f32, viewport_h: f32) -> Option<MireWorld> {
        Self::mount_cfg(SceneConfig::default(), w, h, seed, offset, scroll_h, viewport_h)
    }

    /// Same as `mount`, with tuning overrides as JSON.
    pub fn mount_with_config(
        w: u32,
        h: u32,
        seed: u32,
        offset: f32,
        scroll_h: f32,
        viewport_h: f32,
        json: &str,
    ) -> Result<Option<MireWorld>, JsError> {
        let cfg = SceneConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::mount_cfg(cfg, w, h, seed, offset, scroll_h, viewport_h))
    }

    pub fn on_scroll(&mut self, offset: f32, scroll_h: f32, viewport_h: f32) {
        self.stage.on_scroll(ScrollMetrics::new(offset, scroll_h, viewport_h));
    }

    pub fn on_click(&mut self) {
        self.stage.on_click();
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.stage.resize(w, h);
    }

    /// Returns false once torn down; the page should stop its frame loop.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        self.stage.tick(elapsed)
    }

    pub fn teardown(&mut self) {
        self.stage.teardown();
    }

    pub fn cue_finished(&mut self, index: usize) {
        self.stage.cue_finished(index);
    }

    /// Drains queued audio commands as an array of `{ cmd, index?, rate? }` objects.
    pub fn audio_commands(&mut self) -> Result<js_sys::Array, JsValue> {
        let json = serde_json::to_string(&self.stage.drain_audio())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)?.dyn_into::<js_sys::Array>()
    }

    pub fn scene_json(&self) -> Result<String, JsError> {
        self.stage.describe().map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn output_ptr(&self) -> *const f32 { self.stage.renderer().ptr() }
    pub fn output_len(&self) -> usize { self.stage.renderer().len() }
    pub fn released_ptr(&self) -> *const u32 { self.stage.renderer().released().as_ptr() }
    pub fn released_len(&self) -> usize { self.stage.renderer().released().len() }
    pub fn alert(&self) -> f32 { self.stage.animator().alert() }
    pub fn progress(&self) -> f32 { self.stage.progress() }
    pub fn mounted(&self) -> bool { self.stage.is_mounted() }
}

impl MireWorld {
    fn mount_cfg(
        cfg: SceneConfig,
        w: u32,
        h: u32,
        seed: u32,
        offset: f32,
        scroll_h: f32,
        viewport_h: f32,
    ) -> Option<MireWorld> {
        let metrics = ScrollMetrics::new(offset, scroll_h, viewport_h);
        Stage::mount(cfg, seed as u64, metrics, || Encoder::acquire(w, h)).map(|stage| MireWorld { stage })
    }
}

/// Portfolio content as JSON.
#[wasm_bindgen]
pub fn portfolio_json() -> String {
    content::PortfolioData::embedded_json().to_string()
}
