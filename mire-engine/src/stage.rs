// stage.rs - Mount, frame loop and teardown
//
// The stage owns the tracker, the animator and the renderer. The scroll
// subscriber writes progress and camera pose into shared cells that the
// next tick reads; nothing else crosses between them.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::SceneConfig;
use crate::error::MireResult;
use crate::render::{Frame, Renderer};
use crate::scroll::{ScrollMetrics, ScrollTracker, SubscriptionId, scroll_progress};
use crate::sim::{AmbienceLatch, Animator, AudioCommand};
use crate::world::{CameraPose, Projection};

pub struct Stage<R: Renderer> {
    animator: Animator,
    tracker: ScrollTracker,
    subscription: Option<SubscriptionId>,
    progress: Rc<Cell<f32>>,
    camera: Rc<Cell<CameraPose>>,
    projection: Projection,
    latch: AmbienceLatch,
    renderer: R,
    mounted: bool,
}

impl<R: Renderer> Stage<R> {
    /// Build the scene and start listening. Returns `None`, with nothing
    /// created, when no drawing surface can be acquired.
    pub fn mount(
        cfg: SceneConfig,
        seed: u64,
        metrics: ScrollMetrics,
        acquire: impl FnOnce() -> MireResult<R>,
    ) -> Option<Self> {
        let renderer = match acquire() {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "no drawing surface, skipping mount");
                return None;
            }
        };

        let start = scroll_progress(metrics);
        let progress = Rc::new(Cell::new(start));
        let camera = Rc::new(Cell::new(CameraPose::at(start, &cfg.camera)));

        let mut tracker = ScrollTracker::new();
        let subscription = tracker.subscribe({
            let progress = Rc::clone(&progress);
            let camera = Rc::clone(&camera);
            let cam_cfg = cfg.camera.clone();
            move |p| {
                progress.set(p);
                camera.set(CameraPose::at(p, &cam_cfg));
            }
        });
        tracker.update(metrics);

        let (w, h) = renderer.size();
        let projection = Projection::new(&cfg.camera, w, h);
        let animator = Animator::new(cfg, seed, start);
        tracing::debug!(seed, progress = start, "stage mounted");

        Some(Self {
            animator,
            tracker,
            subscription: Some(subscription),
            progress,
            camera,
            projection,
            latch: AmbienceLatch::armed(),
            renderer,
            mounted: true,
        })
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if !self.mounted {
            return;
        }
        self.tracker.update(metrics);
        self.interact();
    }

    pub fn on_click(&mut self) {
        if self.mounted {
            self.interact();
        }
    }

    fn interact(&mut self) {
        if let Some(cmd) = self.latch.fire() {
            tracing::debug!("ambience started");
            self.animator.push_audio(cmd);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.mounted || width == 0 || height == 0 {
            return;
        }
        self.renderer.resize(width, height);
        self.projection.resize(width, height);
    }

    /// Advance one frame and draw it. `elapsed` is seconds since mount.
    /// Returns false once torn down.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if !self.mounted {
            return false;
        }
        let camera = self.camera.get();
        self.animator.update(elapsed, self.progress.get(), &camera);
        self.renderer.draw(&Frame {
            camera: &camera,
            projection: &self.projection,
            lights: self.animator.lights(),
            graph: &self.animator.scene().graph,
            layers: self.animator.layers(),
        });
        true
    }

    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(id) = self.subscription.take() {
            self.tracker.unsubscribe(id);
        }
        self.tracker.clear();

        // A fired latch means the ambience is running.
        if !self.latch.is_armed() {
            self.animator.push_audio(AudioCommand::StopAmbience);
        }
        self.latch.disarm();
        self.animator.silence();

        self.renderer.release(&self.animator.scene().resources);
        self.mounted = false;
        tracing::debug!("stage torn down");
    }

    pub fn drain_audio(&mut self) -> Vec<AudioCommand> {
        self.animator.drain_audio()
    }

    pub fn cue_finished(&mut self, index: usize) {
        self.animator.cue_finished(index);
    }

    pub fn describe(&self) -> MireResult<String> {
        self.animator.describe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn camera(&self) -> CameraPose {
        self.camera.get()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn listeners(&self) -> usize {
        self.tracker.len()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
