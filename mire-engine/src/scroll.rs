// scroll.rs - Page scroll to normalized progress
//
// The tracker owns the listener list. Progress is published synchronously
// to every subscriber on mount and on each scroll event.

/// Raw page measurements, all in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub scroll_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub fn new(offset: f32, scroll_height: f32, viewport_height: f32) -> Self {
        Self { offset, scroll_height, viewport_height }
    }
}

/// `offset / (scroll_height - viewport_height)`, clamped to [0, 1].
/// A page that cannot scroll is always at 0.
pub fn scroll_progress(m: ScrollMetrics) -> f32 {
    let range = m.scroll_height - m.viewport_height;
    if !(range > 0.0) || !m.offset.is_finite() || !range.is_finite() {
        return 0.0;
    }
    (m.offset / range).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(f32)>;

#[derive(Default)]
pub struct ScrollTracker {
    listeners: Vec<(SubscriptionId, Listener)>,
    next: u32,
    progress: f32,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(f32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Recompute progress and notify every listener.
    pub fn update(&mut self, m: ScrollMetrics) -> f32 {
        self.progress = scroll_progress(m);
        for (_, listener) in &mut self.listeners {
            listener(self.progress);
        }
        self.progress
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
