use std::sync::{Arc, Mutex};
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(15);

struct Overlay {
    generation: u64,
    html: String,
}

struct SlotState {
    overlay: Option<Overlay>,
    next_generation: u64,
}

/// Handle to the single overlay slot.
///
/// Invariant: at most one overlay is live at any time. `show` replaces the
/// current overlay atomically, so observers never see partial state. Each
/// `show` arms an expiry timer tagged with that overlay's generation; a
/// timer firing after its overlay was replaced or dismissed is a no-op.
#[derive(Clone)]
pub struct OverlaySlot {
    state: Arc<Mutex<SlotState>>,
    ttl: Duration,
}

impl Default for OverlaySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySlot {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState {
                overlay: None,
                next_generation: 0,
            })),
            ttl,
        }
    }

    /// Replace any existing overlay with new content and arm a fresh
    /// expiry timer. Safe to call when no overlay is present.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, html: String) {
        let generation = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let generation = state.next_generation;
            state.next_generation += 1;
            state.overlay = Some(Overlay { generation, html });
            generation
        };

        let slot = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(slot.ttl).await;
            slot.expire(generation);
        });
    }

    /// Manual close. Removes the overlay if one is present.
    pub fn dismiss(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.overlay.take().is_some() {
            tracing::debug!("Overlay dismissed");
        }
    }

    /// Current overlay content, if any. Hosts poll this to render; tests
    /// assert on it.
    pub fn current_html(&self) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.overlay.as_ref().map(|o| o.html.clone())
    }

    fn expire(&self, generation: u64) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state
            .overlay
            .as_ref()
            .is_some_and(|o| o.generation == generation)
        {
            state.overlay = None;
            tracing::debug!("Overlay expired");
        }
    }
}
