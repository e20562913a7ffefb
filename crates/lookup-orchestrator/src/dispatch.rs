//! One-way relay from a text selection to the overlay.
//!
//! `SelectionDispatcher::send` is fire-and-forget: there is no delivery
//! confirmation and no acknowledgment, matching the context-menu message
//! relay it models. The worker handles events sequentially; an in-flight
//! lookup is never cancelled, so when selections arrive faster than they
//! resolve, the overlay ends up showing whichever lookup completed last,
//! not the one most recently requested.

use crate::LookupOrchestrator;
use popup_overlay::{
    render_fetch_error, render_loading, render_report, render_unresolved, OverlaySlot,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The raw text a user selected. Created once per context-menu
/// activation, consumed once by the worker.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub text: String,
}

/// Sending half of the selection channel.
#[derive(Clone)]
pub struct SelectionDispatcher {
    tx: mpsc::UnboundedSender<SelectionEvent>,
}

impl SelectionDispatcher {
    /// Relay a selection. Errors (worker gone) are deliberately ignored.
    pub fn send(&self, text: impl Into<String>) {
        let _ = self.tx.send(SelectionEvent { text: text.into() });
    }
}

/// Spawn the lookup worker and return the dispatcher feeding it.
///
/// For each selection the worker shows the loading card, resolves the
/// ticker, then either reports the aggregated data or the matching error
/// state. Every outcome goes through `OverlaySlot::show`, so the newest
/// content always replaces the old card.
pub fn spawn_lookup_worker(
    orchestrator: Arc<LookupOrchestrator>,
    slot: OverlaySlot,
) -> SelectionDispatcher {
    let (tx, mut rx) = mpsc::unbounded_channel::<SelectionEvent>();

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            run_lookup(&orchestrator, &slot, &event.text).await;
        }
    });

    SelectionDispatcher { tx }
}

async fn run_lookup(orchestrator: &LookupOrchestrator, slot: &OverlaySlot, text: &str) {
    tracing::info!("Looking up selection: {:?}", text);
    slot.show(render_loading());

    let Some(ticker) = orchestrator.resolve_ticker(text).await else {
        slot.show(render_unresolved(text));
        return;
    };

    match orchestrator.fetch_report(&ticker).await {
        Ok(report) => slot.show(render_report(&report)),
        Err(e) => {
            tracing::warn!("Lookup for {} failed: {}", ticker, e);
            slot.show(render_fetch_error(&ticker, &e.to_string()));
        }
    }
}
