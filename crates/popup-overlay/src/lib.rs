//! The floating result card.
//!
//! `OverlaySlot` owns the single live overlay: showing new content always
//! replaces whatever is currently displayed, and each overlay expires on
//! its own timer unless dismissed first. The `render` module builds the
//! HTML for the three display states (loading, unresolved, data view).

pub mod render;
pub mod slot;

pub use render::{render_fetch_error, render_loading, render_report, render_unresolved};
pub use slot::OverlaySlot;
