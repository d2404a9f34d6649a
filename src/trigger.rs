//! Trigger decisions for scroll-activated effects.
//!
//! The browser reports the target's bounding box relative to the viewport on
//! every scroll/resize; this module turns that plus the armed flag into a
//! decision. The visibility band is fixed at 100 px.

#[cfg(test)]
#[path = "trigger_test.rs"]
mod trigger_test;

use crate::consts::VISIBILITY_BAND_PX;

/// The target's bounding box relative to the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Distance from the viewport top to the element's top edge
    /// (negative once the element has scrolled past the top).
    pub top: f64,
    /// Rendered height of the element.
    pub height: f64,
}

/// What the scroll handler should do for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Not armed and inside the visibility band: start the effect and arm.
    Start,
    /// Armed, repeat enabled, and fully out of view: disarm so the effect
    /// can retrigger on re-entry.
    Rearm,
    /// Nothing to do.
    Hold,
}

/// Decide what a scroll event means for this target.
///
/// Start fires when the element's top edge has crossed to within
/// [`VISIBILITY_BAND_PX`] of the viewport bottom but is not yet past the
/// viewport top by more than the same band. Re-arming requires `repeat` and
/// the element fully out of view in either direction.
#[must_use]
pub fn decide(armed: bool, rect: ViewBox, viewport_height: f64, repeat: bool) -> Decision {
    if !armed
        && rect.top > -VISIBILITY_BAND_PX
        && rect.top - viewport_height < -VISIBILITY_BAND_PX
    {
        return Decision::Start;
    }

    if repeat && armed && (rect.top - viewport_height > 0.0 || rect.top < -rect.height) {
        return Decision::Rearm;
    }

    Decision::Hold
}
