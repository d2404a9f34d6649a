//! Text-reveal scheduling: per-character cues for the typewriter effect.
//!
//! The typewriter works by wrapping each character in its own element with a
//! staggered CSS `animation-delay`; the cues computed here carry those
//! delays. Grouped elements chain their accumulated delays so a later
//! element starts typing after an earlier one finishes.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use crate::config::TextOptions;

/// One unit of typewriter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// A visible character revealed after `delay_ms`.
    Glyph { ch: char, delay_ms: u64 },
    /// A line break; passes through with no reveal delay of its own.
    Break,
}

/// The cue list for one element plus the delay at which its last character
/// lands, used to chain grouped elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub pieces: Vec<Piece>,
    /// Accumulated delay after the final character, in ms.
    pub end_delay_ms: u64,
}

/// Per-character reveal time: an explicit `duration` is split evenly across
/// the visible characters, otherwise `speed` applies per character.
#[must_use]
pub fn per_char_ms(text: &str, options: &TextOptions) -> u64 {
    let visible = text.chars().filter(|c| *c != '\n').count() as u64;
    options
        .duration_ms
        .map_or(options.speed_ms, |total| total / visible.max(1))
}

/// Build the cue list for one element.
///
/// Delays accumulate from `start_delay_ms` plus the options' own start
/// delay; each visible character advances the clock by the per-character
/// time before it is cued, so the first character appears one step after
/// the start.
#[must_use]
pub fn schedule(text: &str, options: &TextOptions, start_delay_ms: u64) -> Schedule {
    let step = per_char_ms(text, options);
    let mut delay = start_delay_ms + options.delay_ms;

    let pieces = text
        .chars()
        .map(|ch| {
            if ch == '\n' {
                Piece::Break
            } else {
                delay += step;
                Piece::Glyph { ch, delay_ms: delay }
            }
        })
        .collect();

    Schedule { pieces, end_delay_ms: delay }
}

/// Schedule a group of elements, chaining the accumulated delay so each
/// element begins after the previous one has finished typing.
#[must_use]
pub fn schedule_group(texts: &[&str], options: &TextOptions) -> Vec<Schedule> {
    let mut start = 0;
    texts
        .iter()
        .map(|text| {
            let sched = schedule(text, options, start);
            start = sched.end_delay_ms;
            sched
        })
        .collect()
}
