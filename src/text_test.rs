use super::*;

fn options(speed: u64, duration: Option<u64>, delay: u64) -> TextOptions {
    TextOptions { speed_ms: speed, duration_ms: duration, delay_ms: delay, ..TextOptions::default() }
}

fn glyph_delays(sched: &Schedule) -> Vec<u64> {
    sched
        .pieces
        .iter()
        .filter_map(|p| match p {
            Piece::Glyph { delay_ms, .. } => Some(*delay_ms),
            Piece::Break => None,
        })
        .collect()
}

#[test]
fn per_char_uses_speed_without_duration() {
    assert_eq!(per_char_ms("abc", &options(100, None, 0)), 100);
}

#[test]
fn per_char_splits_duration_across_visible_chars() {
    assert_eq!(per_char_ms("abc", &options(100, Some(300), 0)), 100);
    assert_eq!(per_char_ms("abcdef", &options(100, Some(300), 0)), 50);
}

#[test]
fn per_char_ignores_newlines_when_splitting() {
    assert_eq!(per_char_ms("ab\ncd", &options(100, Some(400), 0)), 100);
}

#[test]
fn per_char_empty_text_does_not_divide_by_zero() {
    assert_eq!(per_char_ms("", &options(100, Some(300), 0)), 300);
}

#[test]
fn schedule_staggers_each_character() {
    let sched = schedule("ab", &options(100, None, 0), 0);
    assert_eq!(glyph_delays(&sched), vec![100, 200]);
    assert_eq!(sched.end_delay_ms, 200);
}

#[test]
fn schedule_applies_start_and_option_delays() {
    let sched = schedule("ab", &options(100, None, 50), 1000);
    assert_eq!(glyph_delays(&sched), vec![1150, 1250]);
    assert_eq!(sched.end_delay_ms, 1250);
}

#[test]
fn schedule_preserves_characters_in_order() {
    let sched = schedule("hi", &options(100, None, 0), 0);
    let chars: Vec<char> = sched
        .pieces
        .iter()
        .filter_map(|p| match p {
            Piece::Glyph { ch, .. } => Some(*ch),
            Piece::Break => None,
        })
        .collect();
    assert_eq!(chars, vec!['h', 'i']);
}

#[test]
fn newline_becomes_break_without_advancing_the_clock() {
    let sched = schedule("a\nb", &options(100, None, 0), 0);
    assert_eq!(
        sched.pieces,
        vec![
            Piece::Glyph { ch: 'a', delay_ms: 100 },
            Piece::Break,
            Piece::Glyph { ch: 'b', delay_ms: 200 },
        ]
    );
}

#[test]
fn duration_override_lands_last_char_at_total() {
    let sched = schedule("abcd", &options(999, Some(400), 0), 0);
    assert_eq!(glyph_delays(&sched), vec![100, 200, 300, 400]);
    assert_eq!(sched.end_delay_ms, 400);
}

#[test]
fn empty_text_schedule_carries_only_the_delays() {
    let sched = schedule("", &options(100, None, 30), 70);
    assert!(sched.pieces.is_empty());
    assert_eq!(sched.end_delay_ms, 100);
}

#[test]
fn group_chains_elements_end_to_end() {
    let scheds = schedule_group(&["ab", "c"], &options(100, None, 50));
    assert_eq!(scheds.len(), 2);
    assert_eq!(glyph_delays(&scheds[0]), vec![150, 250]);
    // Second element starts from the first one's end delay.
    assert_eq!(glyph_delays(&scheds[1]), vec![350]);
    assert_eq!(scheds[1].end_delay_ms, 350);
}

#[test]
fn group_of_one_matches_plain_schedule() {
    let opts = options(200, None, 0);
    let scheds = schedule_group(&["xy"], &opts);
    assert_eq!(scheds[0], schedule("xy", &opts, 0));
}

#[test]
fn default_options_cadence() {
    let sched = schedule("a", &TextOptions::default(), 0);
    // 100ms start delay, then the 500ms per-character step.
    assert_eq!(glyph_delays(&sched), vec![600]);
}
