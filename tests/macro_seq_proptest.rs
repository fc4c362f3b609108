//! Property-based tests for macro sequence dedup and rendering.

use proptest::prelude::*;
use ratbag_bind::macro_seq::{parse_event_list, MacroEvent, MacroEventKind, MacroSequence};
use ratbag_bind::{load_macro, store_macro};
use ratbag_model::input_codes::KEY_MAX;
use ratbag_model::memory::MemoryButton;

fn kind_strategy() -> impl Strategy<Value = MacroEventKind> {
    prop_oneof![
        Just(MacroEventKind::KeyPress),
        Just(MacroEventKind::KeyRelease),
        Just(MacroEventKind::Wait),
    ]
}

// Small value range so adjacent duplicates actually occur
fn event_strategy() -> impl Strategy<Value = MacroEvent> {
    (kind_strategy(), 28u32..32).prop_map(|(kind, value)| MacroEvent::new(kind, value))
}

fn wide_event_strategy() -> impl Strategy<Value = MacroEvent> {
    (kind_strategy(), 0u32..=KEY_MAX).prop_map(|(kind, value)| MacroEvent::new(kind, value))
}

fn dedup_adjacent(events: &[MacroEvent]) -> Vec<MacroEvent> {
    let mut out = events.to_vec();
    out.dedup();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_from_events_is_adjacent_dedup(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let seq = MacroSequence::from_events(events.iter().copied());
        let expected = dedup_adjacent(&events);
        prop_assert_eq!(seq.events(), expected.as_slice());
    }

    #[test]
    fn prop_no_equal_neighbours(events in prop::collection::vec(event_strategy(), 0..40)) {
        let seq = MacroSequence::from_events(events);
        for pair in seq.events().windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_append_grows_by_zero_or_one(
        events in prop::collection::vec(event_strategy(), 0..20),
        next in event_strategy(),
    ) {
        let mut seq = MacroSequence::from_events(events);
        let before = seq.len();
        let was_last = seq.events().last() == Some(&next);
        let changed = seq.push(next);
        prop_assert_eq!(changed, !was_last);
        prop_assert_eq!(seq.len(), before + usize::from(changed));
        prop_assert_eq!(seq.events().last(), Some(&next));
    }

    #[test]
    fn prop_reconstruction_is_idempotent(events in prop::collection::vec(event_strategy(), 0..40)) {
        let seq = MacroSequence::from_events(events);
        let again = MacroSequence::from_events(seq.events().iter().copied());
        prop_assert_eq!(again.events(), seq.events());
    }

    #[test]
    fn prop_render_never_empty(events in prop::collection::vec(wide_event_strategy(), 0..20)) {
        let seq = MacroSequence::from_events(events);
        let rendered = seq.render();
        prop_assert!(!rendered.is_empty());
        prop_assert_eq!(rendered == "None", seq.is_empty());
    }

    #[test]
    fn prop_render_token_count(events in prop::collection::vec(event_strategy(), 1..40)) {
        let seq = MacroSequence::from_events(events);
        let tokens = seq.render().split(' ').count();
        let taps = seq.render().matches('♦').count();
        prop_assert_eq!(tokens + taps, seq.len());
    }

    #[test]
    fn prop_syntax_parses_back(events in prop::collection::vec(wide_event_strategy(), 1..20)) {
        let seq = MacroSequence::from_events(events);
        let parsed = parse_event_list(&seq.to_syntax()).unwrap();
        prop_assert_eq!(parsed.as_slice(), seq.events());
    }

    #[test]
    fn prop_button_round_trip(events in prop::collection::vec(wide_event_strategy(), 0..60)) {
        let seq = MacroSequence::from_events(events);
        let mut button = MemoryButton::default();
        store_macro(&mut button, &seq).unwrap();
        prop_assert_eq!(load_macro(&button).unwrap(), seq);
    }
}
