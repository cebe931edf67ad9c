//! Randomized checks of the window invariants against a plain host buffer.

use docwin::{Shred, WindowedDocument};
use docwin_text::{shared, HostBuffer, SharedBuffer, TextBuffer};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use std::ops::Range;

const AFFIXES: &[&str] = &["", "<", ">", "(", ")", "::"];
/// Non-empty affixes that can never be confused with a lowercase body.
const TAGS: &[&str] = &["<", ">", "(", ")"];
const FILLER: &str = " + ";

struct Fixture {
    host: SharedBuffer,
    window: WindowedDocument,
    fillers: String,
}

/// Host made of random lowercase literals, one shred per literal with prefix and suffix drawn
/// from `affixes`. Literals are joined by [`FILLER`] or touch directly.
fn fixture(rng: &mut StdRng, affixes: &[&str]) -> Fixture {
    let count = rng.random_range(1..5);
    let mut text = String::new();
    let mut fillers = String::new();
    let mut shreds = Vec::new();
    for index in 0..count {
        if index > 0 && rng.random_bool(0.5) {
            text.push_str(FILLER);
            fillers.push_str(FILLER);
        }
        let body = word(rng, 0..6);
        let start = text.chars().count();
        text.push_str(&body);
        let end = text.chars().count();
        let prefix = *affixes.choose(rng).unwrap();
        let suffix = *affixes.choose(rng).unwrap();
        shreds.push(Shred::new(prefix, start..end, suffix));
    }

    let host = shared(TextBuffer::from_text(&text));
    let window = WindowedDocument::new(host.clone(), false, shreds).unwrap();
    Fixture {
        host,
        window,
        fillers,
    }
}

fn word(rng: &mut StdRng, len: Range<usize>) -> String {
    let len = rng.random_range(len);
    (0..len).map(|_| rng.random_range('a'..='z')).collect()
}

/// Virtual range of each segment's host-backed body.
fn bodies(window: &WindowedDocument) -> Vec<Range<usize>> {
    let mut offset = 0;
    let mut bodies = Vec::new();
    for (index, range) in window.host_ranges().into_iter().enumerate() {
        let range = range.unwrap();
        offset += window.prefix(index).unwrap().chars().count();
        bodies.push(offset..offset + range.len());
        offset += range.len() + window.suffix(index).unwrap().chars().count();
    }
    bodies
}

fn lens(ranges: &[Option<Range<usize>>]) -> Vec<usize> {
    ranges
        .iter()
        .map(|range| range.as_ref().map_or(0, |range| range.len()))
        .collect()
}

fn expected_text(fixture: &Fixture) -> String {
    let host = fixture.host.read();
    let mut text = String::new();
    for (index, range) in fixture.window.host_ranges().into_iter().enumerate() {
        text.push_str(fixture.window.prefix(index).unwrap());
        text.push_str(&host.slice(range.unwrap()));
        text.push_str(fixture.window.suffix(index).unwrap());
    }
    text
}

/// Every range is still valid, ordered before the next, and none overlap.
fn assert_ranges_disjoint(window: &WindowedDocument) {
    let ranges = window.host_ranges();
    assert!(ranges.iter().all(Option::is_some), "{ranges:?}");
    let ranges: Vec<_> = ranges.into_iter().flatten().collect();
    for pair in ranges.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{ranges:?}");
    }
}

/// Host text with every windowed range cut out.
fn host_outside_ranges(fixture: &Fixture) -> String {
    let text: Vec<char> = fixture.host.read().text().chars().collect();
    let mut outside = String::new();
    let mut at = 0;
    for range in fixture.window.host_ranges().into_iter().flatten() {
        outside.extend(&text[at..range.start]);
        at = range.end;
    }
    outside.extend(&text[at..]);
    outside
}

#[test]
fn window_text_is_concatenation_of_fragments() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let fixture = fixture(&mut rng, AFFIXES);
        assert_eq!(fixture.window.text(), expected_text(&fixture));
        assert_eq!(fixture.window.len(), fixture.window.text().chars().count());
    }
}

#[test]
fn interior_offsets_round_trip() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let fixture = fixture(&mut rng, AFFIXES);
        for body in bodies(&fixture.window) {
            for offset in body.start + 1..body.end {
                let host_offset = fixture.window.virtual_to_host(offset).unwrap();
                assert_eq!(fixture.window.host_to_virtual(host_offset), Some(offset));
            }
        }
    }
}

#[test]
fn random_edits_keep_fixed_text_and_fillers() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let mut fixture = fixture(&mut rng, AFFIXES);
        for _ in 0..20 {
            let bodies = bodies(&fixture.window);
            let body = bodies.choose(&mut rng).unwrap().clone();
            let start = rng.random_range(body.start..=body.end);
            let end = rng.random_range(start..=body.end);
            match rng.random_range(0..3) {
                0 => fixture.window.insert(start, &word(&mut rng, 1..4)).unwrap(),
                1 => fixture.window.delete(start..end).unwrap(),
                _ => fixture
                    .window
                    .replace(start..end, &word(&mut rng, 0..4))
                    .unwrap(),
            }

            assert!(fixture.window.is_valid());
            assert_ranges_disjoint(&fixture.window);
            assert_eq!(fixture.window.text(), expected_text(&fixture));
            assert_eq!(host_outside_ranges(&fixture), fixture.fillers);
        }
    }
}

#[test]
fn set_text_reproduces_single_segment_edits() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..100 {
        let mut fixture = fixture(&mut rng, TAGS);
        let text: Vec<char> = fixture.window.text().chars().collect();
        let bodies = bodies(&fixture.window);
        let body = bodies.choose(&mut rng).unwrap().clone();
        let at = rng.random_range(body.start..=body.end);

        let mut target: String = text[..at].iter().collect();
        target.push_str(&word(&mut rng, 1..4));
        target.extend(&text[at..]);

        let before = lens(&fixture.window.host_ranges());
        fixture.window.set_text(&target).unwrap();
        assert_eq!(fixture.window.text(), target);
        assert_ranges_disjoint(&fixture.window);
        assert_eq!(host_outside_ranges(&fixture), fixture.fillers);

        let after = lens(&fixture.window.host_ranges());
        let changed = before.iter().zip(&after).filter(|(a, b)| a != b).count();
        assert_eq!(changed, 1, "{target:?}");
    }
}

#[test]
fn set_text_reproduces_arbitrary_targets_without_affixes() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let mut fixture = fixture(&mut rng, &[""]);
        let target = word(&mut rng, 0..20);
        fixture.window.set_text(&target).unwrap();
        assert_eq!(fixture.window.text(), target);
        assert_ranges_disjoint(&fixture.window);
        assert_eq!(host_outside_ranges(&fixture), fixture.fillers);
    }
}

#[test]
fn set_text_with_current_text_is_idempotent() {
    docwin_log::test();
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..50 {
        let mut fixture = fixture(&mut rng, AFFIXES);
        let version = fixture.window.version();
        let text = fixture.window.text();
        fixture.window.set_text(&text).unwrap();
        assert_eq!(fixture.window.version(), version);
    }
}
