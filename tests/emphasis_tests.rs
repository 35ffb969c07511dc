// Integration tests for heading emphasis over resolved clinical notes.
//
// Ranges are expressed in document coordinates: character offsets shifted by
// one for the body start. The resolved skeletons are the realistic input, so
// most cases here drive the matcher through full notes.

use chrono::NaiveDate;
use therascribe::docs::{find_all_nonoverlapping, find_first, heading_ranges};
use therascribe::template::resolve_on;
use therascribe::{EmphasisRange, Track, TrackName};

fn note_for(tracks: &[Track]) -> String {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    resolve_on(date, "Avery P.", tracks, Some("review pictures"), None)
}

fn track(name: TrackName, objective: &str) -> Track {
    Track {
        name,
        objectives: vec![objective.to_string()],
    }
}

/// The characters a range would style, mapped back from document coordinates.
fn styled_chars(text: &str, range: &EmphasisRange) -> String {
    text.chars()
        .skip(range.start - 1)
        .take(range.end - range.start)
        .collect()
}

#[test]
fn test_generic_note_styles_every_heading() {
    let note = note_for(&[
        track(TrackName::Language, "turn-taking"),
        track(TrackName::PlaySkills, "sharing"),
    ]);
    let ranges = heading_ranges(&note);

    // Seven single headings plus three Domain: lines (two track groups and
    // the guidance line in the skeleton body).
    assert_eq!(ranges.len(), 10, "note was:\n{note}");

    let styled: Vec<String> = ranges.iter().map(|r| styled_chars(&note, r)).collect();
    assert_eq!(styled[0], "Clinical Notes");
    assert_eq!(styled[1], "S", "the subjective marker styles a single letter");
    assert_eq!(styled.iter().filter(|s| *s == "Domain:").count(), 3);
    for heading in ["Session Objectives:", "Observations", "Home Practise:", "Next Session:", "Signed:"] {
        assert!(styled.contains(&heading.to_string()), "missing {heading}");
    }
}

#[test]
fn test_ranges_sit_one_past_the_character_offset() {
    let note = note_for(&[
        track(TrackName::Language, "turn-taking"),
        track(TrackName::PlaySkills, "sharing"),
    ]);
    let ranges = heading_ranges(&note);

    // The title starts the note, so its range starts at the body index.
    assert_eq!(ranges[0], EmphasisRange { start: 1, end: 15 });
    for range in &ranges {
        assert!(range.start >= 1 && range.end > range.start);
    }
}

#[test]
fn test_absent_headings_are_skipped() {
    // The articulation form has an uppercase title and spells the home
    // section "Practice", so three of the eight literals never match.
    let note = note_for(&[track(TrackName::Articulation, "improve /s/")]);
    let ranges = heading_ranges(&note);

    assert_eq!(ranges.len(), 5);
    let styled: Vec<String> = ranges.iter().map(|r| styled_chars(&note, r)).collect();
    assert!(!styled.contains(&"Clinical Notes".to_string()));
    assert!(!styled.contains(&"Home Practise:".to_string()));
    assert!(!styled.iter().any(|s| s == "Domain:"));
}

#[test]
fn test_no_headings_no_ranges() {
    assert!(heading_ranges("nothing clinical here").is_empty());
}

#[test]
fn test_subjective_marker_range_is_one_wide() {
    let ranges = heading_ranges("S- quiet entry, joined table play");
    assert_eq!(ranges, vec![EmphasisRange { start: 1, end: 2 }]);
}

#[test]
fn test_repeated_headings_match_once_except_domain() {
    let text = "Signed:\nSigned:\nDomain: A\nDomain: B";
    let ranges = heading_ranges(text);

    let domains: Vec<&EmphasisRange> = ranges
        .iter()
        .filter(|r| styled_chars(text, r) == "Domain:")
        .collect();
    let signatures: Vec<&EmphasisRange> = ranges
        .iter()
        .filter(|r| styled_chars(text, r) == "Signed:")
        .collect();
    assert_eq!(domains.len(), 2);
    assert_eq!(signatures.len(), 1);
    assert_eq!(signatures[0].start, 1, "only the first occurrence is styled");
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    // The en dash is three bytes but one character; a byte-based offset
    // would land the range two positions late.
    let text = "– S-";
    assert_eq!(find_first(text, "S-"), Some(2));
    assert_eq!(heading_ranges(text), vec![EmphasisRange { start: 3, end: 4 }]);
}

#[test]
fn test_find_all_does_not_overlap_matches() {
    assert_eq!(find_all_nonoverlapping("aaaa", "aa"), vec![0, 2]);
    assert_eq!(
        find_all_nonoverlapping("Domain: A Domain: B", "Domain:"),
        vec![0, 10]
    );
}

#[test]
fn test_find_first_misses_cleanly() {
    assert_eq!(find_first("no match here", "Signed:"), None);
    assert!(find_all_nonoverlapping("no match here", "Domain:").is_empty());
}
