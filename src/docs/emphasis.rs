//! Locates the clinical-note headings that get bold styling in the exported
//! document.
//!
//! The note text is inserted into the document body starting at index 1, so
//! every range is shifted by [`BODY_START_INDEX`]. Offsets count characters,
//! not bytes; the skeleton titles contain an en dash.

/// Structural content of a fresh document begins at index 1, after the
/// implicit body start.
pub const BODY_START_INDEX: usize = 1;

/// A half-open styling range in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisRange {
    pub start: usize,
    pub end: usize,
}

/// The subjective section marker. Styled as just the letter S, a quirk the
/// practice's existing documents all share.
const SUBJECTIVE_MARKER: &str = "S-";

#[derive(Clone, Copy)]
enum Occurrences {
    First,
    All,
}

/// The fixed heading set. `Domain:` repeats once per track group in
/// multi-domain notes, so it alone is matched at every occurrence. A literal
/// absent from a given note variant is skipped.
const HEADINGS: [(&str, Occurrences); 8] = [
    ("Clinical Notes", Occurrences::First),
    (SUBJECTIVE_MARKER, Occurrences::First),
    ("Session Objectives:", Occurrences::First),
    ("Domain:", Occurrences::All),
    ("Observations", Occurrences::First),
    ("Home Practise:", Occurrences::First),
    ("Next Session:", Occurrences::First),
    ("Signed:", Occurrences::First),
];

/// Compute every bold range for a resolved note, in heading-table order.
pub fn heading_ranges(text: &str) -> Vec<EmphasisRange> {
    let mut ranges = Vec::new();
    for (literal, occurrences) in HEADINGS {
        match occurrences {
            Occurrences::First => {
                if let Some(at) = find_first(text, literal) {
                    ranges.push(range_for(literal, at));
                }
            }
            Occurrences::All => {
                for at in find_all_nonoverlapping(text, literal) {
                    ranges.push(range_for(literal, at));
                }
            }
        }
    }
    ranges
}

/// Character offset of the first occurrence of `literal` in `text`.
pub fn find_first(text: &str, literal: &str) -> Option<usize> {
    text.find(literal)
        .map(|byte_at| text[..byte_at].chars().count())
}

/// Character offsets of every occurrence of `literal`, scanning left to
/// right and resuming after each match end, so matches never overlap.
pub fn find_all_nonoverlapping(text: &str, literal: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    if literal.is_empty() {
        return starts;
    }
    let mut from = 0;
    let mut chars_before = 0;
    while let Some(found) = text[from..].find(literal) {
        let byte_at = from + found;
        chars_before += text[from..byte_at].chars().count();
        starts.push(chars_before);
        chars_before += literal.chars().count();
        from = byte_at + literal.len();
    }
    starts
}

fn range_for(literal: &str, at: usize) -> EmphasisRange {
    let styled_len = if literal == SUBJECTIVE_MARKER {
        1
    } else {
        literal.chars().count()
    };
    EmphasisRange {
        start: at + BODY_START_INDEX,
        end: at + styled_len + BODY_START_INDEX,
    }
}
