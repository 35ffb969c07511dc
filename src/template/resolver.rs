use chrono::{Local, NaiveDate};

use super::variants::{TemplateVariant, Track, TrackName};

/// Fill a clinical-note skeleton with the therapist-supplied session details.
///
/// Dates render in day/month/year order, matching the practice's paper forms.
/// Uses today's local date; see [`resolve_on`] for an injectable date.
pub fn resolve(
    name: &str,
    tracks: &[Track],
    next_session_plans: Option<&str>,
    session_notes: Option<&str>,
) -> String {
    resolve_on(
        Local::now().date_naive(),
        name,
        tracks,
        next_session_plans,
        session_notes,
    )
}

/// Date-injected form of [`resolve`].
///
/// Each placeholder token is substituted at its first occurrence only; the
/// skeletons reference each token once, and a token the skeleton does not
/// contain is simply left alone. Substitution order is fixed: name, track,
/// date, objectives, combined objectives, next-session plans.
pub fn resolve_on(
    date: NaiveDate,
    name: &str,
    tracks: &[Track],
    next_session_plans: Option<&str>,
    session_notes: Option<&str>,
) -> String {
    let variant = TemplateVariant::for_tracks(tracks);
    let objectives = objectives_block(tracks);
    let track_label = match tracks {
        [single] => single.name.label(),
        _ => TrackName::General.label(),
    };
    let plans = next_session_plans.map(plan_bullets).unwrap_or_default();

    let mut note = variant.skeleton().to_string();
    note = note.replacen("{name}", name, 1);
    note = note.replacen("{track}", track_label, 1);
    note = note.replacen("{today}", &date.format("%d/%m/%Y").to_string(), 1);
    note = note.replacen("{objectives}", &objectives, 1);
    note = note.replacen("{tracksAndObjectives}", &objectives, 1);
    note = note.replacen("{nextSessionPlans}", &plans, 1);

    if let Some(notes) = session_notes {
        let trimmed = notes.trim();
        if !trimmed.is_empty() {
            note = insert_session_notes(&note, trimmed);
        }
    }

    note
}

/// Render the objectives section.
///
/// A single track gets plain numbered lines. Multiple tracks get one group
/// per domain, each headed by `Domain: {label}` with its objectives numbered
/// from 1 and indented two spaces, groups separated by a blank line.
pub fn objectives_block(tracks: &[Track]) -> String {
    match tracks {
        [single] => single
            .objectives
            .iter()
            .enumerate()
            .map(|(i, objective)| format!("{}. {}", i + 1, objective))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => tracks
            .iter()
            .map(|track| {
                let mut group = format!("Domain: {}", track.name.label());
                for (i, objective) in track.objectives.iter().enumerate() {
                    group.push_str(&format!("\n  {}. {}", i + 1, objective));
                }
                group
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Turn free-form next-session text into a bullet list.
///
/// Splits on newlines and commas, trims each piece, drops empties, and
/// prefixes the survivors with `- `.
pub fn plan_bullets(raw: &str) -> String {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("- {piece}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// Notes slot in just above the signature block so the form keeps exactly one
// Signed: marker for the document emphasis pass to find.
fn insert_session_notes(note: &str, notes: &str) -> String {
    match note.rfind("Signed:") {
        Some(at) => {
            let mut out = String::with_capacity(note.len() + notes.len() + 24);
            out.push_str(&note[..at]);
            out.push_str("Session Notes:\n");
            out.push_str(notes);
            out.push_str("\n\n");
            out.push_str(&note[at..]);
            out
        }
        None => format!("{note}\nSession Notes:\n{notes}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: TrackName, objectives: &[&str]) -> Track {
        Track {
            name,
            objectives: objectives.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_track_objectives_are_numbered() {
        let tracks = [track(TrackName::Articulation, &["/s/ in initial position", "/s/ blends"])];
        assert_eq!(
            objectives_block(&tracks),
            "1. /s/ in initial position\n2. /s/ blends"
        );
    }

    #[test]
    fn test_multi_track_objectives_group_by_domain() {
        let tracks = [
            track(TrackName::Language, &["turn-taking"]),
            track(TrackName::PlaySkills, &["sharing"]),
        ];
        assert_eq!(
            objectives_block(&tracks),
            "Domain: Language\n  1. turn-taking\n\nDomain: Play Skills\n  1. sharing"
        );
    }

    #[test]
    fn test_plan_bullets_split_on_newline_and_comma() {
        assert_eq!(
            plan_bullets("review /s/ blends, introduce /r/\n homework check "),
            "- review /s/ blends\n- introduce /r/\n- homework check"
        );
        assert_eq!(plan_bullets(" , ,\n"), "");
    }

    #[test]
    fn test_resolve_fills_every_token() {
        let tracks = [track(TrackName::Language, &["expand MLU to 3 words"])];
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let note = resolve_on(date, "Avery P.", &tracks, Some("model two-word requests"), None);

        assert!(note.starts_with("LANGUAGE – CLINICAL NOTES"));
        assert!(note.contains("Names: Avery P."));
        assert!(note.contains("Date: 07/03/2025"));
        assert!(note.contains("1. expand MLU to 3 words"));
        assert!(note.contains("- model two-word requests"));
        assert!(!note.contains('{'), "unsubstituted token left in note:\n{note}");
    }

    #[test]
    fn test_resolve_session_notes_precede_signature() {
        let tracks = [track(TrackName::General, &["anything"])];
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let note = resolve_on(date, "A", &tracks, None, Some("  parent arrived late  "));

        let notes_at = note.find("Session Notes:\nparent arrived late").unwrap();
        let signed_at = note.find("Signed:").unwrap();
        assert!(notes_at < signed_at);
        assert_eq!(note.matches("Signed:").count(), 1);
    }

    #[test]
    fn test_resolve_blank_session_notes_add_nothing() {
        let tracks = [track(TrackName::Dysfluency, &["easy onset"])];
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let note = resolve_on(date, "A", &tracks, None, Some("   "));
        assert!(!note.contains("Session Notes:"));
    }

    #[test]
    fn test_two_tracks_use_generic_skeleton() {
        let tracks = [
            track(TrackName::Articulation, &["a"]),
            track(TrackName::Language, &["b"]),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let note = resolve_on(date, "A", &tracks, None, None);
        assert!(note.starts_with("Clinical Notes"));
        assert!(note.contains("Domain: Articulation"));
        assert!(note.contains("Domain: Language"));
    }

    #[test]
    fn test_missing_plan_leaves_empty_block() {
        let tracks = [track(TrackName::PlaySkills, &["pretend play"])];
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let note = resolve_on(date, "A", &tracks, None, None);
        assert!(note.contains("Next Session:\n\n"));
    }
}
