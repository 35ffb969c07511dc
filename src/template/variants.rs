use serde::{Deserialize, Serialize};

/// Therapy domains a session track can belong to.
///
/// The set is closed: anything outside it parses to `General`, so template
/// lookup is total and can never hit a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackName {
    Articulation,
    AuditoryVerbalTherapy,
    Dysfluency,
    Language,
    PlaySkills,
    PreverbalSkills,
    General,
}

impl TrackName {
    /// Total parse: unknown labels map to the generic domain.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Articulation" => TrackName::Articulation,
            "Auditory Verbal Therapy" => TrackName::AuditoryVerbalTherapy,
            "Dysfluency" => TrackName::Dysfluency,
            "Language" => TrackName::Language,
            "Play Skills" => TrackName::PlaySkills,
            "Preverbal Skills" => TrackName::PreverbalSkills,
            _ => TrackName::General,
        }
    }

    /// Display label, used for `Domain:` headings and the `{track}` token.
    pub fn label(&self) -> &'static str {
        match self {
            TrackName::Articulation => "Articulation",
            TrackName::AuditoryVerbalTherapy => "Auditory Verbal Therapy",
            TrackName::Dysfluency => "Dysfluency",
            TrackName::Language => "Language",
            TrackName::PlaySkills => "Play Skills",
            TrackName::PreverbalSkills => "Preverbal Skills",
            TrackName::General => "General",
        }
    }
}

/// One therapy track: a domain plus its ordered session objectives.
///
/// Objective order is display order; the list is expected to be non-empty
/// (the HTTP layer rejects tracks without objectives).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: TrackName,
    pub objectives: Vec<String>,
}

/// A clinical-note skeleton, one per therapy domain plus the generic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    Articulation,
    AuditoryVerbalTherapy,
    Dysfluency,
    Language,
    PlaySkills,
    PreverbalSkills,
    General,
}

impl TemplateVariant {
    /// Selection rule: exactly one track picks that track's variant
    /// (generic for unrecognized domains); two or more tracks always pick
    /// the generic form, which groups objectives per domain.
    pub fn for_tracks(tracks: &[Track]) -> Self {
        match tracks {
            [single] => TemplateVariant::for_track_name(single.name),
            _ => TemplateVariant::General,
        }
    }

    fn for_track_name(name: TrackName) -> Self {
        match name {
            TrackName::Articulation => TemplateVariant::Articulation,
            TrackName::AuditoryVerbalTherapy => TemplateVariant::AuditoryVerbalTherapy,
            TrackName::Dysfluency => TemplateVariant::Dysfluency,
            TrackName::Language => TemplateVariant::Language,
            TrackName::PlaySkills => TemplateVariant::PlaySkills,
            TrackName::PreverbalSkills => TemplateVariant::PreverbalSkills,
            TrackName::General => TemplateVariant::General,
        }
    }

    /// The raw skeleton text with its placeholder tokens still in place.
    pub fn skeleton(&self) -> &'static str {
        match self {
            TemplateVariant::Articulation => ARTICULATION,
            TemplateVariant::AuditoryVerbalTherapy => AUDITORY_VERBAL_THERAPY,
            TemplateVariant::Dysfluency => DYSFLUENCY,
            TemplateVariant::Language => LANGUAGE,
            TemplateVariant::PlaySkills => PLAY_SKILLS,
            TemplateVariant::PreverbalSkills => PREVERBAL_SKILLS,
            TemplateVariant::General => GENERAL,
        }
    }
}

// Clinical form skeletons. The wording is the practice's own documentation
// standard and is reproduced as supplied, spelling quirks included.

const ARTICULATION: &str = r#"ARTICULATION – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
---------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied the client? How did the client participate? Mention alertness, attention, motivation, and overall engagement. Note any concerns such as fatigue, illness, or emotional state.

Session Objectives:
{objectives}

Articulation Targets and Activities
For each objective above, provide detailed documentation following this structure:

Target Sound: /___/
Position: Initial / Medial / Final
Phonetic Placement Focus: _________________________
Cueing Method: Verbal / Visual / Tactile / Auditory

Activity [number]: [Activity Name]
Props: [List props used]
- [Describe activity and approach]
- [Note SLP modeling and client responses]

Outcome:
- Accuracy: ___ / 10 correct productions
- [Specific observations about performance]
- [Note any error patterns or cueing effectiveness]

(Repeat for all objectives/activities)

Observations
- Note motivation, attention, and consistency across tasks
- Mention any stimulability for other sounds or co-occurring phonological processes
- Note if errors were consistent, inconsistent, or context-dependent

Home Practice:
- Practice recommendations with specific tasks
- Caregiver guidance
- Optional handout suggestions

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const AUDITORY_VERBAL_THERAPY: &str = r#"AUDITORY VERBAL THERAPY – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
---------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied the child? How did the child participate? Note listening attention, responsiveness to sound, and general engagement. Mention any parental participation or observations relevant to the session.

Session Objectives:
{objectives}

Listening Goals
For each objective, identify the listening hierarchy level (Detection/Discrimination/Identification/Comprehension) and provide details:

Goal [number]: [Listening Level]
Props: [List props used]
- [Describe activity and approach]
- [Note acoustic highlighting, cueing methods]
- [Client responses and parent coaching]

Outcome:
- [Measurable results with numbers/percentages]
- [Note any challenges or supports needed]

(Repeat for all listening objectives)

Speech and Language Targets
Goal [number]: [Speech Production/Expressive Language]
Target: [Specific sounds/language structures]
- [Activity description and approach]

Outcome:
- [Production accuracy and observations]

Parent Coaching / Strategies Practiced
- Auditory First: [How implemented]
- Acoustic Highlighting: [Examples]
- Auditory Sandwich: [Usage]
- Sabotage Techniques: [Examples]
- Wait Time: [Implementation]

Observations
- Note changes in attention, listening, or speech imitation
- Record progress toward listening hierarchy levels
- Mention device issues, listening checks, or parent engagement

Home Practice:
- Daily listening activities
- Listening-first strategies for routines
- Specific practice recommendations
- Handout suggestions

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const DYSFLUENCY: &str = r#"STUTTERING – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
----------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied the client? How did the client participate? Note fluency, attention, and motivation. Mention if any prompts or breaks were required, or if the client appeared anxious, tired, or distracted.

Session Objectives:
{objectives}

Fluency-Shaping / Stuttering Modification Activities
For each activity(Identifying Stuttering Moments, Easy Onset / Stretchy Speech Practice, Cancellations / Pull-outs Practice), provide detailed documentation:

Activity [number]: [Activity Name]
Props: [List props used]
- [Describe fluency strategy taught/practiced]
- [SLP modeling and client practice]
- [Note awareness and self-monitoring]

Outcome:
- [Success rate with numbers/percentages]
- [Observations about tension, avoidance, self-correction]
- [Note contexts where fluency improved or worsened]

(Repeat for all activities)

Observations
- Note behavioral/emotional reactions to stuttering
- Record fluency contexts that improved or worsened
- Note any specific triggers or supports observed

Home Practice:
- Awareness activities
- Fluency strategy practice
- Family communication guidance
- Optional handout suggestions

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const LANGUAGE: &str = r#"LANGUAGE – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
----------------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied client. How did the client participate? Did you offer prompts for participation. Include any other information eg. if the client looked unwell, etc.

Session Objectives:
{objectives}

Language
For each objective, identify the language area and provide details:

[Language Area]: [Specific skill]
Props: [List props used]
- [Describe activity and approach]
- [Note prompting levels and client responses]

Outcome:
- [Accuracy/success rate with specifics]
- [Observations about support needed]
- [Note any patterns or challenges]

(Repeat for all objectives)

Observations
- Note down anything the client did that would inform prop/target selection in the next session
- Note down any preferences in toys

Home Practise:
- Specific practice recommendations
- Handouts: [List appropriate handouts]

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const PLAY_SKILLS: &str = r#"PLAY SKILLS – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
----------------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied client. How did the client participate? Did you offer prompts for participation. Include any other information eg. if the client looked unwell, etc.

Session Objectives:
{objectives}

Play Skills
For each play activity (eg Hide and Seek, Pop Up Pirate, Performatives, Shopping Game, Pretend Play Trains), provide detailed documentation:

[Play Activity Name]
Props: [List props used]
- [Describe play activity and rules]
- [Note modeling and client participation]
- [Phrases/skills reinforced]

Outcome:
- [Observations about compliance, engagement, skill demonstration]
- [Note any challenges with rules, turn-taking, etc.]

(Repeat for all activities)

Observations
- Note down anything the client did that would inform prop/target selection in the next session
- Note down any preferences in toys

Home Practise:
- Play activity recommendations
- Turn-taking and rule-following guidance
- Handouts: [List appropriate handouts]

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const PREVERBAL_SKILLS: &str = r#"PREVERBAL SKILLS – CLINICAL NOTES
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
----------------------------------------------------------------------------------------------------------------------------
S-
Where did the session take place, and who accompanied client. How did the client participate? Did you offer prompts for participation. Include any other information eg. if the client looked unwell, etc.

Session Objectives:
{objectives}

Pre-Verbal Skills
For each activity, provide detailed documentation:

[Skill Area] (e.g Copying animal sounds, Copying ah and mm, Nursery Rhymes like Wheels on the Bus)
Other Targets: [List co-occurring targets] (e.g., Eye Contact, Joint Attention, Turn-taking)
Props: [List props used]
- [Describe activity and approach]
- [Note modeling and prompting strategies]
- [Client responses and engagement]

Outcome:
- [Success rate: X/Y attempts]
- [Specific observations about performance]
- [Note any modifications that helped]

(Repeat for all activities)

Observations
- Note down anything the client did that would inform prop/target selection in the next session
- Note down any preferences in toys

Home Practise:
- Handouts: [List appropriate handouts]

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

const GENERAL: &str = r#"Clinical Notes
Names: {name}
Session Type: Face-to-face / Online (am/pm session)
Date: {today}
--------------------------------------------------------------------------------------------------------------------------
S- Describe where the session took place, who accompanied the client, how they participated, and any contextual notes (e.g., mood, health, attention).

Session Objectives:
{tracksAndObjectives}

For each objective above, expand details as follows:

Domain: [One of: Language / Articulation / Play Skills / Preverbal Skills / Auditory Verbal Therapy /Dysfluency / Other]
Objective [number]: [restate and expand on the objective task or activity]
- Objective details: props, cues, tasks used, client responses
Outcome:
- Measurable results or progress observed

(Repeat for all objectives of that domain)

Observations
- Note observations that inform future prop/target selection.

Home Practise:
- Include assigned home tasks and rationale.

Next Session:
{nextSessionPlans}

Signed:
_______________________________
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_name_parse_known_labels() {
        assert_eq!(TrackName::parse("Articulation"), TrackName::Articulation);
        assert_eq!(
            TrackName::parse("Auditory Verbal Therapy"),
            TrackName::AuditoryVerbalTherapy
        );
        assert_eq!(TrackName::parse("Play Skills"), TrackName::PlaySkills);
    }

    #[test]
    fn test_track_name_parse_is_total() {
        assert_eq!(TrackName::parse("Pragmatics"), TrackName::General);
        assert_eq!(TrackName::parse(""), TrackName::General);
        assert_eq!(TrackName::parse("articulation"), TrackName::General); // case-sensitive
    }

    #[test]
    fn test_every_skeleton_ends_with_signature_block() {
        let variants = [
            TemplateVariant::Articulation,
            TemplateVariant::AuditoryVerbalTherapy,
            TemplateVariant::Dysfluency,
            TemplateVariant::Language,
            TemplateVariant::PlaySkills,
            TemplateVariant::PreverbalSkills,
            TemplateVariant::General,
        ];
        for variant in variants {
            let skeleton = variant.skeleton();
            assert_eq!(
                skeleton.matches("Signed:").count(),
                1,
                "{:?} should contain exactly one Signed: marker",
                variant
            );
            assert!(skeleton.contains("{name}"), "{:?} is missing {{name}}", variant);
            assert!(skeleton.contains("{today}"), "{:?} is missing {{today}}", variant);
            assert!(
                skeleton.contains("{nextSessionPlans}"),
                "{:?} is missing {{nextSessionPlans}}",
                variant
            );
        }
    }

    #[test]
    fn test_general_uses_combined_objectives_token() {
        assert!(TemplateVariant::General.skeleton().contains("{tracksAndObjectives}"));
        assert!(!TemplateVariant::General.skeleton().contains("{objectives}"));
        assert!(TemplateVariant::Language.skeleton().contains("{objectives}"));
    }
}
