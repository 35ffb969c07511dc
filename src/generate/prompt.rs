/// Assemble the single prompt sent to the generative model.
///
/// The instruction block pins down everything the output contract depends
/// on: dialogue labelling, no invented clinical content, verbatim
/// preservation of the therapist's pre-filled sections, and a JSON-only
/// response shape.
pub fn build_prompt(resolved_template: &str, transcript: &str) -> String {
    format!(
        "You are a clinical documentation assistant for a speech-language therapy practice.\n\
         Below are a clinical note template and the raw transcript of one therapy session.\n\
         \n\
         Tasks:\n\
         1. Rewrite the transcript as a dialogue, labelling every line with its speaker. \
         Infer who is speaking (for example Therapist, Parent, Child) from context.\n\
         2. Complete the template using only events that actually occur in the transcript. \
         Do not invent activities, outcomes, or scores.\n\
         3. For the Session Type line, choose Face-to-face or Online and am or pm based on \
         the transcript; if it does not say, keep the line as written.\n\
         4. Keep the pre-filled Session Objectives and Next Session lines exactly as written.\n\
         5. Respond with a single JSON object and nothing else, in exactly this shape:\n\
         {{\"formattedConversation\": \"<the speaker-labelled dialogue>\", \
         \"summary\": \"<the completed clinical note>\"}}\n\
         \n\
         Template:\n\
         {resolved_template}\n\
         \n\
         Transcript:\n\
         {transcript}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_template_and_transcript() {
        let prompt = build_prompt("NOTE SKELETON", "raw session audio text");
        assert!(prompt.contains("NOTE SKELETON"));
        assert!(prompt.contains("raw session audio text"));
        let template_at = prompt.find("NOTE SKELETON").unwrap();
        let transcript_at = prompt.find("raw session audio text").unwrap();
        assert!(template_at < transcript_at);
    }

    #[test]
    fn test_prompt_names_both_contract_fields() {
        let prompt = build_prompt("t", "x");
        assert!(prompt.contains("\"formattedConversation\""));
        assert!(prompt.contains("\"summary\""));
    }
}
