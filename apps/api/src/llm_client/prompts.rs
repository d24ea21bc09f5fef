// Shared prompt fragments.
// Each AI function defines its own templates in analysis/prompts.rs.

/// Appended to every system prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a JSON-only system prompt from a persona sentence.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_appends_instruction() {
        let system = json_system("You are an expert HR recruiter.");
        assert!(system.starts_with("You are an expert HR recruiter."));
        assert!(system.ends_with("apologies."));
    }
}
