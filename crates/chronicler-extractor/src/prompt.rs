//! LLM prompt construction for structured extraction

/// System instructions for the extraction call.
///
/// The schema itself travels in the request's response-format constraint;
/// these instructions only set the task and the register of each field.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are a technology historian. Extract information about the single \
technology topic described by the article text and structure it exactly \
according to the provided schema.

Guidance:
- topic_id is the canonical name of the topic, not the article headline
- summary covers purpose and scope in a few sentences
- evolution_timeline is chronological, with dated milestones where the text gives them
- key_innovations and major_contributors stay grounded in the text, no outside knowledge
- main_techniques and applications are short noun phrases, most significant first";

/// Build the user message for an extraction call.
pub fn extraction_user_prompt(content: &str) -> String {
    format!(
        "Extract and analyze technology topic data from:\n\n{}",
        content
    )
}
