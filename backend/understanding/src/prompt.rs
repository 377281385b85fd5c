//! Prompt builder for item-spotting requests.
//!
//! The prompt pins the model to a three-section grammar that
//! [`crate::parser`] knows how to read back.

/// Output grammar appended to every prompt.
pub const FORMAT_INSTRUCTIONS: &str = "Present your findings using the following exact headers and format for each category if items are found (omit category if no items):\n\
**Found Items:**\n* [item_name_1] (optional brief detail)\n* [item_name_2]\n...\n\
**Maybe Found Item:**\n* [item_name_3] (optional brief detail)\n...\n\
**Not Found Item:**\n* [item_name_4]\n...\n\
List each item on a new line, prefixed with '* '. Do not add any other comments or explanations outside of the optional brief detail in parentheses for an item. If no items are found for a category, omit the header for that category entirely.";

const PREAMBLE: &str = "Analyze the provided image. ";

const OPEN_SEARCH: &str = "Analyze the image for any notable items. ";

/// Build the instruction text sent alongside the image.
///
/// With targets, the model is told to look for those items only; otherwise it
/// reports anything notable.
pub fn build_prompt(targets: &[String]) -> String {
    let mut prompt = String::from(PREAMBLE);
    if targets.is_empty() {
        prompt.push_str(OPEN_SEARCH);
    } else {
        prompt.push_str(&format!(
            "You are tasked with finding *only* the following specific items in the image: {}. Do not identify or list any other items. ",
            targets.join(", ")
        ));
    }
    prompt.push_str(FORMAT_INSTRUCTIONS);
    prompt
}
