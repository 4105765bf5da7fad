//! Prompt templates for interpretation and chat

/// Templates for generating prompts sent to language models
pub struct PromptTemplate;

impl PromptTemplate {
    /// Instruction asking the model to turn a free-text query into intent JSON
    pub fn interpretation(user_text: &str) -> String {
        format!(
            r#"Extract the main intent, place type (e.g. cafe, restaurant), and any filters (e.g. rating, price) from this user query. Respond in JSON like: {{"category": "...", "filters": {{"rating_min": 4.5, ...}}}}.
Use a single lowercase noun for the category, or null if the query names no kind of place.
Supported filters are "rating_min" (number), "price_level" (integer 0-4, a maximum) and "open_now" (boolean); omit any the user did not ask for.
Respond with the JSON object only.
User query: "{}""#,
            user_text
        )
    }

    /// System instruction for the travel chat assistant
    pub fn travel_assistant_system() -> &'static str {
        r#"You are a friendly travel assistant helping people discover places to visit, eat and stay.
Answer concisely. When recommending places, mention the neighbourhood or city so the user can look them up.
If you are unsure whether a place still exists or is open, say so."#
    }
}
