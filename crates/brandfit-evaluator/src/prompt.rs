//! Prompt text sent to the chat model.

use crate::types::EvaluationRequest;

pub const SYSTEM_PROMPT: &str = "You are an AI agent specialized in determining advertising suitability. \
You have in-depth knowledge of influencer marketing and brand advertising criteria. \
Given details about an influencer and a brand, you must evaluate how suitable the influencer is for advertising that brand. \
Your response must be strictly formatted as JSON with exactly two keys: 'score' and 'reason'.";

/// Build the user message for one evaluation.
#[must_use]
pub fn user_prompt(request: &EvaluationRequest<'_>) -> String {
    format!(
        "Influencer Information:
Name of Influencer: {influencer}
Wikipedia of Influencer: {wikipedia}
Other Updates of Influencer: {updates}
---
Brand Information:
Brand Name: {brand}
Brand Criteria for Ad Model: {criteria}
---
Instructions:
1. Assess the influencer's overall suitability for the brand based on the information provided.
2. Provide a \"score\" between 0.000 and 1.000 (inclusive), formatted as a float with exactly three decimal places.
   A score of 1.000 indicates exceptional suitability, while 0.000 indicates unsuitability.
3. Provide a brief explanation (one or two sentences) as \"reason\", highlighting key points that influenced your evaluation.
4. Output your response strictly as a JSON object, exactly in the following format:
   {{
       \"score\": 0.XXX,
       \"reason\": \"Your brief explanation here.\"
   }}
5. Do not include any additional text, commentary, or formatting outside of the JSON object.
",
        influencer = request.influencer,
        wikipedia = request.wikipedia_corpus,
        updates = request.updates_corpus,
        brand = request.brand,
        criteria = request.criteria.trim_end(),
    )
}
