// src/models/schema.rs

//! Shape of a generated question set, shared by the provider request and
//! the local validators.

use std::sync::LazyLock;

use serde_json::{Value, json};

pub const LEADING_SENTENCE: &str = "Leading Sentence";
pub const QUESTIONS: &str = "Questions";
pub const ANSWERS: &str = "Answers";
pub const ALTERNATE_ANSWERS: &str = "different_answers";
pub const EXPLANATION: &str = "Explanation";
pub const THEME: &str = "Theme";

/// Keys that must be present and non-null.
pub const REQUIRED_KEYS: [&str; 5] = [LEADING_SENTENCE, QUESTIONS, ANSWERS, EXPLANATION, THEME];

/// Schema descriptor passed to the provider as `responseSchema`.
pub static QUESTION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            LEADING_SENTENCE: { "type": "string" },
            QUESTIONS: { "type": "array", "items": { "type": "string" } },
            ANSWERS: { "type": "array", "items": { "type": "string" } },
            ALTERNATE_ANSWERS: { "type": "array", "items": { "type": "string" } },
            EXPLANATION: { "type": "string" },
            THEME: { "type": "string" },
        },
        "required": REQUIRED_KEYS,
    })
});

/// Fixed instruction sent on every generation. Callers cannot alter it.
pub static GENERATION_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let schema = serde_json::to_string_pretty(&*QUESTION_SCHEMA).unwrap_or_default();
    format!(
        "You are an expert in world history. Following the JSON schema below, generate one set of \
short-answer world-history questions at the level of a University of Tokyo entrance examination.

Schema:
{schema}

Content to generate:
1. Leading Sentence: a short passage that sets up the questions.
2. Questions: several specific questions related to the leading sentence.
3. Answers: the correct answer to each question, exactly as many as there are questions.
4. different_answers: distractors or related alternative keywords (optional), as many as there \
are questions. An empty array is acceptable if they are hard to produce.
5. Explanation: a detailed explanation of the background of the set and the reasoning behind each answer.
6. Theme: the main historical theme, period or region the set covers.

Notes:
- The number of questions and answers must match.
- Keep the content academic, with difficulty and quality worthy of the entrance exam.
- Always produce the leading sentence, questions, answers, explanation and theme.
- Output JSON that strictly follows the schema."
    )
});
