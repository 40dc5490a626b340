// src/models/question_set.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::schema::{
    ALTERNATE_ANSWERS, ANSWERS, EXPLANATION, LEADING_SENTENCE, QUESTIONS, REQUIRED_KEYS, THEME,
};

/// One generated quiz: a leading passage, questions with their answers,
/// optional alternate answers, an explanation and a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionSet {
    #[serde(rename = "Leading Sentence")]
    pub leading_sentence: String,

    #[serde(rename = "Questions")]
    pub questions: Vec<String>,

    /// `answers[i]` answers `questions[i]`.
    #[serde(rename = "Answers")]
    pub answers: Vec<String>,

    /// Distractors or related terms, aligned by index when present.
    #[serde(
        rename = "different_answers",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alternate_answers: Option<Vec<String>>,

    #[serde(rename = "Explanation")]
    pub explanation: String,

    #[serde(rename = "Theme")]
    pub theme: String,
}

/// Reasons a decoded payload is not a usable `QuestionSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    NotAnObject,
    /// Every required key that is absent or null.
    MissingKeys(Vec<&'static str>),
    NotArray {
        key: &'static str,
    },
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::NotAnObject => {
                write!(f, "Invalid data structure received from backend: expected a JSON object.")
            }
            ShapeError::MissingKeys(keys) => write!(
                f,
                "Invalid data structure received from backend. Missing or invalid keys: {}",
                keys.join(", ")
            ),
            ShapeError::NotArray { key } => write!(
                f,
                "Invalid data structure from backend: \"{}\" must be an array.",
                key
            ),
            ShapeError::WrongType { key, expected } => write!(
                f,
                "Invalid data structure from backend: \"{}\" must be {}.",
                key, expected
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

impl QuestionSet {
    /// Validates a decoded payload and builds the question set.
    ///
    /// Lenient on two points: a question/answer count mismatch is only
    /// logged, and a malformed `different_answers` field is dropped.
    pub fn from_json_value(value: Value) -> Result<Self, ShapeError> {
        let Value::Object(mut map) = value else {
            return Err(ShapeError::NotAnObject);
        };

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| map.get(*key).is_none_or(Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(ShapeError::MissingKeys(missing));
        }

        if let Some(key) = [QUESTIONS, ANSWERS]
            .into_iter()
            .find(|key| !map[*key].is_array())
        {
            return Err(ShapeError::NotArray { key });
        }

        let set = QuestionSet {
            leading_sentence: take_string(&mut map, LEADING_SENTENCE)?,
            questions: take_strings(&mut map, QUESTIONS)?,
            answers: take_strings(&mut map, ANSWERS)?,
            alternate_answers: take_alternates(&mut map),
            explanation: take_string(&mut map, EXPLANATION)?,
            theme: take_string(&mut map, THEME)?,
        };

        if set.questions.len() != set.answers.len() {
            tracing::warn!(
                "Number of questions ({}) and answers ({}) do not match",
                set.questions.len(),
                set.answers.len()
            );
        }

        Ok(set)
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    /// Alternate answer at `index`, only when present and non-empty.
    pub fn alternate_answer(&self, index: usize) -> Option<&str> {
        self.alternate_answers
            .as_ref()
            .and_then(|alts| alts.get(index))
            .map(String::as_str)
            .filter(|alt| !alt.trim().is_empty())
    }
}

fn take_string(map: &mut Map<String, Value>, key: &'static str) -> Result<String, ShapeError> {
    match map.remove(key) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(ShapeError::WrongType {
            key,
            expected: "a string",
        }),
    }
}

fn take_strings(map: &mut Map<String, Value>, key: &'static str) -> Result<Vec<String>, ShapeError> {
    let Some(Value::Array(items)) = map.remove(key) else {
        return Err(ShapeError::NotArray { key });
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(ShapeError::WrongType {
                key,
                expected: "an array of strings",
            }),
        })
        .collect()
}

fn take_alternates(map: &mut Map<String, Value>) -> Option<Vec<String>> {
    match map.remove(ALTERNATE_ANSWERS)? {
        Value::Null => None,
        Value::Array(items) => {
            let alternates: Option<Vec<String>> = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            if alternates.is_none() {
                tracing::warn!("'{}' contains non-string items. Ignoring.", ALTERNATE_ANSWERS);
            }
            alternates
        }
        other => {
            tracing::warn!(
                "'{}' is present but not an array ({}). Ignoring.",
                ALTERNATE_ANSWERS,
                other
            );
            None
        }
    }
}
