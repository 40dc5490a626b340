use maud::{Markup, html};

use crate::{client::RevealState, models::question_set::QuestionSet};

/// Renders a question set. Each row is a toggle whose open state comes
/// from `reveal`; the answer sits inside it.
pub fn question_view(set: &QuestionSet, reveal: &RevealState) -> Markup {
    html! {
        article.question-set {
            header {
                mark { "Theme: " (set.theme) }
            }

            h3 { "Leading Sentence" }
            p.pre-wrap { (set.leading_sentence) }

            hr;

            h3 { "Questions and Answers" }
            @for (index, question) in set.questions.iter().enumerate() {
                (question_row(set, reveal, index, question))
            }

            hr;

            h3 { "Explanation" }
            p.pre-wrap { (set.explanation) }
        }
    }
}

fn question_row(set: &QuestionSet, reveal: &RevealState, index: usize, question: &str) -> Markup {
    html! {
        details.question data-index=(index) open[reveal.is_revealed(index)] {
            summary { "Q" (index + 1) ": " (question) }
            p.answer {
                strong { "Answer: " (set.answer(index).unwrap_or("(no answer provided)")) }
            }
            @if let Some(alternate) = set.alternate_answer(index) {
                p.alternate { "(Alternate / related: " (alternate) ")" }
            }
        }
    }
}
