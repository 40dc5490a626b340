use maud::{Markup, html};

use super::{layout, question::question_view};
use crate::{
    client::{Shell, ShellState},
    models::generation::ModelTier,
};

// Disables the button as soon as the form is submitted.
const BUSY_ON_SUBMIT: &str = "const b = this.querySelector('button'); b.disabled = true; \
b.setAttribute('aria-busy', 'true'); b.textContent = 'Generating...';";

pub fn page(shell: &Shell) -> Markup {
    layout::page(html! {
        section style="text-align: center;" {
            h1 { "Generate a new question set" }
            p {
                "Press the button to have a language model write a set of world-history "
                "short-answer questions."
            }
            (model_form(shell))
        }
        (state_view(shell.state()))
    })
}

fn model_form(shell: &Shell) -> Markup {
    let loading = shell.is_loading();
    html! {
        form method="post" action="/" onsubmit=(BUSY_ON_SUBMIT) {
            fieldset {
                legend { "Model" }
                @for tier in ModelTier::ALL {
                    label {
                        input type="radio" name="model" value=(tier.model_id())
                            checked[tier == shell.model()];
                        (tier.label())
                    }
                }
            }
            button type="submit" disabled[loading] aria-busy=[loading.then_some("true")] {
                @if loading { "Generating..." } @else { "Generate questions" }
            }
        }
    }
}

fn state_view(state: &ShellState) -> Markup {
    match state {
        ShellState::Idle => html! {},
        ShellState::Loading => html! {
            p aria-busy="true" { "Generating..." }
        },
        ShellState::Error(message) => html! {
            article.error role="alert" style="border-left: 4px solid var(--pico-del-color);" {
                (message)
            }
        },
        ShellState::Success { set, reveal } => question_view(set, reveal),
    }
}
