// src/handlers/page.rs

use axum::{Form, extract::State};
use maud::Markup;
use serde::Deserialize;

use crate::{
    client::{QuestionClient, Shell},
    models::generation::ModelTier,
    views,
};

/// Form posted by the generate button.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub model: ModelTier,
}

/// Renders the shell in its idle state.
pub async fn index() -> Markup {
    views::shell::page(&Shell::default())
}

/// Runs one generation through the fetch client and renders the outcome.
///
/// The page keeps no state between requests; a new submission starts from
/// scratch and the previous question set is gone.
pub async fn generate_page(
    State(client): State<QuestionClient>,
    Form(form): Form<GenerateForm>,
) -> Markup {
    let mut shell = Shell::new(form.model);
    shell.generate(&client).await;
    views::shell::page(&shell)
}
