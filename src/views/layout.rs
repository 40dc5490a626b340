use maud::{DOCTYPE, Markup, html};

pub const APP_TITLE: &str = "World History Question Generator";

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        style {
            ".pre-wrap { white-space: pre-wrap; } "
            ".alternate { padding-left: 2rem; color: var(--pico-muted-color); }"
        }
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li { a href="/" { strong { (APP_TITLE) } } }
                }
                ul {
                    li."secondary" { (env!("CARGO_PKG_VERSION")) }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer style="text-align: center;" {
            small { "Questions are generated by a language model and may contain mistakes." }
        }
    }
}

pub fn page(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                (css())
                title { (APP_TITLE) }
            }
            body."container" {
                (header())
                main { (body) }
                (footer())
            }
        }
    }
}
