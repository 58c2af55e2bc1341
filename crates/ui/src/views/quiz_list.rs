use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizCardVm, map_quiz_cards};

#[component]
pub fn QuizListView() -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempts();

    let resource = use_resource(move || {
        let attempts = attempts.clone();
        async move {
            let quizzes = attempts
                .list_available()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_quiz_cards(&quizzes))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Available Quizzes" }
                p { "Select a quiz to begin" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No quizzes are open right now." }
                    } else {
                        div { class: "card-grid",
                            for card in cards {
                                QuizCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm) -> Element {
    rsx! {
        div { class: "card quiz-card",
            span { class: "badge", "Active" }
            h3 { "{card.title}" }
            p { class: "muted", "{card.subject}" }
            dl {
                dt { "Questions:" }
                dd { "{card.question_count}" }
                dt { "Time Limit:" }
                dd { "{card.time_limit_label}" }
            }
            Link {
                class: "btn primary",
                to: Route::TakeQuiz { quiz_id: card.id.value() },
                "Start Quiz"
            }
        }
    }
}
