use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::{QuizDef, QuizId};
use services::{AttemptHandle, AttemptServiceError, AttemptSnapshot};

use crate::context::{AppContext, use_current_session};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{AttemptIntent, AttemptVm, ResultVm};

fn start_error(err: &AttemptServiceError) -> ViewError {
    match err {
        AttemptServiceError::QuizNotFound(_) => ViewError::NotFound,
        AttemptServiceError::NotAStudent => ViewError::Forbidden,
        AttemptServiceError::QuizInactive(_) | AttemptServiceError::Attempt(_) => {
            ViewError::QuizUnavailable
        }
        _ => ViewError::Unknown,
    }
}

#[component]
pub fn TakeQuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let attempts = ctx.attempts();

    let mut handle = use_signal(|| None::<AttemptHandle>);
    let mut quiz = use_signal(|| None::<Arc<QuizDef>>);
    let mut snapshot = use_signal(|| None::<AttemptSnapshot>);
    let mut confirm_open = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    // Start the attempt, then mirror every published snapshot into the view.
    let attempts_for_start = Arc::clone(&attempts);
    use_future(move || {
        let attempts = Arc::clone(&attempts_for_start);
        async move {
            let Some(signed_in) = session.get() else {
                error.set(Some(ViewError::Forbidden));
                return;
            };
            let started = match attempts.start(&signed_in, QuizId::new(quiz_id)).await {
                Ok(started) => started,
                Err(err) => {
                    error.set(Some(start_error(&err)));
                    return;
                }
            };

            let mut updates = started.subscribe();
            quiz.set(Some(started.quiz()));
            snapshot.set(Some(updates.borrow_and_update().clone()));
            handle.set(Some(started));

            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                let completed = next.is_completed();
                snapshot.set(Some(next));
                if completed {
                    break;
                }
            }
        }
    });

    use_drop(move || attempts.discard());

    let dispatch = use_callback(move |intent: AttemptIntent| {
        let Some(current) = handle.peek().clone() else {
            return;
        };
        match intent {
            AttemptIntent::Select(option) => {
                let question = current.snapshot().current_index;
                if current.select_answer(question, option).is_err() {
                    error.set(Some(ViewError::Unknown));
                }
            }
            AttemptIntent::GoTo(index) => {
                current.go_to(index);
            }
            AttemptIntent::Next => {
                current.next();
            }
            AttemptIntent::Previous => {
                current.previous();
            }
            AttemptIntent::RequestSubmit => confirm_open.set(true),
            AttemptIntent::CancelSubmit => confirm_open.set(false),
            AttemptIntent::ConfirmSubmit => {
                confirm_open.set(false);
                spawn(async move {
                    current.submit().await;
                });
            }
        }
    });

    if let Some(err) = error() {
        return rsx! {
            div { class: "page",
                h2 { "Quiz unavailable" }
                p { class: "error", "{err.message()}" }
            }
        };
    }

    let (Some(quiz), Some(snapshot)) = (quiz(), snapshot()) else {
        return rsx! {
            div { class: "page",
                p { "Preparing your quiz..." }
            }
        };
    };

    if let Some(result) = snapshot.result {
        let vm = ResultVm::new(quiz.title(), result, snapshot.submission);
        return rsx! {
            ResultCard { vm }
        };
    }

    let vm = AttemptVm::new(&quiz, &snapshot);
    rsx! {
        AttemptPage { vm, confirm_open: confirm_open(), dispatch }
    }
}

#[component]
fn AttemptPage(vm: AttemptVm, confirm_open: bool, dispatch: Callback<AttemptIntent>) -> Element {
    let timer_class = if vm.low_time { "timer urgent" } else { "timer" };
    let unanswered = vm.palette.len() - vm.answered_count;

    rsx! {
        div { class: "page take-quiz",
            div { class: "quiz-header",
                div {
                    h2 { "{vm.quiz_title}" }
                    p { class: "muted", "{vm.subject}" }
                }
                div { class: timer_class, "{vm.countdown}" }
            }
            div { class: "quiz-progress",
                span { "{vm.position_label}" }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
                }
            }

            div { class: "question card",
                h3 { "{vm.question_text}" }
                div { class: "options",
                    for option in vm.options.iter().cloned() {
                        OptionButton {
                            key: "{option.index}",
                            index: option.index,
                            label: option.label,
                            selected: option.selected,
                            dispatch,
                        }
                    }
                }
            }

            div { class: "quiz-nav",
                button {
                    class: "btn secondary",
                    disabled: !vm.can_go_back,
                    onclick: move |_| dispatch.call(AttemptIntent::Previous),
                    "Previous"
                }
                div { class: "palette",
                    for entry in vm.palette.iter().copied() {
                        button {
                            key: "{entry.index}",
                            class: entry.class(),
                            onclick: move |_| dispatch.call(AttemptIntent::GoTo(entry.index)),
                            "{entry.number}"
                        }
                    }
                }
                if vm.is_last {
                    button {
                        class: "btn primary",
                        onclick: move |_| dispatch.call(AttemptIntent::RequestSubmit),
                        "Submit Quiz"
                    }
                } else {
                    button {
                        class: "btn primary",
                        onclick: move |_| dispatch.call(AttemptIntent::Next),
                        "Next"
                    }
                }
            }

            if confirm_open {
                div { class: "modal-backdrop",
                    div { class: "modal",
                        h3 { "Submit Quiz?" }
                        p {
                            "Are you sure you want to submit your quiz? You won't be able to change your answers after submission."
                        }
                        if unanswered > 0 {
                            p { class: "warning", "{unanswered} question(s) are still unanswered." }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn secondary",
                                onclick: move |_| dispatch.call(AttemptIntent::CancelSubmit),
                                "Continue Quiz"
                            }
                            button {
                                class: "btn primary",
                                onclick: move |_| dispatch.call(AttemptIntent::ConfirmSubmit),
                                "Submit Quiz"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(
    index: usize,
    label: String,
    selected: bool,
    dispatch: Callback<AttemptIntent>,
) -> Element {
    let class = if selected { "option selected" } else { "option" };
    rsx! {
        button {
            class,
            onclick: move |_| dispatch.call(AttemptIntent::Select(index)),
            span { class: "option-marker" }
            span { "{label}" }
        }
    }
}

#[component]
fn ResultCard(vm: ResultVm) -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "page",
            div { class: "card result-card",
                h2 { "{vm.headline}" }
                p { "You have successfully completed {vm.quiz_title}" }
                div { class: "score",
                    div { class: "score-value", "{vm.score_label}" }
                    p { "Your Score" }
                }
                div { class: "stat-grid",
                    div { class: "stat",
                        div { class: "stat-value", "{vm.answered}" }
                        div { "Questions Answered" }
                    }
                    div { class: "stat",
                        div { class: "stat-value", "{vm.correct}" }
                        div { "Correct Answers" }
                    }
                    div { class: "stat",
                        div { class: "stat-value", "{vm.incorrect}" }
                        div { "Incorrect Answers" }
                    }
                }
                button {
                    class: "btn primary",
                    onclick: move |_| {
                        navigator.push(Route::QuizList {});
                    },
                    "Take Another Quiz"
                }
            }
        }
    }
}
