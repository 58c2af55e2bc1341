use dioxus::prelude::*;
use services::AuthoringError;

use crate::context::{AppContext, use_current_session};
use crate::views::ViewError;
use crate::vm::QuizBuilderVm;

const DEFAULT_GENERATED: usize = 5;

#[derive(Clone, Debug, PartialEq)]
enum PublishStatus {
    Editing,
    Publishing,
    Published(String),
    Failed(String),
}

#[component]
pub fn CreateQuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let authoring = ctx.authoring();
    let generator = ctx.authoring();

    let mut builder = use_signal(QuizBuilderVm::default);
    let mut topic = use_signal(String::new);
    let mut generate_count = use_signal(|| DEFAULT_GENERATED);
    let mut generating = use_signal(|| false);
    let mut status = use_signal(|| PublishStatus::Editing);

    let on_generate = move |_| {
        if generating() {
            return;
        }
        let generator = generator.clone();
        let (topic, count) = (topic(), generate_count());
        generating.set(true);
        spawn(async move {
            let questions = generator.generate(&topic, count).await;
            builder.write().replace_questions(questions);
            generating.set(false);
        });
    };

    let on_publish = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(signed_in) = session.get() else {
            status.set(PublishStatus::Failed(ViewError::Forbidden.message().to_owned()));
            return;
        };
        let authoring = authoring.clone();
        let draft = builder.read().draft().clone();
        status.set(PublishStatus::Publishing);
        spawn(async move {
            match authoring.publish(&signed_in, &draft).await {
                Ok(quiz) => {
                    builder.write().reset();
                    status.set(PublishStatus::Published(quiz.title().to_owned()));
                }
                Err(AuthoringError::Forbidden) => status.set(PublishStatus::Failed(
                    ViewError::Forbidden.message().to_owned(),
                )),
                Err(err) => status.set(PublishStatus::Failed(err.to_string())),
            }
        });
    };

    let draft = builder.read().draft().clone();
    let publishing = status() == PublishStatus::Publishing;

    rsx! {
        div { class: "page create-quiz",
            div { class: "page-header",
                h2 { "Create Quiz" }
                p { "Build a quiz by hand or start from suggested questions" }
            }

            div { class: "card generator",
                h3 { "Generate Questions" }
                label { r#for: "generate-topic", "Topic" }
                input {
                    id: "generate-topic",
                    value: "{topic}",
                    placeholder: "e.g. Machine Learning",
                    oninput: move |evt| topic.set(evt.value()),
                }
                label { r#for: "generate-count", "Number of questions" }
                input {
                    id: "generate-count",
                    r#type: "number",
                    min: "1",
                    value: "{generate_count}",
                    oninput: move |evt| {
                        if let Ok(count) = evt.value().trim().parse::<usize>() {
                            generate_count.set(count.max(1));
                        }
                    },
                }
                button {
                    class: "btn secondary",
                    disabled: generating(),
                    onclick: on_generate,
                    if generating() { "Generating..." } else { "Generate" }
                }
            }

            form { class: "card form", onsubmit: on_publish,
                label { r#for: "quiz-title", "Quiz Title" }
                input {
                    id: "quiz-title",
                    value: "{draft.title}",
                    oninput: move |evt| builder.write().set_title(evt.value()),
                }
                label { r#for: "quiz-subject", "Subject" }
                input {
                    id: "quiz-subject",
                    value: "{draft.subject}",
                    oninput: move |evt| builder.write().set_subject(evt.value()),
                }
                label { r#for: "quiz-time", "Time Limit (minutes)" }
                input {
                    id: "quiz-time",
                    r#type: "number",
                    min: "1",
                    value: "{draft.time_limit_minutes}",
                    oninput: move |evt| builder.write().set_time_limit(&evt.value()),
                }

                for (q, question) in draft.questions.iter().cloned().enumerate() {
                    div { key: "{q}", class: "question-editor",
                        div { class: "question-editor-header",
                            h4 { "Question {q + 1}" }
                            button {
                                class: "btn danger",
                                r#type: "button",
                                onclick: move |_| builder.write().remove_question(q),
                                "Remove"
                            }
                        }
                        textarea {
                            value: "{question.text}",
                            placeholder: "Question text",
                            oninput: move |evt| builder.write().set_question_text(q, evt.value()),
                        }
                        for (o, option) in question.options.iter().cloned().enumerate() {
                            div { key: "{o}", class: "option-editor",
                                input {
                                    r#type: "radio",
                                    name: "correct-{q}",
                                    checked: question.correct_option == o,
                                    onchange: move |_| builder.write().set_correct(q, o),
                                }
                                input {
                                    value: "{option}",
                                    placeholder: "Option {o + 1}",
                                    oninput: move |evt| builder.write().set_option(q, o, evt.value()),
                                }
                                button {
                                    class: "btn link",
                                    r#type: "button",
                                    onclick: move |_| builder.write().remove_option(q, o),
                                    "×"
                                }
                            }
                        }
                        button {
                            class: "btn link",
                            r#type: "button",
                            onclick: move |_| builder.write().add_option(q),
                            "Add Option"
                        }
                        textarea {
                            value: question.explanation.clone().unwrap_or_default(),
                            placeholder: "Explanation (optional)",
                            oninput: move |evt| builder.write().set_explanation(q, evt.value()),
                        }
                    }
                }

                button {
                    class: "btn secondary",
                    r#type: "button",
                    onclick: move |_| builder.write().add_blank_question(),
                    "Add Question"
                }

                match status() {
                    PublishStatus::Published(title) => rsx! {
                        p { class: "success", "Published \"{title}\"." }
                    },
                    PublishStatus::Failed(message) => rsx! {
                        p { class: "error", "{message}" }
                    },
                    PublishStatus::Editing | PublishStatus::Publishing => rsx! {},
                }

                button {
                    class: "btn primary",
                    r#type: "submit",
                    disabled: publishing,
                    if publishing { "Publishing..." } else { "Publish Quiz" }
                }
            }
        }
    }
}
