use dioxus::prelude::*;
use dioxus_router::Link;
use services::RosterServiceError;

use crate::context::{AppContext, use_current_session};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ClassCardVm, map_class_cards};

#[component]
pub fn ClassesView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let roster = ctx.roster();
    let roster_for_add = ctx.roster();

    let mut form_open = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let mut resource = use_resource(move || {
        let roster = roster.clone();
        async move {
            let classes = roster
                .list_classes()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_class_cards(&classes))
        }
    });
    let state = view_state_from_resource(&resource);

    let on_add = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(signed_in) = session.get() else {
            form_error.set(Some(ViewError::Forbidden.message().to_owned()));
            return;
        };
        let roster = roster_for_add.clone();
        let (new_name, new_description) = (name(), description());
        spawn(async move {
            match roster.add_class(&signed_in, &new_name, &new_description).await {
                Ok(_) => {
                    name.set(String::new());
                    description.set(String::new());
                    form_error.set(None);
                    form_open.set(false);
                    resource.restart();
                }
                Err(RosterServiceError::Forbidden) => {
                    form_error.set(Some(ViewError::Forbidden.message().to_owned()));
                }
                Err(err) => form_error.set(Some(err.to_string())),
            }
        });
    };

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Class Management" }
                button {
                    class: "btn primary",
                    onclick: move |_| form_open.toggle(),
                    "Add New Class"
                }
            }

            if form_open() {
                form { class: "card form", onsubmit: on_add,
                    label { r#for: "class-name", "Class Name" }
                    input {
                        id: "class-name",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                    label { r#for: "class-description", "Description" }
                    textarea {
                        id: "class-description",
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                    if let Some(message) = form_error() {
                        p { class: "error", "{message}" }
                    }
                    div { class: "form-actions",
                        button {
                            class: "btn secondary",
                            r#type: "button",
                            onclick: move |_| form_open.set(false),
                            "Cancel"
                        }
                        button { class: "btn primary", r#type: "submit", "Add Class" }
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    div { class: "card-grid",
                        for card in cards {
                            ClassCard { key: "{card.id}", card }
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
fn ClassCard(card: ClassCardVm) -> Element {
    rsx! {
        div { class: "card class-card",
            h3 { "{card.name}" }
            p { class: "muted", "{card.description}" }
            p { "{card.students_label}" }
            Link {
                class: "btn secondary",
                to: Route::Students { class_id: card.id.value() },
                "View Students"
            }
        }
    }
}
