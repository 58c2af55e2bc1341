use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::ClassId;
use services::{NewStudent, RosterServiceError};

use crate::context::{AppContext, use_current_session};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudentRowVm, map_student_rows};

#[derive(Clone, Debug, PartialEq)]
struct ClassRosterVm {
    class_name: String,
    students: Vec<StudentRowVm>,
}

#[component]
pub fn StudentsView(class_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let roster = ctx.roster();
    let roster_for_add = ctx.roster();

    let mut form_open = use_signal(|| false);
    let mut usn = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let mut resource = use_resource(use_reactive!(|class_id| {
        let roster = roster.clone();
        async move {
            let (class, students) = roster
                .class_roster(ClassId::new(class_id))
                .await
                .map_err(|err| match err {
                    RosterServiceError::UnknownClass => ViewError::NotFound,
                    _ => ViewError::Unknown,
                })?;
            Ok::<_, ViewError>(ClassRosterVm {
                class_name: class.name().to_owned(),
                students: map_student_rows(&students),
            })
        }
    }));
    let state = view_state_from_resource(&resource);

    let on_add = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(signed_in) = session.get() else {
            form_error.set(Some(ViewError::Forbidden.message().to_owned()));
            return;
        };
        let roster = roster_for_add.clone();
        let form = NewStudent {
            usn: usn(),
            name: name(),
            email: email(),
        };
        spawn(async move {
            match roster
                .add_student(&signed_in, ClassId::new(class_id), &form)
                .await
            {
                Ok(_) => {
                    usn.set(String::new());
                    name.set(String::new());
                    email.set(String::new());
                    form_error.set(None);
                    form_open.set(false);
                    resource.restart();
                }
                Err(RosterServiceError::DuplicateUsn(taken)) => {
                    form_error.set(Some(format!("USN {taken} is already enrolled.")));
                }
                Err(err) => form_error.set(Some(err.to_string())),
            }
        });
    };

    rsx! {
        div { class: "page",
            Link { to: Route::Classes {}, "Back to classes" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(vm) => rsx! {
                    div { class: "page-header",
                        div {
                            h2 { "Student List" }
                            p { class: "muted", "{vm.class_name}" }
                        }
                        button {
                            class: "btn primary",
                            onclick: move |_| form_open.toggle(),
                            "Add Student"
                        }
                    }

                    if form_open() {
                        form { class: "card form", onsubmit: on_add,
                            label { r#for: "student-usn", "USN" }
                            input {
                                id: "student-usn",
                                value: "{usn}",
                                oninput: move |evt| usn.set(evt.value()),
                            }
                            label { r#for: "student-name", "Name" }
                            input {
                                id: "student-name",
                                value: "{name}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                            label { r#for: "student-email", "Email" }
                            input {
                                id: "student-email",
                                r#type: "email",
                                value: "{email}",
                                oninput: move |evt| email.set(evt.value()),
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
                                button { class: "btn primary", r#type: "submit", "Add Student" }
                            }
                        }
                    }

                    if vm.students.is_empty() {
                        p { class: "muted", "No students enrolled yet." }
                    } else {
                        table { class: "roster",
                            thead {
                                tr {
                                    th { "USN" }
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Actions" }
                                }
                            }
                            tbody {
                                for row in vm.students {
                                    tr { key: "{row.id}",
                                        td { "{row.usn}" }
                                        td { "{row.name}" }
                                        td { "{row.email}" }
                                        td {
                                            Link {
                                                to: Route::StudentAnalytics {
                                                    student_id: row.id.value(),
                                                },
                                                "View Analytics"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
