use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::Role;
use services::AuthError;

use crate::context::{AppContext, use_current_session};
use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginStatus {
    Idle,
    Submitting,
    Failed(ViewError),
}

#[component]
pub fn LandingView() -> Element {
    rsx! {
        div { class: "landing",
            header { class: "landing-header",
                h1 { "Riverside University Quiz Portal" }
                p { "Timed quizzes, instant scores and progress analytics for every class." }
            }
            section { class: "landing-cta",
                Link { class: "btn primary", to: Route::Login {}, "Sign in" }
            }
        }
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut status = use_signal(|| LoginStatus::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if status() == LoginStatus::Submitting {
            return;
        }
        let auth = auth.clone();
        let email = email();
        let password = password();
        let role = role();
        status.set(LoginStatus::Submitting);
        spawn(async move {
            match auth.login(&email, &password, role).await {
                Ok(signed_in) => {
                    status.set(LoginStatus::Idle);
                    session.sign_in(signed_in);
                    navigator.push(Route::home_for(role));
                }
                Err(AuthError::InvalidCredentials) => {
                    status.set(LoginStatus::Failed(ViewError::InvalidCredentials));
                }
                Err(_) => status.set(LoginStatus::Failed(ViewError::Unknown)),
            }
        });
    };

    let submitting = status() == LoginStatus::Submitting;

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                h2 { "Welcome back" }
                p { class: "muted", "Sign in to continue to the portal" }

                if let Some(current) = session.get() {
                    div { class: "notice",
                        "Signed in as {current.user().name}. "
                        Link { to: Route::home_for(current.role()), "Continue" }
                    }
                }

                form { onsubmit: on_submit,
                    label { r#for: "login-role", "Role" }
                    select {
                        id: "login-role",
                        value: "{role}",
                        onchange: move |evt| {
                            if let Ok(parsed) = evt.value().parse::<Role>() {
                                role.set(parsed);
                            }
                        },
                        option { value: "student", "Student" }
                        option { value: "admin", "Admin" }
                    }

                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        r#type: "email",
                        value: "{email}",
                        placeholder: "you@university.edu",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { r#for: "login-password", "Password" }
                    input {
                        id: "login-password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }

                    button {
                        class: "btn primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Signing in..." } else { "Sign in" }
                    }
                }

                if let LoginStatus::Failed(err) = status() {
                    p { class: "error", "{err.message()}" }
                }

                div { class: "demo-credentials",
                    h4 { "Demo credentials" }
                    p { "Student: demo@student.edu / student123" }
                    p { "Admin: admin@riverside.edu / admin123" }
                }
            }
        }
    }
}
