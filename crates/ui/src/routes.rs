use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use quiz_core::model::Role;

use crate::context::use_current_session;
use crate::views::{
    ClassesView, CreateQuizView, LandingView, LoginView, MyAnalyticsView, NotFoundView,
    QuizListView, StudentAnalyticsView, StudentsView, TakeQuizView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LandingView)] Landing {},
    #[route("/login", LoginView)] Login {},
    #[layout(Layout)]
        #[route("/student/quiz", QuizListView)] QuizList {},
        #[route("/student/quiz/:quiz_id", TakeQuizView)] TakeQuiz { quiz_id: u64 },
        #[route("/student/analytics", MyAnalyticsView)] MyAnalytics {},
        #[route("/admin/classes", ClassesView)] Classes {},
        #[route("/admin/students/:class_id", StudentsView)] Students { class_id: u64 },
        #[route("/admin/analytics/:student_id", StudentAnalyticsView)] StudentAnalytics { student_id: u64 },
        #[route("/admin/create-quiz", CreateQuizView)] CreateQuiz {},
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

impl Route {
    /// Where a user lands right after signing in.
    #[must_use]
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Student => Self::QuizList {},
            Role::Admin => Self::Classes {},
        }
    }

    /// Role a page is reserved for.
    #[must_use]
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::QuizList {} | Self::TakeQuiz { .. } | Self::MyAnalytics {} => Some(Role::Student),
            Self::Classes {}
            | Self::Students { .. }
            | Self::StudentAnalytics { .. }
            | Self::CreateQuiz {} => Some(Role::Admin),
            Self::Landing {} | Self::Login {} | Self::NotFound { .. } => None,
        }
    }
}

#[component]
fn Layout() -> Element {
    let session = use_current_session();
    let route = use_route::<Route>();

    let allowed = match (route.required_role(), session.role()) {
        (None, _) => true,
        (Some(required), Some(role)) => required == role,
        (Some(_), None) => false,
    };

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                if allowed {
                    Outlet::<Route> {}
                } else {
                    div { class: "page",
                        h2 { "Access denied" }
                        p { "Please sign in with the right account to view this page." }
                        Link { to: Route::Login {}, "Go to login" }
                    }
                }
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let session = use_current_session();
    let navigator = use_navigator();
    let ctx = session.get();

    let on_logout = move |_| {
        session.sign_out();
        navigator.push(Route::Login {});
    };

    rsx! {
        nav { class: "sidebar",
            match ctx.as_ref().map(|c| c.role()) {
                Some(Role::Student) => rsx! {
                    h1 { "Student Portal" }
                    ul {
                        li { Link { to: Route::QuizList {}, "Take Quiz" } }
                        li { Link { to: Route::MyAnalytics {}, "View Analytics" } }
                    }
                },
                Some(Role::Admin) => rsx! {
                    h1 { "Admin Panel" }
                    ul {
                        li { Link { to: Route::Classes {}, "Class Management" } }
                        li { Link { to: Route::CreateQuiz {}, "Create Quiz" } }
                    }
                },
                None => rsx! {
                    h1 { "Quiz Portal" }
                    ul {
                        li { Link { to: Route::Login {}, "Login" } }
                    }
                },
            }
            if let Some(ctx) = ctx {
                div { class: "sidebar-user",
                    p { "{ctx.user().name}" }
                    button { class: "btn secondary", onclick: on_logout, "Logout" }
                }
            }
        }
    }
}
