use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{PortalSettings, Role, SessionContext};
use quiz_core::time::fixed_clock;
use services::PortalServices;

use crate::context::{UiApp, build_app_context, provide_current_session};
use crate::views::{
    ClassesView, CreateQuizView, LoginView, MyAnalyticsView, QuizListView, StudentAnalyticsView,
    StudentsView, TakeQuizView,
};

#[derive(Clone)]
struct TestApp {
    services: PortalServices,
    session: Option<SessionContext>,
}

impl UiApp for TestApp {
    fn services(&self) -> PortalServices {
        self.services.clone()
    }

    fn initial_session(&self) -> Option<SessionContext> {
        self.session.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    QuizList,
    TakeQuiz(u64),
    MyAnalytics,
    StudentAnalytics(u64),
    Classes,
    Students(u64),
    CreateQuiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { SessionScope {} }
}

#[component]
fn SessionScope() -> Element {
    provide_current_session();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::QuizList => rsx! { QuizListView {} },
        ViewKind::TakeQuiz(quiz_id) => rsx! { TakeQuizView { quiz_id } },
        ViewKind::MyAnalytics => rsx! { MyAnalyticsView {} },
        ViewKind::StudentAnalytics(student_id) => rsx! { StudentAnalyticsView { student_id } },
        ViewKind::Classes => rsx! { ClassesView {} },
        ViewKind::Students(class_id) => rsx! { StudentsView { class_id } },
        ViewKind::CreateQuiz => rsx! { CreateQuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: PortalServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then keep polling until `needle` shows up or the budget runs out.
    pub async fn render_until(&mut self, needle: &str) -> String {
        self.rebuild();
        for _ in 0..10 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Mount `view` over the demo data, signed in as `role` when given.
pub async fn setup_view_harness(view: ViewKind, role: Option<Role>) -> ViewHarness {
    let settings = PortalSettings::default();
    let services = PortalServices::demo(fixed_clock(), settings.clone()).expect("demo services");

    let session = match role {
        Some(role) => {
            let account = settings
                .demo_accounts()
                .iter()
                .find(|account| account.user.role == role)
                .expect("demo account for role");
            Some(
                services
                    .auth()
                    .login(&account.email, &account.password, role)
                    .await
                    .expect("demo login"),
            )
        }
        None => None,
    };

    let app = Arc::new(TestApp {
        services: services.clone(),
        session,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
