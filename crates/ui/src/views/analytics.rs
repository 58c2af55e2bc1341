use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::StudentId;
use services::AnalyticsError;

use crate::context::{AppContext, use_current_session};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::AnalyticsVm;

fn analytics_error(err: &AnalyticsError) -> ViewError {
    match err {
        AnalyticsError::Forbidden => ViewError::Forbidden,
        AnalyticsError::UnknownStudent => ViewError::NotFound,
        _ => ViewError::Unknown,
    }
}

#[component]
pub fn MyAnalyticsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let analytics = ctx.analytics();

    let resource = use_resource(move || {
        let analytics = analytics.clone();
        let signed_in = session.get();
        async move {
            let signed_in = signed_in.ok_or(ViewError::Forbidden)?;
            let data = analytics
                .for_context(&signed_in)
                .await
                .map_err(|err| analytics_error(&err))?;
            Ok::<_, ViewError>(AnalyticsVm::new(&data))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Performance Analytics" }
                p { "Track your progress and quiz performance" }
            }
            AnalyticsBody { state }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ReportVm {
    heading: String,
    detail: Option<String>,
    class_id: Option<u64>,
    analytics: AnalyticsVm,
}

#[component]
pub fn StudentAnalyticsView(student_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_current_session();
    let analytics = ctx.analytics();

    let resource = use_resource(use_reactive!(|student_id| {
        let analytics = analytics.clone();
        let signed_in = session.get();
        async move {
            let signed_in = signed_in.ok_or(ViewError::Forbidden)?;
            let report = analytics
                .student_report(&signed_in, StudentId::new(student_id))
                .await
                .map_err(|err| analytics_error(&err))?;
            let vm = match &report.student {
                Some(student) => ReportVm {
                    heading: student.name().to_owned(),
                    detail: Some(format!("{} · {}", student.usn(), student.email())),
                    class_id: Some(student.class_id().value()),
                    analytics: AnalyticsVm::new(&report.analytics),
                },
                None => ReportVm {
                    heading: format!("Student #{student_id}"),
                    detail: None,
                    class_id: None,
                    analytics: AnalyticsVm::new(&report.analytics),
                },
            };
            Ok::<_, ViewError>(vm)
        }
    }));

    match view_state_from_resource(&resource) {
        ViewState::Ready(report) => rsx! {
            div { class: "page",
                div { class: "page-header",
                    if let Some(class_id) = report.class_id {
                        Link { to: Route::Students { class_id }, "Back to students" }
                    }
                    h2 { "{report.heading}" }
                    if let Some(detail) = report.detail {
                        p { class: "muted", "{detail}" }
                    }
                }
                AnalyticsBody { state: ViewState::Ready(report.analytics) }
            }
        },
        ViewState::Idle => rsx! {
            div { class: "page", AnalyticsBody { state: ViewState::Idle } }
        },
        ViewState::Loading => rsx! {
            div { class: "page", AnalyticsBody { state: ViewState::Loading } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page", AnalyticsBody { state: ViewState::Error(err) } }
        },
    }
}

#[component]
fn AnalyticsBody(state: ViewState<AnalyticsVm>) -> Element {
    match state {
        ViewState::Idle => rsx! {
            p { "Idle" }
        },
        ViewState::Loading => rsx! {
            p { "Loading analytics..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "error", "{err.message()}" }
        },
        ViewState::Ready(vm) => rsx! {
            AnalyticsPanel { vm }
        },
    }
}

#[component]
fn AnalyticsPanel(vm: AnalyticsVm) -> Element {
    rsx! {
        div { class: "stat-grid",
            StatCard { label: "Average Score", value: vm.average_label.clone() }
            StatCard { label: "Best Score", value: vm.best_label.clone() }
            StatCard { label: "Quizzes Taken", value: vm.quizzes_taken.to_string() }
            StatCard { label: "Time Spent", value: vm.time_spent.clone() }
        }

        div { class: "chart-row",
            div { class: "card chart",
                h3 { "Score Trend" }
                p { class: "muted", "{vm.trend_label}" }
                div { class: "bars",
                    for (i, bar) in vm.score_bars.iter().enumerate() {
                        div { key: "{i}", class: "bar-column",
                            div { class: "bar", style: "height: {bar.height_percent}%" }
                            span { class: "bar-label", "{bar.label}" }
                        }
                    }
                }
            }
            div { class: "card chart",
                h3 { "Overall Performance" }
                match vm.split {
                    Some((correct, incorrect)) => rsx! {
                        div {
                            class: "donut",
                            style: "--correct: {correct}%",
                            span { "{correct}%" }
                        }
                        ul { class: "legend",
                            li { class: "correct", "Correct {correct}%" }
                            li { class: "incorrect", "Incorrect {incorrect}%" }
                        }
                    },
                    None => rsx! {
                        p { class: "muted", "No answers recorded yet." }
                    },
                }
            }
        }

        div { class: "card",
            h3 { "Quiz History" }
            if vm.history.is_empty() {
                p { class: "muted", "No quizzes taken yet." }
            } else {
                table { class: "history",
                    thead {
                        tr {
                            th { "Quiz" }
                            th { "Score" }
                            th { "Time Spent" }
                            th { "Completed" }
                        }
                    }
                    tbody {
                        for (i, row) in vm.history.iter().enumerate() {
                            tr { key: "{i}",
                                td { "{row.quiz_title}" }
                                td { span { class: row.grade_class, "{row.score_label}" } }
                                td { "{row.time_spent}" }
                                td { "{row.completed_on}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "card stat",
            div { class: "stat-label", "{label}" }
            div { class: "stat-value", "{value}" }
        }
    }
}
