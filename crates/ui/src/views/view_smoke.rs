use quiz_core::model::Role;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form_and_demo_credentials() {
    let mut harness = setup_view_harness(ViewKind::Login, None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Welcome back"), "missing heading in {html}");
    assert!(html.contains("demo@student.edu"), "missing demo credentials in {html}");
    assert!(!html.contains("Signed in as"), "unexpected session notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_view_smoke_renders_active_quizzes() {
    let mut harness = setup_view_harness(ViewKind::QuizList, Some(Role::Student)).await;
    let html = harness.render_until("Start Quiz").await;
    assert!(html.contains("Introduction to Algorithms"), "missing quiz in {html}");
    assert!(html.contains("Network Security Basics"), "missing quiz in {html}");
    assert!(html.contains("45 minutes"), "missing time limit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn take_quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::TakeQuiz(1), Some(Role::Student)).await;
    let html = harness.render_until("binary search").await;
    assert!(html.contains("Question 1 of 1"), "missing position in {html}");
    assert!(html.contains("30:00"), "missing countdown in {html}");
    assert!(html.contains("O(log n)"), "missing option in {html}");
    assert!(harness.services.attempts().active().is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn take_quiz_view_smoke_rejects_unknown_quiz() {
    let mut harness = setup_view_harness(ViewKind::TakeQuiz(99), Some(Role::Student)).await;
    let html = harness.render_until("Quiz unavailable").await;
    assert!(html.contains("find what you were looking for"), "missing not-found message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn take_quiz_view_smoke_rejects_admins() {
    let mut harness = setup_view_harness(ViewKind::TakeQuiz(1), Some(Role::Admin)).await;
    let html = harness.render_until("Quiz unavailable").await;
    assert!(html.contains("access to this page"), "missing forbidden message in {html}");
    assert!(harness.services.attempts().active().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn my_analytics_view_smoke_renders_dashboard() {
    let mut harness = setup_view_harness(ViewKind::MyAnalytics, Some(Role::Student)).await;
    let html = harness.render_until("Quiz History").await;
    assert!(html.contains("88.5%"), "missing average in {html}");
    assert!(html.contains("92%"), "missing best score in {html}");
    assert!(html.contains("Introduction to Algorithms"), "missing history row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn student_analytics_view_smoke_renders_report_for_admin() {
    let mut harness =
        setup_view_harness(ViewKind::StudentAnalytics(1), Some(Role::Admin)).await;
    let html = harness.render_until("Alex Johnson").await;
    assert!(html.contains("CS21001"), "missing usn in {html}");
    assert!(html.contains("Average Score"), "missing stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn classes_view_smoke_renders_cards_with_counts() {
    let mut harness = setup_view_harness(ViewKind::Classes, Some(Role::Admin)).await;
    let html = harness.render_until("View Students").await;
    assert!(html.contains("Information Science"), "missing class in {html}");
    assert!(html.contains("3 students"), "missing count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn students_view_smoke_renders_roster() {
    let mut harness = setup_view_harness(ViewKind::Students(2), Some(Role::Admin)).await;
    let html = harness.render_until("Student List").await;
    assert!(html.contains("Emily Wilson"), "missing student in {html}");
    assert!(!html.contains("Alex Johnson"), "student from another class in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn create_quiz_view_smoke_renders_builder() {
    let mut harness = setup_view_harness(ViewKind::CreateQuiz, Some(Role::Admin)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Generate Questions"), "missing generator in {html}");
    assert!(html.contains("Publish Quiz"), "missing publish button in {html}");
}
