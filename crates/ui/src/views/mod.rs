mod analytics;
mod classes;
mod create_quiz;
mod login;
mod not_found;
mod quiz_list;
mod state;
mod students;
mod take_quiz;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use analytics::{MyAnalyticsView, StudentAnalyticsView};
pub use classes::ClassesView;
pub use create_quiz::CreateQuizView;
pub use login::{LandingView, LoginView};
pub use not_found::NotFoundView;
pub use quiz_list::QuizListView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use students::StudentsView;
pub use take_quiz::TakeQuizView;
