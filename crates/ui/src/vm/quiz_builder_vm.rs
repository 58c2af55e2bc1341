use quiz_core::model::quiz::MIN_OPTIONS;
use quiz_core::model::{QuestionDraft, QuizDraft};

/// Editing operations behind the create-quiz form.
///
/// Operations addressing a question or option that does not exist are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizBuilderVm {
    draft: QuizDraft,
}

impl QuizBuilderVm {
    #[must_use]
    pub fn draft(&self) -> &QuizDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_subject(&mut self, subject: String) {
        self.draft.subject = subject;
    }

    /// Parse the minutes field; non-numeric input leaves the limit unchanged.
    pub fn set_time_limit(&mut self, raw: &str) {
        if let Ok(minutes) = raw.trim().parse::<u32>() {
            self.draft.time_limit_minutes = minutes;
        }
    }

    pub fn add_blank_question(&mut self) {
        self.draft.questions.push(QuestionDraft::blank());
    }

    /// Replace the question list with generated suggestions.
    pub fn replace_questions(&mut self, questions: Vec<QuestionDraft>) {
        self.draft.questions = questions;
    }

    pub fn remove_question(&mut self, index: usize) {
        if index < self.draft.questions.len() {
            self.draft.questions.remove(index);
        }
    }

    pub fn set_question_text(&mut self, index: usize, text: String) {
        if let Some(question) = self.draft.questions.get_mut(index) {
            question.text = text;
        }
    }

    pub fn set_option(&mut self, question: usize, option: usize, text: String) {
        if let Some(slot) = self
            .draft
            .questions
            .get_mut(question)
            .and_then(|q| q.options.get_mut(option))
        {
            *slot = text;
        }
    }

    pub fn add_option(&mut self, question: usize) {
        if let Some(question) = self.draft.questions.get_mut(question) {
            question.options.push(String::new());
        }
    }

    /// Drop an option, keeping at least two and the correct answer pointing at
    /// the same text where possible.
    pub fn remove_option(&mut self, question: usize, option: usize) {
        let Some(question) = self.draft.questions.get_mut(question) else {
            return;
        };
        if question.options.len() <= MIN_OPTIONS || option >= question.options.len() {
            return;
        }
        question.options.remove(option);
        if question.correct_option > option || question.correct_option >= question.options.len() {
            question.correct_option = question.correct_option.saturating_sub(1);
        }
    }

    pub fn set_correct(&mut self, question: usize, option: usize) {
        if let Some(question) = self.draft.questions.get_mut(question) {
            if option < question.options.len() {
                question.correct_option = option;
            }
        }
    }

    pub fn set_explanation(&mut self, question: usize, text: String) {
        if let Some(question) = self.draft.questions.get_mut(question) {
            question.explanation = if text.trim().is_empty() { None } else { Some(text) };
        }
    }

    pub fn reset(&mut self) {
        self.draft = QuizDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_a_blank_question() {
        let mut vm = QuizBuilderVm::default();
        vm.set_title("Sorting".into());
        vm.set_time_limit(" 15 ");
        vm.set_time_limit("abc");
        vm.add_blank_question();
        vm.set_question_text(0, "Fastest average sort?".into());
        vm.set_option(0, 2, "Quicksort".into());
        vm.set_correct(0, 2);
        vm.set_correct(0, 9);
        vm.set_option(3, 0, "ignored".into());

        let draft = vm.draft();
        assert_eq!(draft.time_limit_minutes, 15);
        assert_eq!(draft.questions[0].options[2], "Quicksort");
        assert_eq!(draft.questions[0].correct_option, 2);
    }

    #[test]
    fn removing_options_keeps_correct_answer() {
        let mut vm = QuizBuilderVm::default();
        vm.add_blank_question();
        vm.set_correct(0, 3);
        vm.remove_option(0, 1);
        assert_eq!(vm.draft().questions[0].correct_option, 2);

        vm.remove_option(0, 2);
        assert_eq!(vm.draft().questions[0].options.len(), 2);
        assert_eq!(vm.draft().questions[0].correct_option, 1);

        vm.remove_option(0, 0);
        assert_eq!(vm.draft().questions[0].options.len(), 2);
    }

    #[test]
    fn blank_explanation_is_cleared() {
        let mut vm = QuizBuilderVm::default();
        vm.add_blank_question();
        vm.set_explanation(0, "because".into());
        vm.set_explanation(0, "   ".into());
        assert_eq!(vm.draft().questions[0].explanation, None);
    }
}
