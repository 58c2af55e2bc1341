use quiz_core::model::{ClassId, QuizDef, QuizId, Student, StudentId};
use services::ClassSummary;

/// Card on the available-quizzes page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: QuizId,
    pub title: String,
    pub subject: String,
    pub question_count: usize,
    pub time_limit_label: String,
}

impl From<&QuizDef> for QuizCardVm {
    fn from(quiz: &QuizDef) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().to_owned(),
            subject: quiz.subject().to_owned(),
            question_count: quiz.question_count(),
            time_limit_label: format!("{} minutes", quiz.time_limit_minutes()),
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[QuizDef]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassCardVm {
    pub id: ClassId,
    pub name: String,
    pub description: String,
    pub students_label: String,
}

impl From<&ClassSummary> for ClassCardVm {
    fn from(summary: &ClassSummary) -> Self {
        let count = summary.student_count;
        Self {
            id: summary.class.id(),
            name: summary.class.name().to_owned(),
            description: summary.class.description().to_owned(),
            students_label: if count == 1 {
                "1 student".to_owned()
            } else {
                format!("{count} students")
            },
        }
    }
}

#[must_use]
pub fn map_class_cards(classes: &[ClassSummary]) -> Vec<ClassCardVm> {
    classes.iter().map(ClassCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRowVm {
    pub id: StudentId,
    pub usn: String,
    pub name: String,
    pub email: String,
}

#[must_use]
pub fn map_student_rows(students: &[Student]) -> Vec<StudentRowVm> {
    students
        .iter()
        .map(|student| StudentRowVm {
            id: student.id(),
            usn: student.usn().to_owned(),
            name: student.name().to_owned(),
            email: student.email().to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ClassInfo;

    #[test]
    fn student_counts_are_pluralised() {
        let class = ClassInfo::new(ClassId::new(1), "Data Structures", "").unwrap();
        let one = ClassSummary {
            class: class.clone(),
            student_count: 1,
        };
        let none = ClassSummary {
            class,
            student_count: 0,
        };
        let cards = map_class_cards(&[one, none]);
        assert_eq!(cards[0].students_label, "1 student");
        assert_eq!(cards[1].students_label, "0 students");
    }
}
