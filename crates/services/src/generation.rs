use async_trait::async_trait;
use quiz_core::model::QuestionDraft;

/// Source of suggested questions for the quiz builder.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Suggest up to `count` questions about `topic`.
    async fn generate(&self, topic: &str, count: usize) -> Vec<QuestionDraft>;
}

/// Offline generator that always suggests the same machine-learning questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedQuestionGenerator;

fn draft(text: &str, options: [&str; 4], correct_option: usize, explanation: &str) -> QuestionDraft {
    QuestionDraft {
        text: text.to_owned(),
        options: options.iter().map(|o| (*o).to_owned()).collect(),
        correct_option,
        explanation: Some(explanation.to_owned()),
    }
}

#[async_trait]
impl QuestionGenerator for CannedQuestionGenerator {
    async fn generate(&self, topic: &str, count: usize) -> Vec<QuestionDraft> {
        tracing::debug!(topic, count, "generating canned questions");
        let mut drafts = vec![
            draft(
                "What is the primary purpose of machine learning?",
                ["Data storage", "Pattern recognition", "File compression", "Network security"],
                1,
                "Machine learning is primarily used for pattern recognition and making predictions from data.",
            ),
            draft(
                "Which algorithm is commonly used for classification tasks?",
                ["K-means", "Linear regression", "Decision tree", "Bubble sort"],
                2,
                "Decision trees are widely used for classification tasks due to their interpretability.",
            ),
        ];
        drafts.truncate(count);
        drafts
    }
}
