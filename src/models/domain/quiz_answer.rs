use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::{AnswerOption, QuizQuestion};

/// A graded response to one question of a completed attempt. Never updated.
/// `selected_option` is `None` when the submitted value named no option.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAnswer {
    pub id: String,
    pub attempt_id: String,
    pub quiz_id: String,
    pub question_id: String,
    pub selected_option: Option<AnswerOption>,
    pub is_correct: bool,
}

impl QuizAnswer {
    pub fn graded(
        attempt_id: &str,
        question: &QuizQuestion,
        selected: Option<AnswerOption>,
    ) -> Self {
        QuizAnswer {
            id: Uuid::new_v4().to_string(),
            attempt_id: attempt_id.to_string(),
            quiz_id: question.quiz_id.clone(),
            question_id: question.id.clone(),
            selected_option: selected,
            is_correct: selected.is_some_and(|option| question.is_correct(option)),
        }
    }
}
