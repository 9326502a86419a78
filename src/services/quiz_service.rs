use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizQuestion},
        dto::{
            request::CreateQuizRequest,
            response::{QuizCreatedResponse, QuizDetailResponse, QuizOverview, StudentQuizEntry},
        },
    },
    repositories::{
        QuizAnswerRepository, QuizAttemptRepository, QuizQuestionRepository, QuizRepository,
        SectionRepository,
    },
};

/// Quiz authoring, listing and removal.
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuizQuestionRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    answers: Arc<dyn QuizAnswerRepository>,
    sections: Arc<dyn SectionRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuizQuestionRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        answers: Arc<dyn QuizAnswerRepository>,
        sections: Arc<dyn SectionRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            attempts,
            answers,
            sections,
        }
    }

    /// Creates a quiz together with its questions. If the questions cannot
    /// be stored the quiz is removed again so no half-built quiz remains.
    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        created_by: &str,
    ) -> AppResult<QuizCreatedResponse> {
        request.validate()?;
        validate_window(request.start_time, request.end_time)?;

        if self.sections.find_by_id(&request.section_id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "Section '{}' does not exist",
                request.section_id
            )));
        }

        let quiz = Quiz::new(
            request.title.trim(),
            &request.section_id,
            request.duration,
            request.start_time,
            request.end_time,
            created_by,
        );
        let quiz = self.quizzes.create(quiz).await?;

        let questions: Vec<QuizQuestion> = request
            .questions
            .iter()
            .enumerate()
            .map(|(position, q)| {
                QuizQuestion::new(
                    &quiz.id,
                    position as i32,
                    &q.question_text,
                    q.options(),
                    q.correct_option,
                )
            })
            .collect();
        let question_count = questions.len();

        if let Err(err) = self.questions.create_many(questions).await {
            log::warn!(
                "Storing questions for quiz '{}' failed, removing the quiz: {}",
                quiz.id,
                err
            );
            self.discard_quiz(&quiz.id).await;
            return Err(err);
        }

        log::info!(
            "Quiz '{}' created by '{}' with {} questions",
            quiz.id,
            created_by,
            question_count
        );

        Ok(QuizCreatedResponse {
            success: true,
            quiz_id: quiz.id,
            message: "Quiz created successfully".to_string(),
        })
    }

    async fn discard_quiz(&self, quiz_id: &str) {
        if let Err(err) = self.questions.delete_by_quiz(quiz_id).await {
            log::error!("Failed to remove questions of quiz '{}': {}", quiz_id, err);
        }
        if let Err(err) = self.quizzes.delete(quiz_id).await {
            log::error!("Failed to remove quiz '{}': {}", quiz_id, err);
        }
    }

    pub async fn list_quizzes(&self) -> AppResult<Vec<QuizOverview>> {
        let quizzes = self.quizzes.list_all().await?;
        let section_names = self.section_names().await?;

        let mut overviews = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            let question_count = self.questions.count_by_quiz(&quiz.id).await?;
            let section_name = section_names.get(&quiz.section_id).cloned();
            overviews.push(QuizOverview::new(quiz, section_name, question_count));
        }
        Ok(overviews)
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizDetailResponse> {
        let quiz = self.find_quiz(id).await?;
        let questions = self.questions.find_by_quiz(id).await?;
        let section_name = self
            .sections
            .find_by_id(&quiz.section_id)
            .await?
            .map(|section| section.name);

        Ok(QuizDetailResponse {
            quiz: QuizOverview::new(quiz, section_name, questions.len() as i64),
            questions,
        })
    }

    /// Removes a quiz with everything that hangs off it: answers, then
    /// attempts, then questions, then the quiz itself.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.find_quiz(id).await?;

        let answers = self.answers.delete_by_quiz(id).await?;
        let attempts = self.attempts.delete_by_quiz(id).await?;
        let questions = self.questions.delete_by_quiz(id).await?;
        self.quizzes.delete(id).await?;

        log::info!(
            "Quiz '{}' deleted along with {} questions, {} attempts and {} answers",
            id,
            questions,
            attempts,
            answers
        );
        Ok(())
    }

    /// Quizzes of the student's section with the student's own attempt status.
    pub async fn list_for_student(
        &self,
        student_id: &str,
        section_id: &str,
    ) -> AppResult<Vec<StudentQuizEntry>> {
        let quizzes = self.quizzes.list_by_section(section_id).await?;

        let mut entries = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            let question_count = self.questions.count_by_quiz(&quiz.id).await?;
            let attempt = self
                .attempts
                .find_by_quiz_and_student(&quiz.id, student_id)
                .await?
                .into_iter()
                .next();
            entries.push(StudentQuizEntry::new(
                quiz,
                question_count,
                attempt.map(|a| a.status),
            ));
        }
        Ok(entries)
    }

    async fn find_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn section_names(&self) -> AppResult<HashMap<String, String>> {
        let sections = self.sections.find_all().await?;
        Ok(sections.into_iter().map(|s| (s.id, s.name)).collect())
    }
}

fn validate_window(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> AppResult<()> {
    if end_time <= start_time {
        return Err(AppError::ValidationError(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}
