use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AttemptStatus, Quiz, QuizAnswer, QuizAttempt, QuizQuestion},
        dto::{
            request::{Selection, SubmitAnswersRequest},
            response::{AttemptQuizResponse, PublicQuestion},
        },
    },
    repositories::{
        QuizAnswerRepository, QuizAttemptRepository, QuizQuestionRepository, QuizRepository,
    },
};

/// Drives a student's single attempt at a quiz: start, fetch and submit.
pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuizQuestionRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    answers: Arc<dyn QuizAnswerRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuizQuestionRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        answers: Arc<dyn QuizAnswerRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            attempts,
            answers,
        }
    }

    /// Opens the one attempt a student gets at a quiz.
    pub async fn start_attempt(
        &self,
        quiz_id: &str,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<QuizAttempt> {
        self.find_quiz(quiz_id).await?;

        if let Some(existing) = self.existing_attempt(quiz_id, student_id).await? {
            return Err(AppError::AttemptExists(existing.status));
        }

        let attempt = QuizAttempt::start(quiz_id, student_id, now);
        match self.attempts.create(attempt).await {
            Ok(attempt) => {
                log::info!(
                    "Student '{}' started attempt '{}' on quiz '{}'",
                    student_id,
                    attempt.id,
                    quiz_id
                );
                Ok(attempt)
            }
            // Lost a race with a concurrent start for the same student.
            Err(AppError::AlreadyExists(_)) => {
                let status = self
                    .existing_attempt(quiz_id, student_id)
                    .await?
                    .map(|a| a.status)
                    .unwrap_or(AttemptStatus::InProgress);
                Err(AppError::AttemptExists(status))
            }
            Err(err) => Err(err),
        }
    }

    /// The quiz as shown to a student taking it, without the correct answers.
    pub async fn fetch_for_attempt(
        &self,
        quiz_id: &str,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<AttemptQuizResponse> {
        if let Some(existing) = self.existing_attempt(quiz_id, student_id).await? {
            if existing.is_completed() {
                return Err(AppError::AttemptLocked);
            }
        }

        let quiz = self.find_quiz(quiz_id).await?;
        quiz.ensure_open_at(now)?;

        let questions = self
            .questions
            .find_by_quiz(quiz_id)
            .await?
            .into_iter()
            .map(PublicQuestion::from)
            .collect();
        let remaining_seconds = quiz.remaining_seconds(now);

        Ok(AttemptQuizResponse {
            quiz,
            questions,
            remaining_seconds,
        })
    }

    /// Grades and finalises an attempt. Submitting an attempt that is already
    /// completed succeeds without storing anything.
    ///
    /// The attempt is claimed (marked completed) before its answers are
    /// written. A submission that loses the claim re-reads the attempt: it
    /// succeeds if the attempt is still completed and fails with a conflict
    /// if the winner's answer insert failed and reopened it. A loser that
    /// reads between the winner's claim and insert still reports success.
    pub async fn submit(
        &self,
        quiz_id: &str,
        student_id: &str,
        request: SubmitAnswersRequest,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let attempt_id = request
            .attempt_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("attempt_id is required".to_string()))?;

        let attempt = self
            .attempts
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt '{}' not found", attempt_id)))?;

        if attempt.student_id != student_id {
            return Err(AppError::Forbidden(
                "Attempt belongs to another student".to_string(),
            ));
        }
        if attempt.quiz_id != quiz_id {
            return Err(AppError::NotFound(format!(
                "Attempt '{}' not found for quiz '{}'",
                attempt_id, quiz_id
            )));
        }
        if attempt.is_completed() {
            log::info!("Attempt '{}' already submitted, nothing to do", attempt_id);
            return Ok(());
        }

        let questions = self.questions.find_by_quiz(quiz_id).await?;
        let graded = grade_answers(attempt_id, &questions, &request.answers);

        if !self.attempts.mark_completed(attempt_id, now).await? {
            return self.after_lost_claim(attempt_id).await;
        }

        let answer_count = graded.len();
        if let Err(err) = self.answers.create_many(graded).await {
            log::warn!(
                "Storing answers for attempt '{}' failed, reopening it: {}",
                attempt_id,
                err
            );
            if let Err(reopen_err) = self.attempts.reopen(attempt_id).await {
                log::error!("Failed to reopen attempt '{}': {}", attempt_id, reopen_err);
            }
            return Err(err);
        }

        log::info!(
            "Attempt '{}' on quiz '{}' submitted with {} answers (auto_submit={})",
            attempt_id,
            quiz_id,
            answer_count,
            request.auto_submit
        );
        Ok(())
    }

    /// Another submission claimed the attempt first.
    async fn after_lost_claim(&self, attempt_id: &str) -> AppResult<()> {
        match self.attempts.find_by_id(attempt_id).await? {
            Some(attempt) if attempt.is_completed() => {
                log::info!("Attempt '{}' was submitted concurrently", attempt_id);
                Ok(())
            }
            Some(_) => {
                log::warn!(
                    "Attempt '{}' was reopened after a concurrent submission failed",
                    attempt_id
                );
                Err(AppError::AlreadyExists(format!(
                    "Attempt '{}' is being submitted elsewhere, submit again",
                    attempt_id
                )))
            }
            None => Err(AppError::NotFound(format!(
                "Attempt '{}' not found",
                attempt_id
            ))),
        }
    }

    async fn find_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn existing_attempt(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Option<QuizAttempt>> {
        let attempts = self
            .attempts
            .find_by_quiz_and_student(quiz_id, student_id)
            .await?;
        Ok(attempts.into_iter().next())
    }
}

/// One graded answer per question that has a selection. Unanswered questions
/// and ids that do not belong to the quiz are skipped; an unrecognised
/// selection is stored as a wrong answer.
pub fn grade_answers(
    attempt_id: &str,
    questions: &[QuizQuestion],
    submitted: &HashMap<String, Option<Selection>>,
) -> Vec<QuizAnswer> {
    questions
        .iter()
        .filter_map(|question| {
            submitted
                .get(&question.id)
                .copied()
                .flatten()
                .map(|selection| QuizAnswer::graded(attempt_id, question, selection.option()))
        })
        .collect()
}
