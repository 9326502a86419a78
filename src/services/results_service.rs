use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::QuizAttempt,
        dto::response::{MyResultResponse, ResultStatus, StudentResult, UNKNOWN_STUDENT},
    },
    repositories::{
        QuizAnswerRepository, QuizAttemptRepository, QuizQuestionRepository, QuizRepository,
        StudentRepository,
    },
};

/// Scores for admins (whole quiz) and for a single student.
pub struct ResultsService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuizQuestionRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    answers: Arc<dyn QuizAnswerRepository>,
    students: Arc<dyn StudentRepository>,
}

impl ResultsService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuizQuestionRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        answers: Arc<dyn QuizAnswerRepository>,
        students: Arc<dyn StudentRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            attempts,
            answers,
            students,
        }
    }

    /// One row per student who attempted the quiz, ordered by student name.
    pub async fn quiz_results(&self, quiz_id: &str) -> AppResult<Vec<StudentResult>> {
        self.ensure_quiz_exists(quiz_id).await?;
        let total_marks = self.questions.count_by_quiz(quiz_id).await?;

        let attempts = latest_attempt_per_student(self.attempts.find_by_quiz(quiz_id).await?);
        let student_ids: Vec<String> = attempts.iter().map(|a| a.student_id.clone()).collect();
        let names: HashMap<String, String> = self
            .students
            .find_by_ids(&student_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s.username))
            .collect();

        let mut results = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            let (marks_obtained, status) = self.score(&attempt).await?;
            results.push(StudentResult {
                student_name: names
                    .get(&attempt.student_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
                student_id: attempt.student_id,
                marks_obtained,
                total_marks,
                status,
                submitted_at: attempt.submitted_at,
            });
        }

        results.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        Ok(results)
    }

    pub async fn my_result(&self, quiz_id: &str, student_id: &str) -> AppResult<MyResultResponse> {
        self.ensure_quiz_exists(quiz_id).await?;
        let total_marks = self.questions.count_by_quiz(quiz_id).await?;

        let latest = self
            .attempts
            .find_by_quiz_and_student(quiz_id, student_id)
            .await?
            .into_iter()
            .next();

        let (marks_obtained, status) = match latest {
            None => (0, ResultStatus::NotAttempted),
            Some(attempt) => self.score(&attempt).await?,
        };

        Ok(MyResultResponse {
            marks_obtained,
            total_marks,
            status,
        })
    }

    async fn score(&self, attempt: &QuizAttempt) -> AppResult<(i64, ResultStatus)> {
        if !attempt.is_completed() {
            return Ok((0, ResultStatus::NotSubmitted));
        }
        let marks = self.answers.count_correct(&attempt.id).await?;
        Ok((marks, ResultStatus::Submitted))
    }

    async fn ensure_quiz_exists(&self, quiz_id: &str) -> AppResult<()> {
        match self.quizzes.find_by_id(quiz_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz_id
            ))),
        }
    }
}

/// Keeps the most relevant attempt of each student: completed before in
/// progress, then the latest submission, then the latest start.
pub fn latest_attempt_per_student(attempts: Vec<QuizAttempt>) -> Vec<QuizAttempt> {
    let mut latest: HashMap<String, QuizAttempt> = HashMap::new();
    for attempt in attempts {
        match latest.entry(attempt.student_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(attempt);
            }
            Entry::Occupied(mut slot) => {
                if rank(&attempt, slot.get()) == Ordering::Greater {
                    slot.insert(attempt);
                }
            }
        }
    }
    latest.into_values().collect()
}

fn rank(a: &QuizAttempt, b: &QuizAttempt) -> Ordering {
    a.is_completed()
        .cmp(&b.is_completed())
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        .then_with(|| a.started_at.cmp(&b.started_at))
}
