#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quiz_server::{
    app_state::{AppState, Repositories},
    errors::{AppError, AppResult},
    models::domain::{AttemptStatus, Quiz, QuizAnswer, QuizAttempt, QuizQuestion, Section, Student},
    repositories::{
        quiz_attempt_repository::sort_latest_submitted_first, QuizAnswerRepository,
        QuizAttemptRepository, QuizQuestionRepository, QuizRepository, SectionRepository,
        StudentRepository,
    },
};

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        let mut items: Vec<Quiz> = self.quizzes.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list_by_section(&self, section_id: &str) -> AppResult<Vec<Quiz>> {
        let mut items: Vec<Quiz> = self
            .quizzes
            .read()
            .await
            .values()
            .filter(|q| q.section_id == section_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        Ok(self.quizzes.write().await.remove(id).map_or(0, |_| 1))
    }
}

#[derive(Default)]
pub struct InMemoryQuizQuestionRepository {
    questions: RwLock<Vec<QuizQuestion>>,
}

#[async_trait]
impl QuizQuestionRepository for InMemoryQuizQuestionRepository {
    async fn create_many(&self, questions: Vec<QuizQuestion>) -> AppResult<Vec<QuizQuestion>> {
        self.questions.write().await.extend(questions.iter().cloned());
        Ok(questions)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizQuestion>> {
        let mut items: Vec<QuizQuestion> = self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.position);
        Ok(items)
    }

    async fn count_by_quiz(&self, quiz_id: &str) -> AppResult<i64> {
        let questions = self.questions.read().await;
        Ok(questions.iter().filter(|q| q.quiz_id == quiz_id).count() as i64)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.quiz_id != quiz_id);
        Ok((before - questions.len()) as u64)
    }
}

/// Honours the same one-attempt-per-student rule as the unique index.
#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: RwLock<HashMap<String, QuizAttempt>>,
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        let duplicate = attempts
            .values()
            .any(|a| a.quiz_id == attempt.quiz_id && a.student_id == attempt.student_id);
        if duplicate {
            return Err(AppError::AlreadyExists(format!(
                "Attempt for quiz '{}' by student '{}' already exists",
                attempt.quiz_id, attempt.student_id
            )));
        }
        attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        Ok(self.attempts.read().await.get(id).cloned())
    }

    async fn find_by_quiz_and_student(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let mut items: Vec<QuizAttempt> = self
            .attempts
            .read()
            .await
            .values()
            .filter(|a| a.quiz_id == quiz_id && a.student_id == student_id)
            .cloned()
            .collect();
        sort_latest_submitted_first(&mut items);
        Ok(items)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        Ok(self
            .attempts
            .read()
            .await
            .values()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn mark_completed(&self, id: &str, submitted_at: DateTime<Utc>) -> AppResult<bool> {
        let mut attempts = self.attempts.write().await;
        match attempts.get_mut(id) {
            Some(attempt) if attempt.status == AttemptStatus::InProgress => {
                attempt.status = AttemptStatus::Completed;
                attempt.submitted_at = Some(submitted_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn reopen(&self, id: &str) -> AppResult<()> {
        if let Some(attempt) = self.attempts.write().await.get_mut(id) {
            attempt.status = AttemptStatus::InProgress;
            attempt.submitted_at = None;
        }
        Ok(())
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|_, a| a.quiz_id != quiz_id);
        Ok((before - attempts.len()) as u64)
    }
}

/// Honours the unique (attempt_id, question_id) rule; a batch with a
/// duplicate is rejected as a whole.
#[derive(Default)]
pub struct InMemoryQuizAnswerRepository {
    answers: RwLock<Vec<QuizAnswer>>,
}

impl InMemoryQuizAnswerRepository {
    pub async fn count_for_quiz(&self, quiz_id: &str) -> usize {
        self.answers
            .read()
            .await
            .iter()
            .filter(|a| a.quiz_id == quiz_id)
            .count()
    }

    /// `(question_id, is_correct)` of an attempt's answers, in the order of
    /// `question_ids`.
    pub async fn graded_in_order(
        &self,
        attempt_id: &str,
        question_ids: &[String],
    ) -> Vec<(String, bool)> {
        let answers = self.answers.read().await;
        question_ids
            .iter()
            .filter_map(|question_id| {
                answers
                    .iter()
                    .find(|a| a.attempt_id == attempt_id && &a.question_id == question_id)
                    .map(|a| (a.question_id.clone(), a.is_correct))
            })
            .collect()
    }
}

#[async_trait]
impl QuizAnswerRepository for InMemoryQuizAnswerRepository {
    async fn create_many(&self, answers: Vec<QuizAnswer>) -> AppResult<()> {
        let mut stored = self.answers.write().await;
        let clash = answers.iter().any(|new| {
            stored
                .iter()
                .any(|a| a.attempt_id == new.attempt_id && a.question_id == new.question_id)
        });
        if clash {
            return Err(AppError::AlreadyExists(
                "Answer for this question already recorded".to_string(),
            ));
        }
        stored.extend(answers);
        Ok(())
    }

    async fn count_correct(&self, attempt_id: &str) -> AppResult<i64> {
        let answers = self.answers.read().await;
        Ok(answers
            .iter()
            .filter(|a| a.attempt_id == attempt_id && a.is_correct)
            .count() as i64)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let mut answers = self.answers.write().await;
        let before = answers.len();
        answers.retain(|a| a.quiz_id != quiz_id);
        Ok((before - answers.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemorySectionRepository {
    sections: RwLock<Vec<Section>>,
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Section>> {
        Ok(self.sections.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Section>> {
        let mut items = self.sections.read().await.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }
}

/// All in-memory repositories, kept around so tests can inspect them.
#[derive(Default, Clone)]
pub struct TestStore {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub questions: Arc<InMemoryQuizQuestionRepository>,
    pub attempts: Arc<InMemoryQuizAttemptRepository>,
    pub answers: Arc<InMemoryQuizAnswerRepository>,
    pub sections: Arc<InMemorySectionRepository>,
    pub students: Arc<InMemoryStudentRepository>,
}

impl TestStore {
    /// A store with section `section-a` ("Grade 9 A") and students `s1`
    /// (amy) and `s2` (bob) in it.
    pub async fn seeded() -> Self {
        let store = Self::default();
        store.sections.sections.write().await.push(Section {
            id: "section-a".to_string(),
            name: "Grade 9 A".to_string(),
        });
        store.students.students.write().await.extend([
            Student {
                id: "s1".to_string(),
                username: "amy".to_string(),
                section_id: Some("section-a".to_string()),
            },
            Student {
                id: "s2".to_string(),
                username: "bob".to_string(),
                section_id: Some("section-a".to_string()),
            },
        ]);
        store
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            quizzes: self.quizzes.clone(),
            questions: self.questions.clone(),
            attempts: self.attempts.clone(),
            answers: self.answers.clone(),
            sections: self.sections.clone(),
            students: self.students.clone(),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_repositories(self.repositories())
    }
}
