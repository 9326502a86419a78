use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    constants::QUIZ_ATTEMPTS,
    db::{is_duplicate_key, Database},
    errors::{AppError, AppResult},
    models::domain::{timestamp, AttemptStatus, QuizAttempt},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the student already has an attempt
    /// for the quiz.
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    /// Attempts of one student at one quiz, most recently submitted first.
    async fn find_by_quiz_and_student(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Vec<QuizAttempt>>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>>;
    /// Moves an in-progress attempt to completed. Returns `false` when the
    /// attempt was not in progress, i.e. another submission got there first.
    async fn mark_completed(&self, id: &str, submitted_at: DateTime<Utc>) -> AppResult<bool>;
    /// Puts a completed attempt back in progress.
    async fn reopen(&self, id: &str) -> AppResult<()>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
}

/// Orders attempts by `submitted_at` descending, unsubmitted ones last.
/// Matches the order `find_by_quiz_and_student` asks MongoDB for.
pub fn sort_latest_submitted_first(attempts: &mut [QuizAttempt]) {
    attempts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_ATTEMPTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One attempt per student per quiz, enforced by the store as well.
        let quiz_student_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_student_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_student_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        match self.collection.insert_one(&attempt).await {
            Ok(_) => Ok(attempt),
            Err(err) if is_duplicate_key(&err) => Err(AppError::AlreadyExists(format!(
                "Attempt for quiz '{}' by student '{}' already exists",
                attempt.quiz_id, attempt.student_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_quiz_and_student(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! {
                "quiz_id": quiz_id,
                "student_id": student_id
            })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn mark_completed(&self, id: &str, submitted_at: DateTime<Utc>) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id, "status": AttemptStatus::InProgress.as_str() },
                doc! { "$set": {
                    "status": AttemptStatus::Completed.as_str(),
                    "submitted_at": timestamp::format(&submitted_at),
                } },
            )
            .await?;
        Ok(result.modified_count == 1)
    }

    async fn reopen(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "status": AttemptStatus::InProgress.as_str(),
                    "submitted_at": Bson::Null,
                } },
            )
            .await?;
        Ok(())
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }
}
