use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    constants::QUIZ_ANSWERS, db::Database, errors::AppResult, models::domain::QuizAnswer,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAnswerRepository: Send + Sync {
    async fn create_many(&self, answers: Vec<QuizAnswer>) -> AppResult<()>;
    async fn count_correct(&self, attempt_id: &str) -> AppResult<i64>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoQuizAnswerRepository {
    collection: Collection<QuizAnswer>,
}

impl MongoQuizAnswerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_ANSWERS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_answers collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let attempt_question_index = IndexModel::builder()
            .keys(doc! { "attempt_id": 1, "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("attempt_question_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(attempt_question_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for quiz_answers collection");
        Ok(())
    }
}

#[async_trait]
impl QuizAnswerRepository for MongoQuizAnswerRepository {
    async fn create_many(&self, answers: Vec<QuizAnswer>) -> AppResult<()> {
        if answers.is_empty() {
            return Ok(());
        }
        self.collection.insert_many(&answers).await?;
        Ok(())
    }

    async fn count_correct(&self, attempt_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "attempt_id": attempt_id, "is_correct": true })
            .await?;
        Ok(count as i64)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }
}
