use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    constants::QUIZ_QUESTIONS, db::Database, errors::AppResult, models::domain::QuizQuestion,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizQuestionRepository: Send + Sync {
    async fn create_many(&self, questions: Vec<QuizQuestion>) -> AppResult<Vec<QuizQuestion>>;
    /// Questions of a quiz in authored order.
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizQuestion>>;
    async fn count_by_quiz(&self, quiz_id: &str) -> AppResult<i64>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoQuizQuestionRepository {
    collection: Collection<QuizQuestion>,
}

impl MongoQuizQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_QUESTIONS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "position": 1 })
            .options(IndexOptions::builder().name("quiz_position".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for quiz_questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuizQuestionRepository for MongoQuizQuestionRepository {
    async fn create_many(&self, questions: Vec<QuizQuestion>) -> AppResult<Vec<QuizQuestion>> {
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizQuestion>> {
        let questions = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "position": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn count_by_quiz(&self, quiz_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "quiz_id": quiz_id })
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
