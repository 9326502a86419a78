use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    constants::QUIZZES, db::Database, errors::AppResult, models::domain::Quiz,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// All quizzes, newest first.
    async fn list_all(&self) -> AppResult<Vec<Quiz>>;
    /// Quizzes of one section, latest `start_time` first.
    async fn list_by_section(&self, section_id: &str) -> AppResult<Vec<Quiz>>;
    async fn delete(&self, id: &str) -> AppResult<u64>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZZES);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let section_index = IndexModel::builder()
            .keys(doc! { "section_id": 1 })
            .options(IndexOptions::builder().name("section_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(section_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        let items = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn list_by_section(&self, section_id: &str) -> AppResult<Vec<Quiz>> {
        let items = self
            .collection
            .find(doc! { "section_id": section_id })
            .sort(doc! { "start_time": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count)
    }
}
