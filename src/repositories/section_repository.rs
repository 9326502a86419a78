use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    constants::SECTIONS, db::Database, errors::AppResult, models::domain::Section,
};

/// Sections are owned by another part of the application; read-only here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Section>>;
    /// All sections ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Section>>;
}

pub struct MongoSectionRepository {
    collection: Collection<Section>,
}

impl MongoSectionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SECTIONS);
        Self { collection }
    }
}

#[async_trait]
impl SectionRepository for MongoSectionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Section>> {
        let section = self.collection.find_one(doc! { "id": id }).await?;
        Ok(section)
    }

    async fn find_all(&self) -> AppResult<Vec<Section>> {
        let sections = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(sections)
    }
}
