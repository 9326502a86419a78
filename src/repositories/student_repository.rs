use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    constants::STUDENTS, db::Database, errors::AppResult, models::domain::Student,
};

/// Student records are owned by another part of the application; read-only here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(STUDENTS);
        Self { collection }
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let students = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }
}
