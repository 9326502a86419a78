use std::sync::Arc;

use crate::{errors::AppResult, models::domain::Section, repositories::SectionRepository};

pub struct SectionService {
    repository: Arc<dyn SectionRepository>,
}

impl SectionService {
    pub fn new(repository: Arc<dyn SectionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_sections(&self) -> AppResult<Vec<Section>> {
        self.repository.find_all().await
    }
}
