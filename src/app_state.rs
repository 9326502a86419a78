use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizAnswerRepository, MongoQuizAttemptRepository, MongoQuizQuestionRepository,
        MongoQuizRepository, MongoSectionRepository, MongoStudentRepository, QuizAnswerRepository,
        QuizAttemptRepository, QuizQuestionRepository, QuizRepository, SectionRepository,
        StudentRepository,
    },
    services::{QuizAttemptService, QuizService, ResultsService, SectionService},
};

/// The storage the services run on.
#[derive(Clone)]
pub struct Repositories {
    pub quizzes: Arc<dyn QuizRepository>,
    pub questions: Arc<dyn QuizQuestionRepository>,
    pub attempts: Arc<dyn QuizAttemptRepository>,
    pub answers: Arc<dyn QuizAnswerRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub students: Arc<dyn StudentRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub results_service: Arc<ResultsService>,
    pub section_service: Arc<SectionService>,
    /// `None` when the repositories are not backed by MongoDB.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let questions = Arc::new(MongoQuizQuestionRepository::new(&db));
        questions.ensure_indexes().await?;
        let attempts = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempts.ensure_indexes().await?;
        let answers = Arc::new(MongoQuizAnswerRepository::new(&db));
        answers.ensure_indexes().await?;

        let repositories = Repositories {
            quizzes,
            questions,
            attempts,
            answers,
            sections: Arc::new(MongoSectionRepository::new(&db)),
            students: Arc::new(MongoStudentRepository::new(&db)),
        };

        let mut state = Self::from_repositories(repositories);
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(repositories: Repositories) -> Self {
        let Repositories {
            quizzes,
            questions,
            attempts,
            answers,
            sections,
            students,
        } = repositories;

        Self {
            quiz_service: Arc::new(QuizService::new(
                quizzes.clone(),
                questions.clone(),
                attempts.clone(),
                answers.clone(),
                sections.clone(),
            )),
            attempt_service: Arc::new(QuizAttemptService::new(
                quizzes.clone(),
                questions.clone(),
                attempts.clone(),
                answers.clone(),
            )),
            results_service: Arc::new(ResultsService::new(
                quizzes, questions, attempts, answers, students,
            )),
            section_service: Arc::new(SectionService::new(sections)),
            db: None,
        }
    }
}
