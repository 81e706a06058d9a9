mod article_repo;
mod database;

pub use article_repo::ArticleRepository;
pub use database::Database;
