mod import;
mod models;

pub use import::ImportDocument;
pub use models::{Article, NewArticle};
