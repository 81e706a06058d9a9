use sqlx::FromRow;

use super::Database;
use crate::article::{Article, NewArticle};
use crate::Result;

/// Repository for article CRUD operations
pub struct ArticleRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    tags: String,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            content: row.content,
            tags: row.tags,
        }
    }
}

impl<'a> ArticleRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new article, returning it with its assigned id
    pub async fn create(&self, new_article: &NewArticle) -> Result<Article> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, content, tags)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&new_article.title)
        .bind(&new_article.content)
        .bind(&new_article.tags)
        .execute(self.db.pool())
        .await?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: new_article.title.clone(),
            content: new_article.content.clone(),
            tags: new_article.tags.clone(),
        })
    }

    /// Insert multiple articles, returning count of created rows
    pub async fn create_many(&self, articles: &[NewArticle]) -> Result<u32> {
        let mut created = 0;

        for article in articles {
            self.create(article).await?;
            created += 1;
        }

        Ok(created)
    }

    /// Find an article by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        let row: Option<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, tags
            FROM articles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Article::from))
    }

    /// Get one index page of articles in insertion order
    pub async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, tags
            FROM articles
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    /// Get all articles in insertion order
    pub async fn list_all(&self) -> Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, tags
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Article::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_article(n: u32) -> NewArticle {
        NewArticle {
            title: format!("Article {n}"),
            content: format!("Content of article {n}"),
            tags: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ArticleRepository::new(&db);

        let created = repo.create(&new_article(1)).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Article 1");
        assert_eq!(found.tags, "test");
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ArticleRepository::new(&db);

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_page_limits_and_offsets() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ArticleRepository::new(&db);

        let articles: Vec<NewArticle> = (1..=8).map(new_article).collect();
        assert_eq!(repo.create_many(&articles).await.unwrap(), 8);

        let page1 = repo.list_page(6, 0).await.unwrap();
        assert_eq!(page1.len(), 6);
        assert_eq!(page1[0].title, "Article 1");

        let page2 = repo.list_page(6, 6).await.unwrap();
        assert_eq!(page2.len(), 2);
        assert_eq!(page2[0].title, "Article 7");

        let page3 = repo.list_page(6, 12).await.unwrap();
        assert!(page3.is_empty());
    }
}
