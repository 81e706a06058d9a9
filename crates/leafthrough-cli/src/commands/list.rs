use anyhow::Result;

use leafthrough_core::storage::{ArticleRepository, Database};

pub async fn run(db: &Database) -> Result<()> {
    let repo = ArticleRepository::new(db);
    let articles = repo.list_all().await?;

    if articles.is_empty() {
        println!("No articles yet.");
        println!("\nTo import articles, run:");
        println!("  leafthrough import <file.json>");
        return Ok(());
    }

    println!("Articles ({}):\n", articles.len());

    for article in &articles {
        println!("  [{}] {}", article.id, article.title);
        let tags = article.tag_list();
        if !tags.is_empty() {
            println!("      Tags: {}", tags.join(", "));
        }
    }

    Ok(())
}
