use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use leafthrough_core::article::ImportDocument;
use leafthrough_core::storage::{ArticleRepository, Database};

pub async fn run(db: &Database, file_path: &str) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        println!("File not found: {}", file_path);
        return Ok(());
    }

    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        println!("File must be a JSON file: {}", file_path);
        return Ok(());
    }

    let bytes = std::fs::read(path)?;
    let document = match ImportDocument::parse(&bytes) {
        Ok(document) => document,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    if document.is_empty() {
        println!("No articles found in {}", file_path);
        return Ok(());
    }

    let repo = ArticleRepository::new(db);
    let total = document.len();
    let mut imported = 0u32;

    for (i, entry) in document.articles().enumerate() {
        let article = match entry {
            Ok(article) => article,
            Err(e) => {
                // Entries inserted before the bad one stay in the database
                println!("[{}/{}] {}", i + 1, total, e);
                println!("\nImport aborted after {} of {} articles.", imported, total);
                return Ok(());
            }
        };

        print!("[{}/{}] {} ... ", i + 1, total, display_title(&article.title));
        io::stdout().flush().ok();

        repo.create(&article).await?;
        println!("OK");
        imported += 1;
    }

    println!("\nSuccessfully imported {} articles!", imported);
    Ok(())
}

/// Truncate long titles for progress output
fn display_title(title: &str) -> String {
    if title.chars().count() > 40 {
        format!("{}...", title.chars().take(37).collect::<String>())
    } else {
        title.to_string()
    }
}
