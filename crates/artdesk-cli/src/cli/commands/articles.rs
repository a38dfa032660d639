//! Article command handlers.
//!
//! Each handler runs a single action through a fresh `Desk` and prints the
//! resulting message. A rejected session surfaces as an error, which `main`
//! prints to stderr.

use std::sync::Arc;

use anyhow::Result;
use artdesk_core::{Article, ArticleFields, ArticleId, Config, Desk, SessionStore};

pub async fn list(config: &Config, session: Arc<dyn SessionStore>) -> Result<()> {
    let mut desk = Desk::from_config(config, session)?;
    desk.list_articles().await?;

    let state = desk.state();
    println!("{}", state.message);
    for article in &state.articles {
        println!("{}", format_article(article));
    }
    Ok(())
}

pub async fn create(
    config: &Config,
    session: Arc<dyn SessionStore>,
    fields: ArticleFields,
) -> Result<()> {
    let mut desk = Desk::from_config(config, session)?;
    desk.create_article(fields).await?;

    let state = desk.state();
    println!("{}", state.message);
    if let Some(article) = state.articles.last() {
        println!("{}", format_article(article));
    }
    Ok(())
}

pub async fn update(
    config: &Config,
    session: Arc<dyn SessionStore>,
    id: ArticleId,
    fields: ArticleFields,
) -> Result<()> {
    let mut desk = Desk::from_config(config, session)?;
    desk.update_article(id, fields).await?;
    println!("{}", desk.state().message);
    Ok(())
}

pub async fn delete(config: &Config, session: Arc<dyn SessionStore>, id: ArticleId) -> Result<()> {
    let mut desk = Desk::from_config(config, session)?;
    desk.delete_article(id).await?;
    println!("{}", desk.state().message);
    Ok(())
}

/// `[id] title (topic): text`
fn format_article(article: &Article) -> String {
    format!(
        "[{}] {} ({}): {}",
        article.article_id, article.title, article.topic, article.text
    )
}

#[cfg(test)]
mod tests {
    use artdesk_core::Topic;

    use super::*;

    #[test]
    fn test_format_article() {
        let article = Article {
            article_id: ArticleId(4),
            title: "Hooks".into(),
            text: "useEffect all the things".into(),
            topic: Topic::React,
        };
        assert_eq!(
            format_article(&article),
            "[4] Hooks (React): useEffect all the things"
        );
    }
}
