use crate::{Block, Category};
use serde::{Deserialize, Serialize};

/// The whole authored document.
///
/// `body` order is render order; blocks never reference each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Author-chosen slug, also the export file stem
    pub id: String,
    pub title: String,
    pub category: Category,
    pub meta: ArticleMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_url: Option<String>,
    #[serde(default)]
    pub body: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub description: String,
    pub cover_image: String,
}

impl Article {
    /// Empty article, as created when the editor mounts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article_is_empty() {
        let article = Article::new();
        assert!(article.id.is_empty());
        assert!(article.title.is_empty());
        assert!(article.meta.description.is_empty());
        assert!(article.body.is_empty());
        assert_eq!(article.category, Category::Advantage);
    }

    #[test]
    fn test_article_json_uses_camel_case() {
        let mut article = Article::with_id("salon");
        article.meta.cover_image = "https://hotcakeapp.com/cover.png".to_string();
        let json = serde_json::to_value(&article).unwrap();

        assert_eq!(json["meta"]["coverImage"], "https://hotcakeapp.com/cover.png");
        assert!(json.get("foreignUrl").is_none());
    }
}
