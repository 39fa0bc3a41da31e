use serde::{Deserialize, Serialize};
use std::fmt;

/// Article category, shared by `Article::category` and the `tag` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Advantage,
    School,
    Case,
    Report,
}

impl Category {
    /// Select options, in display order.
    pub const ALL: [Category; 4] = [
        Category::Advantage,
        Category::School,
        Category::Case,
        Category::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Advantage => "advantage",
            Category::School => "school",
            Category::Case => "case",
            Category::Report => "report",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Advantage => "夯客優勢",
            Category::School => "問講學堂",
            Category::Case => "成功案例",
            Category::Report => "媒體報導",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::School).unwrap();
        assert_eq!(json, "\"school\"");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("report"), Some(Category::Report));
        assert_eq!(Category::parse("REPORT"), None);
        assert_eq!(Category::default(), Category::Advantage);
    }
}
