use crate::{Article, Block, FieldPath};

/// Visitor pattern for traversing an article's editable fields
///
/// This trait provides default implementations that walk the entire article.
/// Override the leaf `visit_*` methods to inspect fields; every leaf receives
/// the path of the field it was reached through.
pub trait Visitor: Sized {
    fn visit_article(&mut self, article: &Article) {
        walk_article(self, article);
    }

    fn visit_block(&mut self, path: &FieldPath, block: &Block) {
        walk_block(self, path, block);
    }

    /// Free text that must not be blank
    fn visit_required_text(&mut self, _path: &FieldPath, _value: &str) {}

    /// Field that must hold an absolute URL
    fn visit_url(&mut self, _path: &FieldPath, _value: &str) {}

    /// Ordered text-line list
    fn visit_text_lines(&mut self, _path: &FieldPath, _lines: &[String]) {}

    /// Repeatable list of structured entries
    fn visit_entries(&mut self, _path: &FieldPath, _len: usize, _required: bool) {}
}

pub fn walk_article<V: Visitor>(visitor: &mut V, article: &Article) {
    let root = FieldPath::root();
    visitor.visit_required_text(&root.key("id"), &article.id);
    visitor.visit_required_text(&root.key("title"), &article.title);

    let meta = root.key("meta");
    visitor.visit_required_text(&meta.key("description"), &article.meta.description);
    visitor.visit_url(&meta.key("coverImage"), &article.meta.cover_image);

    if let Some(foreign_url) = &article.foreign_url {
        visitor.visit_url(&root.key("foreignUrl"), foreign_url);
    }

    let body = root.key("body");
    for (index, block) in article.body.iter().enumerate() {
        visitor.visit_block(&body.index(index), block);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, path: &FieldPath, block: &Block) {
    let content = path.key("content");

    match block {
        Block::Tag { .. } | Block::Divider => {}

        Block::H1 { content: lines }
        | Block::H2 { content: lines }
        | Block::H3 { content: lines }
        | Block::ListDecimal { content: lines }
        | Block::ListDot { content: lines } => {
            visitor.visit_text_lines(&content, lines);
        }

        Block::Body { content: lines, hypertext } => {
            visitor.visit_text_lines(&content, lines);

            if let Some(hypertext) = hypertext {
                let list = path.key("hypertext");
                visitor.visit_entries(&list, hypertext.len(), false);
                for (i, entry) in hypertext.iter().enumerate() {
                    let entry_path = list.index(i);
                    visitor.visit_required_text(&entry_path.key("keyword"), &entry.keyword);
                    visitor.visit_url(&entry_path.key("href"), &entry.href);
                }
            }
        }

        Block::Image { content: images } => {
            visitor.visit_entries(&content, images.len(), false);
            for (i, image) in images.iter().enumerate() {
                let entry_path = content.index(i);
                visitor.visit_url(&entry_path.key("src"), &image.src);
                visitor.visit_required_text(&entry_path.key("alt"), &image.alt);
            }
        }

        Block::Callout { content: lines, cta } => {
            visitor.visit_text_lines(&content, lines);
            let cta_path = path.key("cta");
            visitor.visit_required_text(&cta_path.key("text"), &cta.text);
            visitor.visit_url(&cta_path.key("action"), &cta.action);
        }

        Block::Hyperlink { content: links } => {
            visitor.visit_entries(&content, links.len(), true);
            for (i, link) in links.iter().enumerate() {
                let entry_path = content.index(i);
                visitor.visit_required_text(&entry_path.key("title"), &link.title);
                visitor.visit_url(&entry_path.key("href"), &link.href);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_block, BlockKind};

    #[derive(Default)]
    struct UrlCollector {
        urls: Vec<(String, String)>,
    }

    impl Visitor for UrlCollector {
        fn visit_url(&mut self, path: &FieldPath, value: &str) {
            self.urls.push((path.to_string(), value.to_string()));
        }
    }

    #[test]
    fn test_visitor_reaches_nested_urls() {
        let mut article = Article::with_id("a");
        article.body.push(default_block(BlockKind::Divider));
        article.body.push(default_block(BlockKind::Hyperlink));
        article.body.push(default_block(BlockKind::Callout));

        let mut collector = UrlCollector::default();
        collector.visit_article(&article);

        let paths: Vec<&str> = collector.urls.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["meta.coverImage", "body.1.content.0.href", "body.2.cta.action"]
        );
    }
}
