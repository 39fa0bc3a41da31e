//! # Editor Dispatcher
//!
//! Maps each block to the set of form controls that edit it. The match on
//! [`Block`] is exhaustive, so a new variant does not compile until it has
//! an editor here. Error messages come from a [`ValidationReport`] and are
//! attached to the control whose path they name.

use folio_model::{is_blank, Article, Block, Category, FieldPath, ValidationReport, REQUIRED};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectOption {
    pub value: Category,
    pub label: &'static str,
}

/// One form control, addressed by the path of the field it edits.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    Select {
        path: FieldPath,
        value: Category,
        options: Vec<SelectOption>,
    },

    #[serde(rename_all = "camelCase")]
    TextLines {
        path: FieldPath,
        lines: Vec<String>,
        line_errors: Vec<Option<String>>,
        can_remove: bool,
        error: Option<String>,
    },

    Text {
        path: FieldPath,
        value: String,
        multiline: bool,
        error: Option<String>,
    },

    Url {
        path: FieldPath,
        value: String,
        error: Option<String>,
    },

    /// URL entry or upload
    ImageSource {
        path: FieldPath,
        value: String,
        error: Option<String>,
    },

    /// Repeatable group of entries, each with its own controls
    Entries {
        path: FieldPath,
        entries: Vec<Vec<Control>>,
        error: Option<String>,
    },
}

impl Control {
    pub fn path(&self) -> &FieldPath {
        match self {
            Control::Select { path, .. }
            | Control::TextLines { path, .. }
            | Control::Text { path, .. }
            | Control::Url { path, .. }
            | Control::ImageSource { path, .. }
            | Control::Entries { path, .. } => path,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Control::Select { .. } => None,
            Control::TextLines { error, .. }
            | Control::Text { error, .. }
            | Control::Url { error, .. }
            | Control::ImageSource { error, .. }
            | Control::Entries { error, .. } => error.as_deref(),
        }
    }
}

/// Editor for one body block
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockEditor {
    pub index: usize,
    pub kind: folio_model::BlockKind,
    /// Upper-cased type tag shown above the controls
    pub label: String,
    /// Controls are withheld while the block is being dragged
    pub dragging: bool,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleEditor {
    pub meta: Vec<Control>,
    pub blocks: Vec<BlockEditor>,
}

/// Build the whole editing surface for an article.
pub fn article_editor(
    article: &Article,
    report: &ValidationReport,
    dragging: Option<usize>,
) -> ArticleEditor {
    let root = FieldPath::root();
    let mut meta = vec![
        text(root.key("id"), &article.id, false, report),
        text(root.key("title"), &article.title, false, report),
        select(root.key("category"), article.category),
        text(
            root.key("meta").key("description"),
            &article.meta.description,
            true,
            report,
        ),
        image_source(
            root.key("meta").key("coverImage"),
            &article.meta.cover_image,
            report,
        ),
    ];
    if let Some(foreign_url) = &article.foreign_url {
        meta.push(url(root.key("foreignUrl"), foreign_url, report));
    }

    let blocks = article
        .body
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let mut editor = block_editor(index, block, report);
            if dragging == Some(index) {
                editor.dragging = true;
                editor.controls.clear();
            }
            editor
        })
        .collect();

    ArticleEditor { meta, blocks }
}

/// Build the editor for the block at `index`.
pub fn block_editor(index: usize, block: &Block, report: &ValidationReport) -> BlockEditor {
    let path = FieldPath::root().key("body").index(index);
    let content = path.key("content");

    let controls = match block {
        Block::Tag { content: category } => vec![select(content, *category)],

        Block::H1 { content: lines }
        | Block::H2 { content: lines }
        | Block::H3 { content: lines }
        | Block::ListDecimal { content: lines }
        | Block::ListDot { content: lines } => vec![text_lines(content, lines, report)],

        Block::Body {
            content: lines,
            hypertext,
        } => {
            let list = path.key("hypertext");
            let entries = hypertext
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    vec![
                        text(list.index(i).key("keyword"), &entry.keyword, false, report),
                        url(list.index(i).key("href"), &entry.href, report),
                    ]
                })
                .collect();
            vec![
                text_lines(content, lines, report),
                entries_control(list, entries, report),
            ]
        }

        Block::Image { content: images } => {
            let entries = images
                .iter()
                .enumerate()
                .map(|(i, image)| {
                    vec![
                        image_source(content.index(i).key("src"), &image.src, report),
                        text(content.index(i).key("alt"), &image.alt, false, report),
                    ]
                })
                .collect();
            vec![entries_control(content, entries, report)]
        }

        Block::Callout {
            content: lines,
            cta,
        } => {
            let cta_path = path.key("cta");
            vec![
                text_lines(content, lines, report),
                text(cta_path.key("text"), &cta.text, false, report),
                url(cta_path.key("action"), &cta.action, report),
            ]
        }

        Block::Divider => Vec::new(),

        Block::Hyperlink { content: links } => {
            let entries = links
                .iter()
                .enumerate()
                .map(|(i, link)| {
                    vec![
                        text(content.index(i).key("title"), &link.title, false, report),
                        url(content.index(i).key("href"), &link.href, report),
                    ]
                })
                .collect();
            vec![entries_control(content, entries, report)]
        }
    };

    let kind = block.kind();
    BlockEditor {
        index,
        kind,
        label: kind.label(),
        dragging: false,
        controls,
    }
}

fn message(report: &ValidationReport, path: &FieldPath) -> Option<String> {
    report.error_at(path).map(|e| e.message.clone())
}

fn select(path: FieldPath, value: Category) -> Control {
    Control::Select {
        path,
        value,
        options: Category::ALL
            .iter()
            .map(|category| SelectOption {
                value: *category,
                label: category.label(),
            })
            .collect(),
    }
}

fn text_lines(path: FieldPath, lines: &[String], report: &ValidationReport) -> Control {
    Control::TextLines {
        error: message(report, &path),
        line_errors: lines
            .iter()
            .map(|line| is_blank(line).then(|| REQUIRED.to_string()))
            .collect(),
        can_remove: lines.len() > 1,
        lines: lines.to_vec(),
        path,
    }
}

fn text(path: FieldPath, value: &str, multiline: bool, report: &ValidationReport) -> Control {
    Control::Text {
        error: message(report, &path),
        value: value.to_string(),
        multiline,
        path,
    }
}

fn url(path: FieldPath, value: &str, report: &ValidationReport) -> Control {
    Control::Url {
        error: message(report, &path),
        value: value.to_string(),
        path,
    }
}

fn image_source(path: FieldPath, value: &str, report: &ValidationReport) -> Control {
    Control::ImageSource {
        error: message(report, &path),
        value: value.to_string(),
        path,
    }
}

fn entries_control(path: FieldPath, entries: Vec<Vec<Control>>, report: &ValidationReport) -> Control {
    Control::Entries {
        error: message(report, &path),
        entries,
        path,
    }
}
