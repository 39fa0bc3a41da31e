use crate::hypertext::{substitute_hypertext, Segment};
use folio_model::{Article, Block, BlockKind, CallToAction, Hypertext, ImageSource, Link};
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Malformed block at index {index}: {reason}")]
    MalformedBlock { index: usize, reason: String },

    #[error("Malformed article: {0}")]
    MalformedArticle(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

pub(crate) struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    pub(crate) fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a whole article to a standalone HTML page
pub fn compile_article(article: &Article, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&article.title, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(&format!(
        "<article id=\"{}\" class=\"folio-article\" data-category=\"{}\">",
        escape_html(&article.id),
        article.category
    ));
    ctx.indent();

    for block in &article.body {
        compile_block_into(block, &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</article>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

/// Compile the live-preview pane. The block at `hidden` (the one being
/// dragged) is left out.
pub fn compile_preview(blocks: &[Block], hidden: Option<usize>, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);

    for (index, block) in blocks.iter().enumerate() {
        if Some(index) == hidden {
            continue;
        }
        compile_block_into(block, &mut ctx);
    }

    ctx.get_output()
}

/// Compile a single block to an HTML fragment
pub fn compile_block(block: &Block, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    compile_block_into(block, &mut ctx);
    ctx.get_output()
}

/// Article card shown by the meta preview: cover, title, description.
pub fn compile_meta_card(article: &Article, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<div class=\"meta-card\">");
    ctx.indent();
    if !article.meta.cover_image.is_empty() {
        ctx.add_line(&format!(
            "<img class=\"meta-cover\" src=\"{}\" alt=\"{}\" />",
            escape_html(&article.meta.cover_image),
            escape_html(&article.title)
        ));
    }
    ctx.add_line(&format!(
        "<p class=\"meta-title\">{}</p>",
        escape_html(&article.title)
    ));
    ctx.add_line(&format!(
        "<p class=\"meta-description\">{}</p>",
        text_with_breaks(&article.meta.description)
    ));
    ctx.dedent();
    ctx.add_line("</div>");

    ctx.get_output()
}

/// Render an article given as raw JSON, tolerating block tags that are not
/// in the registry. Unknown tags fall back to a generic heading and are
/// logged; a known tag with a malformed payload is still an error.
pub fn compile_raw_article(
    value: &serde_json::Value,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let object = value
        .as_object()
        .ok_or_else(|| CompileError::MalformedArticle("expected a JSON object".to_string()))?;
    let title = object.get("title").and_then(|t| t.as_str()).unwrap_or_default();
    let id = object.get("id").and_then(|t| t.as_str()).unwrap_or_default();
    let body = match object.get("body") {
        Some(serde_json::Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(CompileError::MalformedArticle(
                "\"body\" must be an array".to_string(),
            ))
        }
        None => &[],
    };

    let mut ctx = Context::new(options);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();
    compile_head(title, &mut ctx);
    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(&format!(
        "<article id=\"{}\" class=\"folio-article\">",
        escape_html(id)
    ));
    ctx.indent();

    for (index, item) in body.iter().enumerate() {
        compile_raw_block(index, item, &mut ctx)?;
    }

    ctx.dedent();
    ctx.add_line("</article>");
    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

fn compile_raw_block(
    index: usize,
    value: &serde_json::Value,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    let tag = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| CompileError::MalformedBlock {
            index,
            reason: "missing \"type\"".to_string(),
        })?;

    if tag.parse::<BlockKind>().is_err() {
        tracing::warn!(index, tag, "unknown block type, rendering as heading");
        compile_fallback_heading(tag, value, ctx);
        return Ok(());
    }

    let block: Block =
        serde_json::from_value(value.clone()).map_err(|e| CompileError::MalformedBlock {
            index,
            reason: e.to_string(),
        })?;
    compile_block_into(&block, ctx);
    Ok(())
}

fn compile_fallback_heading(tag: &str, value: &serde_json::Value, ctx: &mut Context) {
    let lines: Vec<&str> = value
        .get("content")
        .and_then(|c| c.as_array())
        .map(|items| items.iter().filter_map(|item| item.as_str()).collect())
        .unwrap_or_default();
    let text = if lines.is_empty() {
        escape_html(tag)
    } else {
        lines
            .iter()
            .map(|line| escape_html(line))
            .collect::<Vec<_>>()
            .join("<br />")
    };

    ctx.add_line(&format!(
        "<h2 class=\"block-unknown\" data-type=\"{}\">{}</h2>",
        escape_html(tag),
        text
    ));
}

fn compile_head(title: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = if title.trim().is_empty() {
        "Untitled article"
    } else {
        title
    };
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));

    ctx.dedent();
    ctx.add_line("</head>");
}

pub(crate) fn compile_block_into(block: &Block, ctx: &mut Context) {
    match block {
        Block::Tag { content } => {
            ctx.add_line(&format!(
                "<div class=\"block-tag\" data-category=\"{}\">{}</div>",
                content,
                escape_html(content.label())
            ));
        }

        Block::H1 { content } => compile_heading("h1", content, ctx),
        Block::H2 { content } => compile_heading("h2", content, ctx),
        Block::H3 { content } => compile_heading("h3", content, ctx),

        Block::Body { content, hypertext } => {
            compile_body(content, hypertext.as_deref().unwrap_or_default(), ctx)
        }

        Block::Image { content } => compile_images(content, ctx),

        Block::Callout { content, cta } => compile_callout(content, cta, ctx),

        Block::Divider => ctx.add_line("<hr class=\"block-divider\" />"),

        Block::Hyperlink { content } => compile_hyperlinks(content, ctx),

        Block::ListDecimal { content } => compile_list("ol", "block-list-decimal", content, ctx),
        Block::ListDot { content } => compile_list("ul", "block-list-dot", content, ctx),
    }
}

fn compile_heading(level: &str, lines: &[String], ctx: &mut Context) {
    ctx.add_line(&format!(
        "<{level}>{}</{level}>",
        text_with_breaks(&lines.join("\n"))
    ));
}

fn compile_body(lines: &[String], hypertext: &[Hypertext], ctx: &mut Context) {
    let joined = lines.join("\n");
    let mut paragraph = String::new();

    for segment in substitute_hypertext(&joined, hypertext) {
        match segment {
            Segment::Text(text) => paragraph.push_str(&text_with_breaks(&text)),
            Segment::Link(entry) => paragraph.push_str(&format!(
                "<a class=\"hypertext\" href=\"{}\" target=\"_blank\" rel=\"noreferrer noopener\">{}</a>",
                escape_html(&entry.href),
                escape_html(&entry.keyword)
            )),
        }
    }

    ctx.add_line("<div class=\"block-body\">");
    ctx.indent();
    ctx.add_line(&format!("<p>{}</p>", paragraph));
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_images(images: &[ImageSource], ctx: &mut Context) {
    ctx.add_line("<div class=\"block-image\">");
    ctx.indent();
    for image in images {
        ctx.add_line(&format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(&image.src),
            escape_html(&image.alt)
        ));
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_callout(lines: &[String], cta: &CallToAction, ctx: &mut Context) {
    ctx.add_line("<div class=\"block-callout\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<div class=\"callout-content\">{}</div>",
        text_with_breaks(&lines.join("\n"))
    ));
    ctx.add_line(&format!(
        "<a class=\"callout-cta\" href=\"{}\" target=\"_blank\" rel=\"noreferrer noopener\">{}</a>",
        escape_html(&cta.action),
        escape_html(&cta.text)
    ));
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_hyperlinks(links: &[Link], ctx: &mut Context) {
    ctx.add_line("<div class=\"block-hyperlink\">");
    ctx.indent();
    for link in links {
        ctx.add_line(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer noopener\">{}</a>",
            escape_html(&link.href),
            escape_html(&link.title)
        ));
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_list(tag: &str, class: &str, items: &[String], ctx: &mut Context) {
    ctx.add_line(&format!("<{} class=\"{}\">", tag, class));
    ctx.indent();
    for item in items {
        ctx.add_line(&format!("<li>{}</li>", escape_html(item)));
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
}

/// Escape text and keep its line breaks
fn text_with_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br />")
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
