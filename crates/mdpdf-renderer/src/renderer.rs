//! Markdown to XHTML renderer.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream};

use crate::RenderError;
use crate::autolink::linkify;
use crate::highlight::highlight_code;
use crate::state::{
    CodeBlockState, HeadingState, ImageState, TableState, escape_html, heading_level_to_num,
};

/// Renders markdown to an XHTML fragment suitable for print.
///
/// Supports GitHub-flavored extensions (tables, strikethrough, task lists and
/// bare-URL autolinks) and definition lists. Single newlines inside a
/// paragraph become `<br />`, headings get stable slug ids, fenced code is
/// syntax highlighted and raw HTML passes through untouched.
///
/// A renderer is consumed by [`render`](Self::render); heading id
/// de-duplication is scoped to a single document.
pub struct MarkdownRenderer {
    output: String,
    /// Code block rendering state.
    code: CodeBlockState,
    /// Table rendering state.
    table: TableState,
    /// Image alt text capture state.
    image: ImageState,
    /// Heading id state.
    heading: HeadingState,
    /// Pending image data (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    /// Nesting depth of explicit links; bare URLs inside them stay text.
    link_depth: usize,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            link_depth: 0,
        }
    }

    /// Parser extensions enabled for every document.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_DEFINITION_LIST
    }

    /// Render a markdown document to XHTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Highlighting`] if a code block cannot be
    /// highlighted.
    pub fn render(mut self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        for event in TextMergeStream::new(parser) {
            self.process_event(event)?;
        }
        Ok(self.output)
    }

    /// Push content to output or heading buffer based on context.
    ///
    /// Markup inside image alt text is dropped; only its text is kept.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => self.output.push_str("<hr />"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                self.link_depth += 1;
                let scheme = if link_type == LinkType::Email { "mailto:" } else { "" };
                let mut link_tag = format!(r#"<a href="{scheme}{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link_tag, r#" title="{}""#, escape_html(&title));
                }
                link_tag.push('>');
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Start collecting alt text; image will be rendered in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    let _ = write!(
                        self.output,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        html.trim()
                    );
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let html = highlight_code(lang.as_deref(), &content)?;
                self.output.push_str(&html);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let mut img = format!(
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&src),
                        escape_html(&alt)
                    );
                    if !title.is_empty() {
                        let _ = write!(img, r#" title="{}""#, escape_html(&title));
                    }
                    img.push_str(" />");
                    self.push_inline(&img);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.push_inline("</a>");
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image > heading > normal text
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        let html = if self.link_depth > 0 {
            escape_html(text)
        } else {
            linkify(text)
        };

        if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&html);
            return;
        }

        self.output.push_str(&html);
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn raw_html(&mut self, html: &str) {
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(" ");
        }
        self.push_inline("<br />\n");
    }

    fn hard_break(&mut self) {
        self.push_inline("<br />\n");
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str(r#"<input type="checkbox" checked="checked" disabled="disabled" /> "#);
        } else {
            self.output
                .push_str(r#"<input type="checkbox" disabled="disabled" /> "#);
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
