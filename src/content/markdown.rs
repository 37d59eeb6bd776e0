//! Markdown rendering
//!
//! Supports the subset of markdown the article corpus uses: headings,
//! emphasis, lists, links, inline code and fenced code blocks. The event
//! stream is rewritten in three places:
//!
//! - headings of level 2 to 6 get an `id` slugified from their text and a
//!   copy-link anchor,
//! - links open in a new tab without a referrer (in-page `#` links excepted),
//! - fenced code blocks are emitted as `<pre><code class="language-x">`, or
//!   highlighted with syntect when enabled.
//!
//! Anything outside that subset is rendered on a best-effort basis.

use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::{html_escape, normalize_slug};

/// Label of the copy-link affordance next to each section heading
const ANCHOR_LABEL: &str = "Copier le lien vers cette section";

/// Markdown renderer with optional syntax highlighting
#[derive(Default)]
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

/// A heading whose events are held back until its text is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    text: String,
    events: Vec<Event<'a>>,
}

struct PendingCode {
    lang: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a renderer emitting plain code blocks
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create a renderer that highlights fenced code with the named theme
    pub fn with_highlighting(theme_name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut theme_set = ThemeSet::load_defaults();

        let theme = theme_set.themes.remove(theme_name).or_else(|| {
            tracing::warn!(
                "Unknown highlight theme {:?}, using the first bundled theme",
                theme_name
            );
            theme_set.themes.into_values().next()
        });

        Self {
            highlighter: theme.map(|theme| Highlighter { syntax_set, theme }),
        }
    }

    /// Create from site configuration
    pub fn from_config(config: &HighlightConfig) -> Self {
        if config.enable {
            Self::with_highlighting(&config.theme)
        } else {
            Self::new()
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<PendingHeading> = None;
        let mut code: Option<PendingCode> = None;

        for event in parser {
            if code.is_some() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(block) = code.take() {
                            let html = self.render_code_block(&block.code, block.lang.as_deref());
                            events.push(Event::Html(CowStr::from(html)));
                        }
                    }
                    Event::Text(text) => {
                        if let Some(block) = code.as_mut() {
                            block.code.push_str(&text);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some(PendingCode {
                        lang,
                        code: String::new(),
                    });
                }
                Event::Start(Tag::Heading { level, .. }) if level != HeadingLevel::H1 => {
                    heading = Some(PendingHeading {
                        level,
                        text: String::new(),
                        events: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    if let Some(pending) = heading.take() {
                        push_heading(&mut events, pending);
                    }
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let html = open_link(link_type, &dest_url, &title);
                    sink(&mut heading, &mut events).push(Event::InlineHtml(CowStr::from(html)));
                }
                Event::End(TagEnd::Link) => {
                    sink(&mut heading, &mut events).push(Event::InlineHtml(CowStr::from("</a>")));
                }
                other => {
                    if let Some(pending) = heading.as_mut() {
                        if let Event::Text(text) | Event::Code(text) = &other {
                            pending.text.push_str(text);
                        }
                    }
                    sink(&mut heading, &mut events).push(other);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        if let Some(highlighter) = &self.highlighter {
            if let Some(html) = highlighter.highlight(code, lang) {
                return html;
            }
        }

        match lang {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                html_escape(lang),
                html_escape(code)
            ),
            None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }
}

impl Highlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> Option<String> {
        let token = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => Some(format!(
                "<figure class=\"highlight {}\">{}</figure>\n",
                html_escape(token),
                highlighted
            )),
            Err(e) => {
                tracing::debug!("Highlighting failed for {:?}: {}", token, e);
                None
            }
        }
    }
}

/// Where the next event goes: the pending heading, or the document
fn sink<'h, 'a>(
    heading: &'h mut Option<PendingHeading<'a>>,
    events: &'h mut Vec<Event<'a>>,
) -> &'h mut Vec<Event<'a>> {
    match heading {
        Some(pending) => &mut pending.events,
        None => events,
    }
}

fn push_heading<'a>(events: &mut Vec<Event<'a>>, pending: PendingHeading<'a>) {
    let level = pending.level as usize;
    let id = normalize_slug(&pending.text);

    if id.is_empty() {
        events.push(Event::Html(CowStr::from(format!("<h{}>", level))));
        events.extend(pending.events);
        events.push(Event::Html(CowStr::from(format!("</h{}>\n", level))));
        return;
    }

    events.push(Event::Html(CowStr::from(format!(
        "<h{} id=\"{}\">",
        level, id
    ))));
    events.extend(pending.events);
    events.push(Event::Html(CowStr::from(format!(
        "<a class=\"heading-anchor\" href=\"#{id}\" data-copy-anchor=\"{id}\" aria-label=\"{label}\" title=\"{label}\">#</a></h{level}>\n",
        id = id,
        label = ANCHOR_LABEL,
        level = level
    ))));
}

fn open_link(link_type: LinkType, dest: &str, title: &str) -> String {
    let href = if link_type == LinkType::Email {
        format!("mailto:{}", dest)
    } else {
        dest.to_string()
    };

    let mut html = format!("<a href=\"{}\"", html_escape(&href));
    if !title.is_empty() {
        html.push_str(&format!(" title=\"{}\"", html_escape(title)));
    }
    if !dest.starts_with('#') {
        html.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
    }
    html.push('>');
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render(markdown)
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_anchor() {
        let html = render("## Mon Titre\n\nTexte.");
        assert!(html.contains("<h2 id=\"mon-titre\">Mon Titre<a class=\"heading-anchor\""));
        assert!(html.contains("href=\"#mon-titre\""));
        assert!(html.contains("data-copy-anchor=\"mon-titre\""));
        assert!(html.contains("</a></h2>"));
    }

    #[test]
    fn test_heading_anchor_strips_accents_and_markup() {
        let html = render("### L'essor de `TypeScript` & *Sécurité*");
        assert!(html.contains("<h3 id=\"l-essor-de-typescript-securite\">"));
        assert!(html.contains("<code>TypeScript</code>"));
        assert!(html.contains("<em>Sécurité</em>"));
    }

    #[test]
    fn test_all_section_levels_get_anchors() {
        let html = render("## Deux\n\n### Trois\n\n#### Quatre\n\n##### Cinq\n\n###### Six");
        for (level, id) in [(2, "deux"), (3, "trois"), (4, "quatre"), (5, "cinq"), (6, "six")] {
            assert!(html.contains(&format!("<h{} id=\"{}\">", level, id)));
        }
    }

    #[test]
    fn test_emphasis() {
        let html = render("Du **gras** et de l'*italique*.");
        assert!(html.contains("<strong>gras</strong>"));
        assert!(html.contains("<em>italique</em>"));
    }

    #[test]
    fn test_lists_are_single_containers() {
        let html = render("* un\n* deux\n* trois\n\n1. premier\n2. second\n");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 5);
        assert!(html.contains("<li>deux</li>"));
        assert!(html.contains("<li>second</li>"));
    }

    #[test]
    fn test_links_open_externally() {
        let html = render("Voir [Vite](https://vitejs.dev) ou [plus bas](#suite).");
        assert!(html.contains(
            "<a href=\"https://vitejs.dev\" target=\"_blank\" rel=\"noopener noreferrer\">Vite</a>"
        ));
        assert!(html.contains("<a href=\"#suite\">plus bas</a>"));
    }

    #[test]
    fn test_link_inside_heading() {
        let html = render("## Lire [la doc](https://docs.rs)");
        assert!(html.contains("<h2 id=\"lire-la-doc\">Lire <a href=\"https://docs.rs\""));
    }

    #[test]
    fn test_render_code_block() {
        let html = render("```rust\nfn main() {\n    println!(\"<hi>\");\n}\n```");
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() {"));
        assert!(html.contains("&lt;hi&gt;"));
        assert!(!html.contains("<p><pre>"));
    }

    #[test]
    fn test_code_block_without_language() {
        let html = render("```\nplain\n```");
        assert!(html.contains("<pre><code>plain\n</code></pre>"));
    }

    #[test]
    fn test_inline_code() {
        let html = render("Lancez `npm run build` ensuite.");
        assert!(html.contains("<code>npm run build</code>"));
    }

    #[test]
    fn test_no_empty_or_wrapping_paragraphs() {
        let html = render("\n\n\nPremier.\n\n\n\n## Titre\n\n* item\n\nDernier.\n\n\n");
        assert!(!html.contains("<p></p>"));
        assert!(!html.contains("<p><h2"));
        assert!(!html.contains("<p><ul>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let markdown = "## Titre\n\n* a\n* b\n\n```js\nx\n```\n";
        assert_eq!(render(markdown), render(markdown));
    }

    #[test]
    fn test_highlighted_code_block() {
        let renderer = MarkdownRenderer::with_highlighting("base16-ocean.dark");
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("<figure class=\"highlight rust\">"));
        assert!(html.contains("<pre style="));
    }

    #[test]
    fn test_from_config_disabled_by_default() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig::default());
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("class=\"language-rust\""));
    }
}
