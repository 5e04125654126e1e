use std::collections::HashSet;

use pulldown_cmark::{Options, Parser, html};

/// Render markdown to sanitized HTML for the preview pane.
///
/// Tables, footnotes, strikethrough and task lists are enabled. Scripts,
/// event handlers and unknown URL schemes are stripped; `data:` URLs are kept
/// so embedded images show up.
///
/// ```
/// let html = scribe::editor::render_preview("**hi** <script>alert(1)</script>");
/// assert!(html.contains("<strong>hi</strong>"));
/// assert!(!html.contains("<script>"));
/// ```
pub fn render_preview(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut unsafe_html = String::new();
    html::push_html(&mut unsafe_html, parser);

    let schemes: HashSet<&str> = ["http", "https", "mailto", "data"].into_iter().collect();
    ammonia::Builder::default()
        .url_schemes(schemes)
        .link_rel(Some("noopener noreferrer nofollow"))
        .clean(&unsafe_html)
        .to_string()
}

/// Plain text with every tag removed, for titles and excerpts.
pub fn strip_html(input: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
}
