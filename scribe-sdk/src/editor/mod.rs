//! Markdown editing surface: toolbar splicing, preview and image embedding.

mod image;
mod preview;
mod toolbar;

use std::ops::Range;

pub use image::{ALLOWED_IMAGE_TYPES, ImageError, ImageFile, MAX_IMAGE_SIZE, image_markdown};
pub use preview::{render_preview, strip_html};
pub use toolbar::ToolbarAction;

/// Markdown text plus a selection, both addressed in characters.
///
/// ```
/// use scribe::editor::{Editor, ToolbarAction};
///
/// let mut editor = Editor::new("make this loud");
/// editor.select(10..14);
/// editor.apply(ToolbarAction::Bold);
/// assert_eq!(editor.text(), "make this **loud**");
/// assert_eq!(editor.selected_text(), "**loud**");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    text: String,
    selection: Range<usize>,
}

impl Editor {
    /// Editor over `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: end..end,
        }
    }

    #[allow(missing_docs)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[allow(missing_docs)]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Current selection; empty when it is just a cursor.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Select `range`, clamped to the text and reordered if reversed.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.text.chars().count();
        let (a, b) = (range.start.min(len), range.end.min(len));
        self.selection = a.min(b)..a.max(b);
    }

    /// Put the cursor at `offset`.
    pub fn set_cursor(&mut self, offset: usize) {
        self.select(offset..offset);
    }

    #[allow(missing_docs)]
    pub fn selected_text(&self) -> &str {
        let range = self.byte_range();
        &self.text[range]
    }

    /// Replace the selection with `snippet`; the cursor lands right after it.
    pub fn insert(&mut self, snippet: &str) {
        let start = self.splice(snippet);
        let end = start + snippet.chars().count();
        self.selection = end..end;
    }

    /// Replace the selection with the markup of `action`; the new selection
    /// covers the inserted markup.
    pub fn apply(&mut self, action: ToolbarAction) {
        let markup = action.markup(self.selected_text());
        let start = self.splice(&markup);
        self.selection = start..start + markup.chars().count();
    }

    /// Embed `image` at the cursor.
    pub fn insert_image(&mut self, image: &ImageFile) {
        self.insert(&image_markdown(image));
    }

    /// Sanitized HTML of the whole text.
    pub fn preview(&self) -> String {
        render_preview(&self.text)
    }

    /// Replace the selected bytes, returning the selection start in chars.
    fn splice(&mut self, replacement: &str) -> usize {
        let start = self.selection.start;
        let range = self.byte_range();
        self.text.replace_range(range, replacement);
        start
    }

    fn byte_range(&self) -> Range<usize> {
        self.byte_offset(self.selection.start)..self.byte_offset(self.selection.end)
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}
