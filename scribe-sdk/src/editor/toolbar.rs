/// Formatting buttons of the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    #[allow(missing_docs)]
    Bold,
    #[allow(missing_docs)]
    Italic,
    /// `- ` before every selected line.
    UnorderedList,
    /// `1. `, `2. `, ... before every selected line.
    OrderedList,
    /// `> ` before every selected line.
    Quote,
    /// Fenced code block around the selection.
    Code,
    #[allow(missing_docs)]
    Link,
    #[allow(missing_docs)]
    Image,
}

impl ToolbarAction {
    /// All actions, in toolbar order.
    pub const ALL: [ToolbarAction; 8] = [
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::UnorderedList,
        ToolbarAction::OrderedList,
        ToolbarAction::Quote,
        ToolbarAction::Code,
        ToolbarAction::Link,
        ToolbarAction::Image,
    ];

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::Bold => "Bold",
            ToolbarAction::Italic => "Italic",
            ToolbarAction::UnorderedList => "Bulleted list",
            ToolbarAction::OrderedList => "Numbered list",
            ToolbarAction::Quote => "Quote",
            ToolbarAction::Code => "Code block",
            ToolbarAction::Link => "Link",
            ToolbarAction::Image => "Image",
        }
    }

    /// Markup replacing `selected`. An empty selection gets a placeholder.
    pub fn markup(self, selected: &str) -> String {
        match (self, selected.is_empty()) {
            (ToolbarAction::Bold, true) => "**bold text**".to_string(),
            (ToolbarAction::Bold, false) => format!("**{selected}**"),
            (ToolbarAction::Italic, true) => "*italic text*".to_string(),
            (ToolbarAction::Italic, false) => format!("*{selected}*"),
            (ToolbarAction::UnorderedList, true) => "- list item".to_string(),
            (ToolbarAction::UnorderedList, false) => prefix_lines(selected, |_| "- ".into()),
            (ToolbarAction::OrderedList, true) => "1. list item".to_string(),
            (ToolbarAction::OrderedList, false) => {
                prefix_lines(selected, |i| format!("{}. ", i + 1))
            }
            (ToolbarAction::Quote, true) => "> quote".to_string(),
            (ToolbarAction::Quote, false) => prefix_lines(selected, |_| "> ".into()),
            (ToolbarAction::Code, true) => "```\ncode block\n```".to_string(),
            (ToolbarAction::Code, false) => format!("```\n{selected}\n```"),
            (ToolbarAction::Link, true) => "[link text](url)".to_string(),
            (ToolbarAction::Link, false) => format!("[{selected}](url)"),
            (ToolbarAction::Image, true) => "![alt text](url)".to_string(),
            (ToolbarAction::Image, false) => format!("![{selected}](url)"),
        }
    }
}

fn prefix_lines<F: Fn(usize) -> String>(text: &str, prefix: F) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| format!("{}{line}", prefix(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_for_empty_selection() {
        let expected = [
            "**bold text**",
            "*italic text*",
            "- list item",
            "1. list item",
            "> quote",
            "```\ncode block\n```",
            "[link text](url)",
            "![alt text](url)",
        ];
        for (action, markup) in ToolbarAction::ALL.iter().zip(expected) {
            assert_eq!(action.markup(""), markup, "{}", action.label());
        }
    }

    #[test]
    fn multi_line_selections_prefix_every_line() {
        assert_eq!(ToolbarAction::OrderedList.markup("a\nb\nc"), "1. a\n2. b\n3. c");
        assert_eq!(ToolbarAction::Quote.markup("a\n\nb"), "> a\n> \n> b");
        assert_eq!(ToolbarAction::UnorderedList.markup("x"), "- x");
    }

    #[test]
    fn wraps_selection() {
        assert_eq!(ToolbarAction::Bold.markup("hi"), "**hi**");
        assert_eq!(ToolbarAction::Code.markup("let x = 1;"), "```\nlet x = 1;\n```");
        assert_eq!(ToolbarAction::Link.markup("docs"), "[docs](url)");
    }
}
