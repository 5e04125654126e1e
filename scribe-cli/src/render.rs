//! Plain text rendering of API payloads for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use scribe::{Comment, Dashboard, Page, Post, User};

fn date(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One line per post.
pub fn post_line(post: &Post) -> String {
    let author = post.author.name().unwrap_or(post.author.id());
    let mut line = format!(
        "{}  {} [{}] by {} on {}  ♥ {}  👁 {}",
        post.id,
        post.title,
        post.status,
        author,
        date(post.created_at),
        post.like_count,
        post.view_count
    );
    if !post.tags.is_empty() {
        let _ = write!(line, "  #{}", post.tags.join(" #"));
    }
    line
}

/// Full post with its markdown body.
pub fn post_detail(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", post.title);
    let _ = writeln!(out, "{}", "=".repeat(post.title.chars().count().max(3)));
    let _ = writeln!(
        out,
        "{} | {} | by {} | {} likes | {} views",
        post.status,
        date(post.created_at),
        post.author.name().unwrap_or(post.author.id()),
        post.like_count,
        post.view_count
    );
    if !post.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", post.tags.join(", "));
    }
    if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "\n> {excerpt}");
    }
    let _ = writeln!(out, "\n{}", post.content);
    out
}

/// Comments with nested replies indented under their parent.
pub fn comment_tree(comments: &[Comment]) -> String {
    let mut out = String::new();
    for comment in comments {
        write_comment(&mut out, comment, 0);
    }
    out
}

fn write_comment(out: &mut String, comment: &Comment, depth: usize) {
    let indent = "  ".repeat(depth);
    let edited = if comment.is_edited { " (edited)" } else { "" };
    let _ = writeln!(
        out,
        "{indent}{} {} on {}{edited}  ♥ {}",
        comment.id,
        comment.author.name().unwrap_or(comment.author.id()),
        date(comment.created_at),
        comment.like_count
    );
    for line in comment.content.lines() {
        let _ = writeln!(out, "{indent}  {line}");
    }
    for image in &comment.images {
        let _ = writeln!(out, "{indent}  [image] {image}");
    }
    for reply in &comment.replies {
        write_comment(out, reply, depth + 1);
    }
}

/// One line per user.
pub fn user_line(user: &User) -> String {
    format!(
        "{}  {} <{}> [{}] joined {}",
        user.id,
        user.name,
        user.email,
        user.role,
        date(user.created_at)
    )
}

/// Totals plus recent activity.
pub fn dashboard(dashboard: &Dashboard) -> String {
    let stats = &dashboard.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Users:     {}", stats.total_users);
    let _ = writeln!(
        out,
        "Posts:     {} ({} published, {} drafts)",
        stats.total_posts, stats.published_posts, stats.draft_posts
    );
    let _ = writeln!(out, "Comments:  {}", stats.total_comments);
    let _ = writeln!(out, "Views:     {}", dashboard.total_views());
    let _ = writeln!(out, "Likes:     {}", dashboard.total_likes());
    section(&mut out, "Recent users", dashboard.recent_users.iter().map(user_line));
    section(&mut out, "Recent posts", dashboard.recent_posts.iter().map(post_line));
    section(&mut out, "Popular posts", dashboard.popular_posts.iter().map(post_line));
    out
}

fn section(out: &mut String, title: &str, lines: impl Iterator<Item = String>) {
    let mut lines = lines.peekable();
    if lines.peek().is_none() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
}

/// `page 2/5 (48 results)`, or the item count when the server sent no
/// pagination block.
pub fn page_footer<T>(page: &Page<T>) -> String {
    match &page.pagination {
        Some(p) => format!(
            "page {}/{} ({} results)",
            p.page, p.total_pages, p.total_results
        ),
        None => format!("{} results", page.count),
    }
}

/// Lines of `items` followed by the page footer.
pub fn page<T>(page: &Page<T>, line: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    if page.items.is_empty() {
        let _ = writeln!(out, "Nothing here yet.");
    }
    for item in &page.items {
        let _ = writeln!(out, "{}", line(item));
    }
    let _ = write!(out, "{}", page_footer(page));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe::Pagination;

    fn comment(id: &str, content: &str, replies: Vec<Comment>) -> Comment {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "content": content,
            "post": "p1",
            "author": { "_id": "u1", "name": "Ann" },
        }))
        .map(|c: Comment| Comment { replies, ..c })
        .unwrap()
    }

    #[test]
    fn replies_are_indented() {
        let tree = comment_tree(&[comment("c1", "First", vec![comment("c2", "Reply", vec![])])]);
        let lines: Vec<_> = tree.lines().collect();
        assert!(lines[0].starts_with("c1 Ann"));
        assert_eq!(lines[1], "  First");
        assert!(lines[2].starts_with("  c2 Ann"));
        assert_eq!(lines[3], "    Reply");
    }

    #[test]
    fn footer_prefers_pagination() {
        let mut page = Page::<u32> {
            items: vec![1, 2],
            count: 2,
            pagination: None,
        };
        assert_eq!(page_footer(&page), "2 results");
        page.pagination = Some(Pagination {
            page: 2,
            limit: 2,
            total_pages: 5,
            total_results: 10,
        });
        assert_eq!(page_footer(&page), "page 2/5 (10 results)");
    }
}
