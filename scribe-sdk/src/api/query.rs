//! Query parameters for listings.

use scribe_common::{PostStatus, constants::DEFAULT_PAGE_LIMIT};

/// Filters for `GET /posts`.
///
/// Only present values are sent, in the fixed order
/// `search, tag, author, status, sortBy, page, limit`. Empty strings and a
/// zero page or limit count as absent.
///
/// ```
/// use scribe::api::PostFilters;
///
/// let filters = PostFilters::default().search("a").tag("b").page(2);
/// assert_eq!(filters.to_query_string(), "search=a&tag=b&page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct PostFilters {
    #[allow(missing_docs)]
    pub search: Option<String>,
    #[allow(missing_docs)]
    pub tag: Option<String>,
    /// Author id.
    pub author: Option<String>,
    #[allow(missing_docs)]
    pub status: Option<PostStatus>,
    /// Server-defined sort key, passed through verbatim.
    pub sort_by: Option<String>,
    #[allow(missing_docs)]
    pub page: Option<u32>,
    #[allow(missing_docs)]
    pub limit: Option<u32>,
}

impl PostFilters {
    #[allow(missing_docs)]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[allow(missing_docs)]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[allow(missing_docs)]
    pub fn author(mut self, author_id: impl Into<String>) -> Self {
        self.author = Some(author_id.into());
        self
    }

    #[allow(missing_docs)]
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[allow(missing_docs)]
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.sort_by = Some(key.into());
        self
    }

    #[allow(missing_docs)]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[allow(missing_docs)]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Ordered query pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "search", self.search.as_deref());
        push_text(&mut pairs, "tag", self.tag.as_deref());
        push_text(&mut pairs, "author", self.author.as_deref());
        push_text(&mut pairs, "status", self.status.map(|s| s.as_str()));
        push_text(&mut pairs, "sortBy", self.sort_by.as_deref());
        push_number(&mut pairs, "page", self.page);
        push_number(&mut pairs, "limit", self.limit);
        pairs
    }

    /// URL-encoded form of [`Self::to_query`], without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query())
            .finish()
    }
}

fn push_text(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        pairs.push((key.to_string(), v.to_string()));
    }
}

fn push_number(pairs: &mut Vec<(String, String)>, key: &str, value: Option<u32>) {
    if let Some(v) = value.filter(|v| *v > 0) {
        pairs.push((key.to_string(), v.to_string()));
    }
}

/// Page selection for listings that always send `page` and `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based.
    pub page: u32,
    #[allow(missing_docs)]
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageQuery {
    #[allow(missing_docs)]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// `page`, `limit` pairs.
    pub fn to_query(self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Selection for `GET /comments`.
///
/// Without `parent_id` the server returns root comments of the post; with it,
/// the replies to that comment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CommentQuery {
    #[allow(missing_docs)]
    pub post_id: String,
    #[allow(missing_docs)]
    pub parent_id: Option<String>,
    #[allow(missing_docs)]
    pub page: PageQuery,
}

impl CommentQuery {
    /// First page of root comments on `post_id`.
    pub fn for_post(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            parent_id: None,
            page: PageQuery::default(),
        }
    }

    /// Replies to `parent_id` instead of root comments.
    pub fn replies_to(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[allow(missing_docs)]
    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = PageQuery::new(page, limit);
        self
    }

    /// `postId, parentId?, page, limit`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("postId".to_string(), self.post_id.clone())];
        push_text(&mut pairs, "parentId", self.parent_id.as_deref());
        pairs.extend(self.page.to_query());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_filters_keep_fixed_order() {
        let filters = PostFilters::default()
            .limit(5)
            .page(3)
            .sort_by("popular")
            .status(PostStatus::Published)
            .author("u1")
            .tag("rust")
            .search("async io");
        assert_eq!(
            filters.to_query_string(),
            "search=async+io&tag=rust&author=u1&status=published&sortBy=popular&page=3&limit=5"
        );
    }

    #[test]
    fn empty_values_are_omitted() {
        let filters = PostFilters::default().search("").page(0);
        assert!(filters.to_query().is_empty());
    }

    #[test]
    fn comment_query_shape() {
        let q = CommentQuery::for_post("p1").replies_to("c9").page(2, 20);
        let keys: Vec<_> = q.to_query().into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(keys, vec!["postId=p1", "parentId=c9", "page=2", "limit=20"]);

        let root = CommentQuery::for_post("p1").to_query();
        assert_eq!(root.len(), 3);
        assert_eq!(root[1], ("page".to_string(), "1".to_string()));
        assert_eq!(root[2], ("limit".to_string(), "10".to_string()));
    }
}
