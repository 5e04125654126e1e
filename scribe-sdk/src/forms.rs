//! Client-side form validation.
//!
//! Every form is checked before anything is sent; a non-empty
//! [`FieldErrors`] blocks the request entirely.

use std::fmt;

use scribe_common::{PostStatus, constants::MIN_PASSWORD_LEN};

use crate::api::form::Upload;
use crate::api::{CommentUpdate, NewComment, NewPost, PostUpdate, ProfileUpdate};

/// Validation failures keyed by field name, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`. The first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn check_new_password(
    errors: &mut FieldErrors,
    field: &'static str,
    password: &str,
    confirm: &str,
    too_short: &str,
) {
    if password.is_empty() {
        errors.add(field, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(field, too_short);
    }
    if password != confirm {
        errors.add("confirmPassword", "Passwords do not match");
    }
}

/// Trim, drop empties and de-duplicate tags, keeping first-seen order.
///
/// ```
/// use scribe::forms::normalize_tags;
///
/// assert_eq!(normalize_tags([" rust", "web ", "rust", ""]), vec!["rust", "web"]);
/// ```
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Split a comma-separated tag input and normalize it.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Sign-up form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub password: String,
    #[allow(missing_docs)]
    pub confirm_password: String,
    #[allow(missing_docs)]
    pub avatar: Option<Upload>,
}

impl RegisterForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        check_new_password(
            &mut errors,
            "password",
            &self.password,
            &self.confirm_password,
            "Password must be at least 6 characters",
        );
        errors.into_result()
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub password: String,
}

impl LoginForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

/// Request a reset link.
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    #[allow(missing_docs)]
    pub email: String,
}

impl ForgotPasswordForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        errors.into_result()
    }
}

/// Choose a new password from a reset link.
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    #[allow(missing_docs)]
    pub password: String,
    #[allow(missing_docs)]
    pub confirm_password: String,
}

impl ResetPasswordForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_new_password(
            &mut errors,
            "password",
            &self.password,
            &self.confirm_password,
            "Password must be at least 6 characters",
        );
        errors.into_result()
    }
}

/// Change the password of the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct PasswordChangeForm {
    #[allow(missing_docs)]
    pub current_password: String,
    #[allow(missing_docs)]
    pub new_password: String,
    #[allow(missing_docs)]
    pub confirm_password: String,
}

impl PasswordChangeForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            errors.add("currentPassword", "Current password is required");
        }
        check_new_password(
            &mut errors,
            "newPassword",
            &self.new_password,
            &self.confirm_password,
            "New password must be at least 6 characters",
        );
        errors.into_result()
    }
}

/// Edit the profile of the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub bio: String,
    #[allow(missing_docs)]
    pub avatar: Option<Upload>,
}

impl ProfileForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        errors.into_result()
    }

    /// Validate and turn into the update payload.
    pub fn into_update(self) -> Result<ProfileUpdate, FieldErrors> {
        self.validate()?;
        Ok(ProfileUpdate {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            bio: Some(self.bio).filter(|b| !b.is_empty()),
            avatar: self.avatar,
        })
    }
}

/// Create or edit a post.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    #[allow(missing_docs)]
    pub title: String,
    /// Markdown body.
    pub content: String,
    #[allow(missing_docs)]
    pub excerpt: String,
    #[allow(missing_docs)]
    pub tags: Vec<String>,
    #[allow(missing_docs)]
    pub status: PostStatus,
    #[allow(missing_docs)]
    pub cover_image: Option<Upload>,
}

impl PostForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "content", &self.content, "Content is required");
        errors.into_result()
    }

    /// Validate and build the create payload. Tags are normalized.
    pub fn into_new_post(self) -> Result<NewPost, FieldErrors> {
        self.validate()?;
        Ok(NewPost {
            title: self.title,
            content: self.content,
            excerpt: Some(self.excerpt).filter(|e| !e.is_empty()),
            cover_image: self.cover_image,
            tags: normalize_tags(&self.tags),
            status: self.status,
        })
    }

    /// Validate and build a full update payload. Tags are normalized.
    pub fn into_update(self) -> Result<PostUpdate, FieldErrors> {
        self.validate()?;
        Ok(PostUpdate {
            title: Some(self.title),
            content: Some(self.content),
            excerpt: Some(self.excerpt).filter(|e| !e.is_empty()),
            cover_image: self.cover_image,
            tags: Some(normalize_tags(&self.tags)),
            status: Some(self.status),
        })
    }
}

/// Write or edit a comment.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    #[allow(missing_docs)]
    pub content: String,
    /// Attached images, sent as repeated `images` parts.
    pub images: Vec<Upload>,
}

impl CommentForm {
    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "content", &self.content, "Comment cannot be empty");
        errors.into_result()
    }

    /// Validate and build a new comment on `post_id`, optionally replying to `parent_id`.
    pub fn into_new_comment(
        self,
        post_id: impl Into<String>,
        parent_id: Option<String>,
    ) -> Result<NewComment, FieldErrors> {
        self.validate()?;
        Ok(NewComment {
            content: self.content,
            post_id: post_id.into(),
            parent_id,
            images: self.images,
        })
    }

    /// Validate and build an edit payload.
    pub fn into_update(self) -> Result<CommentUpdate, FieldErrors> {
        self.validate()?;
        Ok(CommentUpdate {
            content: self.content,
            images: self.images,
        })
    }
}
