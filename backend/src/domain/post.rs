//! Posts and the values that create or change them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, GroupId, GroupSummary, UserId};

/// Maximum image reference length in characters.
pub const IMAGE_REF_MAX: usize = 255;

/// Validation errors raised by post value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Identifier was not a positive integer.
    #[error("post id must be a positive integer")]
    InvalidId,
    /// Text was the empty string.
    #[error("post text must not be empty")]
    EmptyText,
    /// Image reference was blank.
    #[error("image reference must not be blank")]
    BlankImage,
    /// Image reference exceeded the maximum length.
    #[error("image reference must be at most {max} characters")]
    ImageTooLong { max: usize },
}

/// Database-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = PostValidationError;

    /// Accepts only ASCII digits, so signs and padding never name a post.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(PostValidationError::InvalidId);
        }
        s.parse::<i64>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(PostValidationError::InvalidId)
    }
}

/// Body of a post.
///
/// Only the exact empty string is rejected; whitespace-only text is kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    /// Validate and wrap post text.
    ///
    /// # Examples
    /// ```
    /// use yatube::domain::PostText;
    ///
    /// assert!(PostText::new("   ").is_ok());
    /// assert!(PostText::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, PostValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        Ok(Self(value))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostText {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque relative path of an image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate and wrap an image reference.
    pub fn new(value: impl Into<String>) -> Result<Self, PostValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PostValidationError::BlankImage);
        }
        if value.chars().count() > IMAGE_REF_MAX {
            return Err(PostValidationError::ImageTooLong { max: IMAGE_REF_MAX });
        }
        Ok(Self(value))
    }

    /// Borrow the reference.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageRef {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored post with its author and optional group.
///
/// Serialises as the post summary used by feeds and detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    id: PostId,
    text: PostText,
    pub_date: DateTime<Utc>,
    image: Option<ImageRef>,
    author: Author,
    group: Option<GroupSummary>,
}

/// Field bundle for [`Post::new`].
#[derive(Debug, Clone)]
pub struct PostDraft {
    /// Post identifier.
    pub id: PostId,
    /// Post body.
    pub text: PostText,
    /// Creation timestamp.
    pub pub_date: DateTime<Utc>,
    /// Attached image.
    pub image: Option<ImageRef>,
    /// Author reference.
    pub author: Author,
    /// Group reference.
    pub group: Option<GroupSummary>,
}

impl Post {
    /// Assemble a post from stored values.
    pub fn new(draft: PostDraft) -> Self {
        let PostDraft {
            id,
            text,
            pub_date,
            image,
            author,
            group,
        } = draft;
        Self {
            id,
            text,
            pub_date,
            image,
            author,
            group,
        }
    }

    /// Post identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Post body.
    pub fn text(&self) -> &PostText {
        &self.text
    }

    /// Creation timestamp.
    pub fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }

    /// Attached image, if any.
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Author reference.
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Group reference, if any.
    pub fn group(&self) -> Option<&GroupSummary> {
        self.group.as_ref()
    }
}

/// Values for inserting a post. The author is fixed here and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author of the post.
    pub author_id: UserId,
    /// Creation timestamp taken from the service clock.
    pub pub_date: DateTime<Utc>,
    /// Editable fields.
    pub content: PostContent,
}

/// The editable part of a post: text, group and image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    /// Post body.
    pub text: PostText,
    /// Group the post belongs to.
    pub group: Option<GroupId>,
    /// Attached image.
    pub image: Option<ImageRef>,
}
