//! Thematic groups that posts may belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::slug::is_valid_slug;

/// Maximum title length in characters.
pub const GROUP_TITLE_MAX: usize = 200;
/// Maximum slug length in characters.
pub const GROUP_SLUG_MAX: usize = 50;

/// Validation errors raised by group constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    /// Identifier was not a positive integer.
    #[error("group id must be a positive integer")]
    InvalidId,
    /// Title was blank.
    #[error("group title must not be empty")]
    EmptyTitle,
    /// Title exceeded the maximum length.
    #[error("group title must be at most {max} characters")]
    TitleTooLong { max: usize },
    /// Slug contained characters outside the allowed set.
    #[error("group slug may only contain lowercase letters, digits, '-' and '_'")]
    InvalidSlug,
    /// Slug exceeded the maximum length.
    #[error("group slug must be at most {max} characters")]
    SlugTooLong { max: usize },
}

/// Database-assigned group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = GroupValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(GroupValidationError::InvalidId)
    }
}

/// URL-safe unique group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupSlug(String);

impl GroupSlug {
    /// Validate and construct a slug.
    ///
    /// # Examples
    /// ```
    /// use yatube::domain::GroupSlug;
    ///
    /// assert!(GroupSlug::new("cats").is_ok());
    /// assert!(GroupSlug::new("Cats").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, GroupValidationError> {
        let value = value.into();
        if !is_valid_slug(&value) {
            return Err(GroupValidationError::InvalidSlug);
        }
        if value.chars().count() > GROUP_SLUG_MAX {
            return Err(GroupValidationError::SlugTooLong {
                max: GROUP_SLUG_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GroupSlug> for String {
    fn from(value: GroupSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupSlug {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Values needed to register a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    title: String,
    slug: GroupSlug,
    description: String,
}

impl NewGroup {
    /// Validate the title and bundle the remaining fields.
    pub fn new(
        title: impl Into<String>,
        slug: GroupSlug,
        description: impl Into<String>,
    ) -> Result<Self, GroupValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            title,
            slug,
            description: description.into(),
        })
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Unique slug.
    pub fn slug(&self) -> &GroupSlug {
        &self.slug
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Attach the identifier assigned on insert.
    pub fn into_group(self, id: GroupId) -> Group {
        Group {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
        }
    }
}

fn validate_title(title: &str) -> Result<(), GroupValidationError> {
    if title.trim().is_empty() {
        return Err(GroupValidationError::EmptyTitle);
    }
    if title.chars().count() > GROUP_TITLE_MAX {
        return Err(GroupValidationError::TitleTooLong {
            max: GROUP_TITLE_MAX,
        });
    }
    Ok(())
}

/// A stored group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    title: String,
    slug: GroupSlug,
    description: String,
}

impl Group {
    /// Rebuild a group read from storage.
    pub fn new(
        id: GroupId,
        title: impl Into<String>,
        slug: GroupSlug,
        description: impl Into<String>,
    ) -> Result<Self, GroupValidationError> {
        Ok(NewGroup::new(title, slug, description)?.into_group(id))
    }

    /// Group identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Unique slug.
    pub fn slug(&self) -> &GroupSlug {
        &self.slug
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Compact reference embedded in posts.
    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }
}

/// Group reference carried by a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    id: GroupId,
    slug: GroupSlug,
    title: String,
}

impl GroupSummary {
    /// Build a reference from stored values.
    pub fn new(id: GroupId, slug: GroupSlug, title: impl Into<String>) -> Self {
        Self {
            id,
            slug,
            title: title.into(),
        }
    }

    /// Group identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Unique slug.
    pub fn slug(&self) -> &GroupSlug {
        &self.slug
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}
