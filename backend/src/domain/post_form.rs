//! Post form values, validation and the re-rendered form view.
//!
//! Validation is pure: callers resolve the requested group beforehand and
//! pass the lookup result in, so the rules below never touch storage.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Group, GroupId, ImageRef, Post, PostContent, PostText, PostValidationError};

/// Error shown when the post text is the empty string.
pub const TEXT_REQUIRED_MESSAGE: &str = "заполните текст поста";
/// Error shown when the selected group does not exist.
pub const INVALID_GROUP_MESSAGE: &str = "Выберите корректный вариант.";
/// Error shown when the image reference is blank.
pub const BLANK_IMAGE_MESSAGE: &str = "укажите путь к изображению";
/// Error shown when the image reference is too long.
pub const IMAGE_TOO_LONG_MESSAGE: &str =
    "Убедитесь, что это значение содержит не более 255 символов.";

/// Fields of the post form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostFormField {
    /// Post body.
    Text,
    /// Group selection.
    Group,
    /// Image reference.
    Image,
}

/// Raw values submitted through the post form.
///
/// `group` and `image` hold the submitted strings unchanged so a failed
/// submission can be shown back to the author as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostFormData {
    text: String,
    group: Option<String>,
    image: Option<String>,
}

impl PostFormData {
    /// Bundle raw form values.
    pub fn new(text: impl Into<String>, group: Option<String>, image: Option<String>) -> Self {
        Self {
            text: text.into(),
            group,
            image,
        }
    }

    /// Values of an existing post, as the edit form shows them.
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text().as_str().to_owned(),
            group: post.group().map(|group| group.id().to_string()),
            image: post.image().map(|image| image.as_str().to_owned()),
        }
    }

    /// Submitted text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Submitted group value.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Submitted image value.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Group the submission asks for, when the value parses as an id.
    ///
    /// Callers look this id up and pass the result to [`Self::validate`].
    pub fn requested_group(&self) -> Option<GroupId> {
        non_empty(self.group.as_deref()).and_then(|raw| raw.parse().ok())
    }

    /// Validate the submission.
    ///
    /// `resolved_group` is the group found for [`Self::requested_group`], or
    /// `None` when no such group exists.
    ///
    /// # Examples
    /// ```
    /// use yatube::domain::{PostFormData, PostFormField, TEXT_REQUIRED_MESSAGE};
    ///
    /// let errors = PostFormData::new("", None, None)
    ///     .validate(None)
    ///     .expect_err("empty text is rejected");
    /// assert_eq!(errors.messages(PostFormField::Text), [TEXT_REQUIRED_MESSAGE]);
    ///
    /// let content = PostFormData::new(" ", Some(String::new()), None)
    ///     .validate(None)
    ///     .expect("whitespace text is accepted");
    /// assert_eq!(content.text.as_str(), " ");
    /// assert!(content.group.is_none());
    /// ```
    pub fn validate(&self, resolved_group: Option<&Group>) -> Result<PostContent, PostFormErrors> {
        let mut errors = PostFormErrors::default();

        let text = PostText::new(self.text.clone())
            .map_err(|_| errors.add(PostFormField::Text, TEXT_REQUIRED_MESSAGE))
            .ok();

        let group = match non_empty(self.group.as_deref()) {
            None => None,
            Some(_) => match (self.requested_group(), resolved_group) {
                (Some(requested), Some(found)) if found.id() == requested => Some(requested),
                _ => {
                    errors.add(PostFormField::Group, INVALID_GROUP_MESSAGE);
                    None
                }
            },
        };

        let image = match non_empty(self.image.as_deref()) {
            None => None,
            Some(raw) => match ImageRef::new(raw) {
                Ok(image) => Some(image),
                Err(PostValidationError::ImageTooLong { .. }) => {
                    errors.add(PostFormField::Image, IMAGE_TOO_LONG_MESSAGE);
                    None
                }
                Err(_) => {
                    errors.add(PostFormField::Image, BLANK_IMAGE_MESSAGE);
                    None
                }
            },
        };

        match text {
            Some(text) if errors.is_empty() => Ok(PostContent { text, group, image }),
            _ => Err(errors),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostFormErrors(BTreeMap<PostFormField, Vec<String>>);

impl PostFormErrors {
    fn add(&mut self, field: PostFormField, message: &str) {
        self.0.entry(field).or_default().push(message.to_owned());
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attached to `field`.
    pub fn messages(&self, field: PostFormField) -> &[String] {
        self.0.get(&field).map_or(&[], Vec::as_slice)
    }
}

/// Form state handed back to the author: values plus errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostForm {
    fields: PostFormData,
    errors: PostFormErrors,
    is_bound: bool,
}

impl PostForm {
    /// Blank form for a new post.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form pre-filled with an existing post.
    pub fn for_post(post: &Post) -> Self {
        Self {
            fields: PostFormData::from_post(post),
            errors: PostFormErrors::default(),
            is_bound: false,
        }
    }

    /// Submitted values with the errors they produced.
    pub fn rejected(fields: PostFormData, errors: PostFormErrors) -> Self {
        Self {
            fields,
            errors,
            is_bound: true,
        }
    }

    /// Values shown in the form.
    pub fn fields(&self) -> &PostFormData {
        &self.fields
    }

    /// Validation errors.
    pub fn errors(&self) -> &PostFormErrors {
        &self.errors
    }
}
