//! Port for group lookups and registration.

use async_trait::async_trait;

use crate::domain::{Group, GroupId, GroupSlug, NewGroup};

use super::define_port_error;

define_port_error! {
    /// Errors raised by group repository adapters.
    pub enum GroupRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } as service_unavailable => "group repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } as internal => "group repository query failed: {message}",
        /// Another group already uses the slug.
        DuplicateSlug { slug: String } as conflict => "group slug already exists: {slug}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Fetch a group by identifier.
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError>;

    /// Fetch a group by its unique slug.
    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupRepositoryError>;

    /// Register a group and return it with its assigned identifier.
    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError>;

    /// Remove a group. Its posts stay and lose their group.
    ///
    /// Returns `false` when no such group exists.
    async fn delete(&self, id: GroupId) -> Result<bool, GroupRepositoryError>;
}
