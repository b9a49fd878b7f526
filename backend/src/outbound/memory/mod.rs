//! In-process blog store for running without PostgreSQL.
//!
//! One [`InMemoryBlogStore`] implements the user, group and post repository
//! ports over mutex-guarded maps. Reads rebuild the joined view the Diesel
//! adapters produce, so services behave identically over either backend.
//! Used by the development server when no database URL is configured and by
//! the HTTP integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    FeedScope, GroupRepository, GroupRepositoryError, PostRepository, PostRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Group, GroupId, GroupSlug, ImageRef, NewGroup, NewPost, Post, PostContent, PostDraft, PostId,
    PostText, User, UserId, Username,
};

#[derive(Debug, Clone)]
struct StoredPost {
    id: PostId,
    text: PostText,
    pub_date: DateTime<Utc>,
    image: Option<ImageRef>,
    author_id: UserId,
    group_id: Option<GroupId>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    posts: BTreeMap<PostId, StoredPost>,
    next_group_id: i64,
    next_post_id: i64,
}

impl Tables {
    fn username_taken(&self, username: &Username) -> bool {
        self.users.values().any(|user| user.username() == username)
    }

    fn in_scope(post: &StoredPost, scope: &FeedScope) -> bool {
        match scope {
            FeedScope::All => true,
            FeedScope::Group(group_id) => post.group_id == Some(*group_id),
            FeedScope::Author(author_id) => &post.author_id == author_id,
        }
    }

    fn join(&self, stored: &StoredPost) -> Option<Post> {
        let author = self.users.get(&stored.author_id)?.author();
        let group = stored
            .group_id
            .and_then(|id| self.groups.get(&id))
            .map(Group::summary);
        Some(Post::new(PostDraft {
            id: stored.id,
            text: stored.text.clone(),
            pub_date: stored.pub_date,
            image: stored.image.clone(),
            author,
            group,
        }))
    }

    /// Posts in feed order: newest first, ties broken by descending id.
    fn ordered<'a>(&'a self, scope: &'a FeedScope) -> Vec<&'a StoredPost> {
        let mut posts: Vec<&StoredPost> = self
            .posts
            .values()
            .filter(|post| Self::in_scope(post, scope))
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        posts
    }
}

/// Blog storage held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    tables: Mutex<Tables>,
}

impl InMemoryBlogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `users` and nothing else.
    ///
    /// # Errors
    /// Returns [`UserPersistenceError::DuplicateUsername`] when two accounts
    /// share a username.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self, UserPersistenceError> {
        let mut tables = Tables::default();
        for user in users {
            if tables.username_taken(user.username()) {
                return Err(UserPersistenceError::duplicate_username(
                    user.username().as_str(),
                ));
            }
            tables.users.insert(user.id().clone(), user);
        }
        Ok(Self {
            tables: Mutex::new(tables),
        })
    }

    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, Tables>, E> {
        self.tables
            .lock()
            .map_err(|_| poisoned("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock(UserPersistenceError::query)?;
        if tables.username_taken(user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_str(),
            ));
        }
        tables.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock(UserPersistenceError::query)?;
        Ok(tables.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock(UserPersistenceError::query)?;
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }
        tables.posts.retain(|_, post| &post.author_id != id);
        Ok(true)
    }
}

#[async_trait]
impl GroupRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        let tables = self.lock(GroupRepositoryError::query)?;
        Ok(tables.groups.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupRepositoryError> {
        let tables = self.lock(GroupRepositoryError::query)?;
        Ok(tables
            .groups
            .values()
            .find(|group| group.slug() == slug)
            .cloned())
    }

    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError> {
        let mut tables = self.lock(GroupRepositoryError::query)?;
        if tables
            .groups
            .values()
            .any(|existing| existing.slug() == group.slug())
        {
            return Err(GroupRepositoryError::duplicate_slug(group.slug().as_str()));
        }
        tables.next_group_id += 1;
        let stored = group.clone().into_group(GroupId::new(tables.next_group_id));
        tables.groups.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: GroupId) -> Result<bool, GroupRepositoryError> {
        let mut tables = self.lock(GroupRepositoryError::query)?;
        if tables.groups.remove(&id).is_none() {
            return Ok(false);
        }
        for post in tables.posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let tables = self.lock(PostRepositoryError::query)?;
        Ok(tables.posts.get(&id).and_then(|post| tables.join(post)))
    }

    async fn count(&self, scope: &FeedScope) -> Result<usize, PostRepositoryError> {
        let tables = self.lock(PostRepositoryError::query)?;
        Ok(tables
            .posts
            .values()
            .filter(|post| Tables::in_scope(post, scope))
            .count())
    }

    async fn list_page(
        &self,
        scope: &FeedScope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.lock(PostRepositoryError::query)?;
        Ok(tables
            .ordered(scope)
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|post| tables.join(post))
            .collect())
    }

    async fn insert(&self, post: &NewPost) -> Result<PostId, PostRepositoryError> {
        let mut tables = self.lock(PostRepositoryError::query)?;
        if !tables.users.contains_key(&post.author_id) {
            return Err(PostRepositoryError::query(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        tables.next_post_id += 1;
        let id = PostId::new(tables.next_post_id);
        tables.posts.insert(
            id,
            StoredPost {
                id,
                text: post.content.text.clone(),
                pub_date: post.pub_date,
                image: post.content.image.clone(),
                author_id: post.author_id.clone(),
                group_id: post.content.group,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: PostId, content: &PostContent) -> Result<(), PostRepositoryError> {
        let mut tables = self.lock(PostRepositoryError::query)?;
        let stored = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| PostRepositoryError::query(format!("post {id} not found")))?;
        stored.text = content.text.clone();
        stored.group_id = content.group;
        stored.image = content.image.clone();
        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut tables = self.lock(PostRepositoryError::query)?;
        Ok(tables.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::user_with_password;
    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
            .single()
            .expect("timestamp")
            + TimeDelta::minutes(minute)
    }

    fn content(text: &str, group: Option<GroupId>) -> PostContent {
        PostContent {
            text: PostText::new(text).expect("text"),
            group,
            image: None,
        }
    }

    struct Seeded {
        store: InMemoryBlogStore,
        leo: User,
        cats: Group,
    }

    #[fixture]
    async fn seeded() -> Seeded {
        let store = InMemoryBlogStore::new();
        let leo = user_with_password("leo", "pw", false);
        UserRepository::insert(&store, &leo).await.expect("user");
        let cats = GroupRepository::insert(
            &store,
            &NewGroup::new("Cats", GroupSlug::new("cats").expect("slug"), "").expect("group"),
        )
        .await
        .expect("group");
        Seeded { store, leo, cats }
    }

    async fn add_post(seeded: &Seeded, minute: i64, group: Option<GroupId>) -> PostId {
        PostRepository::insert(
            &seeded.store,
            &NewPost {
                author_id: seeded.leo.id().clone(),
                pub_date: at(minute),
                content: content(&format!("post at {minute}"), group),
            },
        )
        .await
        .expect("insert")
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_newest_first_with_id_tiebreak(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let oldest = add_post(&seeded, 0, None).await;
        let tie_first = add_post(&seeded, 5, None).await;
        let tie_second = add_post(&seeded, 5, None).await;

        let page = seeded
            .store
            .list_page(&FeedScope::All, 0, 10)
            .await
            .expect("list");
        let ids: Vec<PostId> = page.iter().map(Post::id).collect();
        assert_eq!(ids, vec![tie_second, tie_first, oldest]);
    }

    #[rstest]
    #[tokio::test]
    async fn scopes_filter_and_window(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        for minute in 0..3 {
            add_post(&seeded, minute, Some(seeded.cats.id())).await;
        }
        add_post(&seeded, 10, None).await;

        let group = FeedScope::Group(seeded.cats.id());
        assert_eq!(seeded.store.count(&group).await.expect("count"), 3);
        assert_eq!(seeded.store.count(&FeedScope::All).await.expect("count"), 4);

        let window = seeded
            .store
            .list_page(&group, 2, 10)
            .await
            .expect("list");
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].group().map(|g| g.slug().as_str()), Some("cats"));

        let author = FeedScope::Author(seeded.leo.id().clone());
        assert_eq!(seeded.store.count(&author).await.expect("count"), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_content(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let id = add_post(&seeded, 0, Some(seeded.cats.id())).await;

        seeded
            .store
            .update(id, &content("edited", None))
            .await
            .expect("update");

        let post = PostRepository::find_by_id(&seeded.store, id)
            .await
            .expect("find")
            .expect("post exists");
        assert_eq!(post.text().as_str(), "edited");
        assert!(post.group().is_none());
        assert_eq!(post.pub_date(), at(0));
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_posts_leave_every_feed(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let kept = add_post(&seeded, 0, Some(seeded.cats.id())).await;
        let removed = add_post(&seeded, 1, Some(seeded.cats.id())).await;

        assert!(PostRepository::delete(&seeded.store, removed)
            .await
            .expect("delete"));
        assert!(!PostRepository::delete(&seeded.store, removed)
            .await
            .expect("second delete"));

        assert_eq!(PostRepository::find_by_id(&seeded.store, removed).await, Ok(None));
        let group = FeedScope::Group(seeded.cats.id());
        let listed = seeded.store.list_page(&group, 0, 10).await.expect("list");
        assert_eq!(listed.iter().map(Post::id).collect::<Vec<_>>(), vec![kept]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_user_removes_their_posts(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let other = user_with_password("other", "pw", false);
        UserRepository::insert(&seeded.store, &other).await.expect("user");
        add_post(&seeded, 0, None).await;
        add_post(&seeded, 1, Some(seeded.cats.id())).await;
        let survivor = PostRepository::insert(
            &seeded.store,
            &NewPost {
                author_id: other.id().clone(),
                pub_date: at(2),
                content: content("still here", None),
            },
        )
        .await
        .expect("insert");

        assert!(UserRepository::delete(&seeded.store, seeded.leo.id())
            .await
            .expect("delete user"));

        assert_eq!(
            UserRepository::find_by_id(&seeded.store, seeded.leo.id()).await,
            Ok(None)
        );
        assert_eq!(
            seeded
                .store
                .count(&FeedScope::Author(seeded.leo.id().clone()))
                .await,
            Ok(0)
        );
        let remaining = seeded
            .store
            .list_page(&FeedScope::All, 0, 10)
            .await
            .expect("list");
        assert_eq!(remaining.iter().map(Post::id).collect::<Vec<_>>(), vec![survivor]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_group_keeps_its_posts_ungrouped(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let id = add_post(&seeded, 0, Some(seeded.cats.id())).await;

        assert!(GroupRepository::delete(&seeded.store, seeded.cats.id())
            .await
            .expect("delete group"));
        assert!(!GroupRepository::delete(&seeded.store, seeded.cats.id())
            .await
            .expect("second delete"));

        let post = PostRepository::find_by_id(&seeded.store, id)
            .await
            .expect("find")
            .expect("post survives");
        assert!(post.group().is_none());
        assert_eq!(
            seeded
                .store
                .count(&FeedScope::Group(seeded.cats.id()))
                .await,
            Ok(0)
        );
        assert_eq!(seeded.store.count(&FeedScope::All).await, Ok(1));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicates_are_rejected(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let clash = user_with_password("leo", "other", false);
        let err = UserRepository::insert(&seeded.store, &clash)
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, UserPersistenceError::DuplicateUsername { .. }));

        let group = NewGroup::new("More cats", GroupSlug::new("cats").expect("slug"), "")
            .expect("group");
        let err = GroupRepository::insert(&seeded.store, &group)
            .await
            .expect_err("duplicate slug");
        assert!(matches!(err, GroupRepositoryError::DuplicateSlug { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_users_are_findable_and_unique() {
        let admin = user_with_password("admin", "pw", true);
        let store = InMemoryBlogStore::with_users([admin.clone()]).expect("seeded store");
        let found = UserRepository::find_by_username(&store, admin.username())
            .await
            .expect("lookup");
        assert_eq!(found, Some(admin));

        let clash = InMemoryBlogStore::with_users([
            user_with_password("leo", "a", false),
            user_with_password("leo", "b", false),
        ]);
        assert!(matches!(
            clash,
            Err(UserPersistenceError::DuplicateUsername { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn posts_need_an_existing_author() {
        let store = InMemoryBlogStore::new();
        let err = PostRepository::insert(
            &store,
            &NewPost {
                author_id: UserId::random(),
                pub_date: at(0),
                content: content("orphan", None),
            },
        )
        .await
        .expect_err("unknown author");
        assert!(matches!(err, PostRepositoryError::Query { .. }));
    }
}
