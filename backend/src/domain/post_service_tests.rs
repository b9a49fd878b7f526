//! Tests for the post create and edit service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockGroupRepository, MockPostRepository};
use crate::domain::{
    Author, ErrorCode, GroupId, GroupSlug, INVALID_GROUP_MESSAGE, PostDraft, PostFormField,
    PostText, TEXT_REQUIRED_MESSAGE, UserId, Username,
};
use crate::test_support::MutableClock;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(
    posts: MockPostRepository,
    groups: MockGroupRepository,
) -> PostService<MockPostRepository, MockGroupRepository> {
    PostService::new(
        Arc::new(posts),
        Arc::new(groups),
        Arc::new(MutableClock::new(now())),
    )
}

#[fixture]
fn leo() -> Principal {
    Principal::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id"),
        Username::new("leo").expect("username"),
        false,
    )
}

fn stranger() -> Principal {
    Principal::new(UserId::random(), Username::new("other").expect("username"), false)
}

fn stored_post(id: i64, author: &Principal) -> Post {
    Post::new(PostDraft {
        id: PostId::new(id),
        text: PostText::new("original").expect("text"),
        pub_date: now(),
        image: None,
        author: Author::new(author.id().clone(), author.username().clone()),
        group: None,
    })
}

fn cats() -> Group {
    Group::new(
        GroupId::new(3),
        "Cats",
        GroupSlug::new("cats").expect("slug"),
        "",
    )
    .expect("group")
}

fn form(text: &str, group: Option<&str>) -> PostFormData {
    PostFormData::new(text, group.map(str::to_owned), None)
}

fn expect_form(flow: PostFlow) -> PostFormContext {
    match flow {
        PostFlow::ShowForm(context) => context,
        other => panic!("expected form, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn anonymous_create_requires_login() {
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);
    let service = make_service(posts, MockGroupRepository::new());

    assert_eq!(
        service.create_form(None).await.expect("flow"),
        PostFlow::LoginRequired
    );
    assert_eq!(
        service.create(None, form("hello", None)).await.expect("flow"),
        PostFlow::LoginRequired
    );
}

#[rstest]
#[tokio::test]
async fn create_form_is_blank(leo: Principal) {
    let service = make_service(MockPostRepository::new(), MockGroupRepository::new());
    let context = expect_form(service.create_form(Some(leo)).await.expect("flow"));
    assert!(!context.is_edit);
    assert_eq!(context.form, PostForm::empty());
}

#[rstest]
#[tokio::test]
async fn create_stores_post_for_principal_and_redirects_to_profile(leo: Principal) {
    let author_id = leo.id().clone();
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_id()
        .withf(|id| id.get() == 3)
        .return_once(|_| Ok(Some(cats())));
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .withf(move |post| {
            post.author_id == author_id
                && post.pub_date == now()
                && post.content.text.as_str() == "hello"
                && post.content.group == Some(GroupId::new(3))
        })
        .times(1)
        .return_once(|_| Ok(PostId::new(1)));

    let service = make_service(posts, groups);
    let flow = service
        .create(Some(leo), form("hello", Some("3")))
        .await
        .expect("create succeeds");

    assert_eq!(flow, PostFlow::ToProfile(Username::new("leo").expect("username")));
}

#[rstest]
#[tokio::test]
async fn create_with_empty_text_returns_the_submitted_values(leo: Principal) {
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().return_once(|_| Ok(Some(cats())));
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);

    let service = make_service(posts, groups);
    let context = expect_form(
        service
            .create(Some(leo), form("", Some("3")))
            .await
            .expect("flow"),
    );

    assert!(!context.is_edit);
    assert_eq!(
        context.form.errors().messages(PostFormField::Text),
        [TEXT_REQUIRED_MESSAGE]
    );
    assert_eq!(context.form.fields().group(), Some("3"));
}

#[rstest]
#[tokio::test]
async fn create_with_unknown_group_is_rejected(leo: Principal) {
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().return_once(|_| Ok(None));
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);

    let service = make_service(posts, groups);
    let context = expect_form(
        service
            .create(Some(leo), form("hello", Some("42")))
            .await
            .expect("flow"),
    );

    assert_eq!(
        context.form.errors().messages(PostFormField::Group),
        [INVALID_GROUP_MESSAGE]
    );
}

#[rstest]
#[tokio::test]
async fn non_author_is_sent_to_detail_without_validation(leo: Principal) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(stored_post(7, &leo))));
    posts.expect_update().times(0);
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().times(0);

    let service = make_service(posts, groups);
    let id = PostId::new(7);

    assert_eq!(
        service.edit_form(Some(stranger()), id).await.expect("flow"),
        PostFlow::ToDetail(id)
    );
    assert_eq!(
        service
            .edit(Some(stranger()), id, form("", Some("3")))
            .await
            .expect("flow"),
        PostFlow::ToDetail(id)
    );
}

#[rstest]
#[tokio::test]
async fn anonymous_edit_requires_login_before_lookup() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().times(0);
    let service = make_service(posts, MockGroupRepository::new());

    assert_eq!(
        service.edit_form(None, PostId::new(1)).await.expect("flow"),
        PostFlow::LoginRequired
    );
}

#[rstest]
#[tokio::test]
async fn editing_a_missing_post_is_not_found(leo: Principal) {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().return_once(|_| Ok(None));
    let service = make_service(posts, MockGroupRepository::new());

    let err = service
        .edit_form(Some(leo), PostId::new(404))
        .await
        .expect_err("missing post");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn author_edit_form_is_prefilled(leo: Principal) {
    let existing = stored_post(7, &leo);
    let expected = PostForm::for_post(&existing);
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));

    let service = make_service(posts, MockGroupRepository::new());
    let context = expect_form(
        service
            .edit_form(Some(leo), PostId::new(7))
            .await
            .expect("flow"),
    );

    assert!(context.is_edit);
    assert_eq!(context.form, expected);
    assert_eq!(context.form.fields().text(), "original");
}

#[rstest]
#[tokio::test]
async fn author_edit_updates_content_and_redirects_to_detail(leo: Principal) {
    let existing = stored_post(7, &leo);
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    posts
        .expect_update()
        .withf(|id, content| {
            id.get() == 7 && content.text.as_str() == "changed" && content.group.is_none()
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(posts, MockGroupRepository::new());
    let flow = service
        .edit(Some(leo), PostId::new(7), form("changed", Some("")))
        .await
        .expect("edit succeeds");

    assert_eq!(flow, PostFlow::ToDetail(PostId::new(7)));
}

#[rstest]
#[tokio::test]
async fn invalid_author_edit_shows_edit_form(leo: Principal) {
    let existing = stored_post(7, &leo);
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    posts.expect_update().times(0);

    let service = make_service(posts, MockGroupRepository::new());
    let context = expect_form(
        service
            .edit(Some(leo), PostId::new(7), form("", None))
            .await
            .expect("flow"),
    );

    assert!(context.is_edit);
    assert_eq!(
        context.form.errors().messages(PostFormField::Text),
        [TEXT_REQUIRED_MESSAGE]
    );
}
