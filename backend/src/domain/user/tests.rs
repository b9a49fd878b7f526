//! Regression coverage for user identifiers and usernames.

use super::*;
use rstest::{fixture, rstest};

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn user() -> User {
    User::new(
        UserId::new(ID).expect("fixture id"),
        Username::new("leo").expect("fixture username"),
        PasswordHash::new("$argon2id$v=19$stub").expect("fixture hash"),
        false,
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_json() {
    let id = UserId::new(ID).expect("fixture id");
    let json = serde_json::to_string(&id).expect("serialise");
    assert_eq!(json, format!("\"{ID}\""));
    let decoded: UserId = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(decoded, id);
}

#[rstest]
#[case("leo")]
#[case("a")]
#[case("first.last+tag@example-mail_1")]
#[case("Лев")]
fn username_accepts_allowed_characters(#[case] raw: &str) {
    assert_eq!(Username::new(raw).expect("valid username").as_str(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("with space", UserValidationError::UsernameInvalidCharacters)]
#[case("slash/name", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn username_enforces_maximum_length() {
    let at_limit = "u".repeat(USERNAME_MAX);
    assert!(Username::new(at_limit).is_ok());
    let over = "u".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(over).expect_err("too long"),
        UserValidationError::UsernameTooLong { max: USERNAME_MAX }
    );
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$secret").expect("hash");
    assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
}

#[rstest]
fn principal_recognises_own_posts(user: User) {
    let principal = Principal::from(&user);
    assert!(principal.is_author(&user.author()));

    let stranger = Author::new(UserId::random(), Username::new("other").expect("username"));
    assert!(!principal.is_author(&stranger));
}

#[rstest]
fn author_serialises_id_and_username(user: User) {
    let value = serde_json::to_value(user.author()).expect("serialise");
    assert_eq!(value["id"], ID);
    assert_eq!(value["username"], "leo");
    assert!(value.get("password_hash").is_none());
}
