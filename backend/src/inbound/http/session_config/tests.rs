//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn env_with(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&env_with(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_settings(full_key: NamedTempFile) {
    let settings = session_settings_from_env(&env_with(release_vars(&full_key)), BuildMode::Release)
        .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(full_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&full_key);
    vars.remove(missing);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_malformed_toggles(
    full_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&full_key);
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_short_and_missing_keys() {
    let short = key_file(32);
    assert!(matches!(
        release_error(release_vars(&short)),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));

    let mut vars = release_vars(&short);
    vars.insert(KEY_FILE_ENV, "/nonexistent/yatube/session_key".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let vars = HashMap::from([(SAMESITE_ENV, "unexpected".to_owned())]);
    let settings =
        session_settings_from_env(&env_with(vars), BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn fingerprint_depends_only_on_key_material() {
    let first = Key::derive_from(&[b'a'; 64]);
    let again = Key::derive_from(&[b'a'; 64]);
    let other = Key::derive_from(&[b'b'; 64]);

    assert_eq!(key_fingerprint(&first), key_fingerprint(&again));
    assert_ne!(key_fingerprint(&first), key_fingerprint(&other));
    assert!(
        key_fingerprint(&first)
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    );
}
