//! Validation tests for user domain values.

use crate::user::domain::{
    DisplayName, EmailAddress, Password, PasswordHash, Role, User, UserDomainError, UserProfile,
    Username,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("alice")]
#[case("bob.smith")]
#[case("user_42")]
#[case("a-b")]
fn username_accepts_valid_values(#[case] value: &str) {
    let username = Username::new(value).expect("valid username");
    assert_eq!(username.as_str(), value);
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  alice  ").expect("valid username");
    assert_eq!(username.as_str(), "alice");
}

#[rstest]
#[case("", UserDomainError::EmptyUsername)]
#[case("   ", UserDomainError::EmptyUsername)]
#[case("ab", UserDomainError::UsernameLength { min: 3, max: 50 })]
#[case("alice smith", UserDomainError::InvalidUsername("alice smith".to_owned()))]
#[case("al:ce", UserDomainError::InvalidUsername("al:ce".to_owned()))]
fn username_rejects_invalid_values(#[case] value: &str, #[case] expected: UserDomainError) {
    assert_eq!(Username::new(value), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let value = "a".repeat(51);
    assert_eq!(
        Username::new(value),
        Err(UserDomainError::UsernameLength { min: 3, max: 50 })
    );
}

#[rstest]
#[case("short", UserDomainError::PasswordTooShort(8))]
#[case("         ", UserDomainError::BlankPassword)]
fn password_policy_rejects_weak_values(#[case] value: &str, #[case] expected: UserDomainError) {
    assert_eq!(Password::new(value), Err(expected));
}

#[rstest]
fn password_policy_rejects_overlong_values() {
    assert_eq!(
        Password::new("x".repeat(129)),
        Err(UserDomainError::PasswordTooLong(128))
    );
}

#[rstest]
fn password_debug_output_is_redacted() {
    let password = Password::new("super-secret").expect("valid password");
    let rendered = format!("{password:?} {:?}", PasswordHash::new("$argon2id$abc"));

    assert!(!rendered.contains("super-secret"));
    assert!(!rendered.contains("argon2id"));
}

#[rstest]
#[case("alice@example.com", true)]
#[case("alice@", false)]
#[case("@example.com", false)]
#[case("a@b@c", false)]
#[case("alice @example.com", false)]
fn email_shape_is_checked(#[case] value: &str, #[case] valid: bool) {
    assert_eq!(EmailAddress::new(value).is_ok(), valid);
}

#[rstest]
fn blank_optional_profile_fields_are_absent() {
    assert_eq!(DisplayName::parse_optional(Some("  ".to_owned())), Ok(None));
    assert_eq!(EmailAddress::parse_optional(Some(String::new())), Ok(None));
    assert_eq!(EmailAddress::parse_optional(None), Ok(None));
}

#[rstest]
fn role_round_trips_through_storage_name() {
    assert_eq!(Role::try_from(Role::User.as_str()), Ok(Role::User));
    assert!(Role::try_from("ADMIN").is_err());
}

#[rstest]
fn registered_user_holds_user_role_and_hides_hash_from_view() {
    let username = Username::new("alice").expect("valid username");
    let user = User::register(
        username.clone(),
        PasswordHash::new("$argon2id$hash"),
        UserProfile::default(),
        &DefaultClock,
    );

    assert_eq!(user.roles(), &[Role::User]);
    assert!(user.credentials().has_role(Role::User));
    let view = user.view();
    assert_eq!(view.username, username);
    assert_eq!(view.created_at, user.created_at());
}
