//! In-memory integration tests for user accounts.

use rstest::rstest;
use todo_api::user::{
    domain::Role,
    services::{RegisterUserRequest, UserService as _, UserServiceError},
};

use super::helpers::{UserService, user, user_service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_can_authenticate(user_service: UserService) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    user_service
        .create_user(RegisterUserRequest::new("alice", "correct horse"))
        .await?;

    let credentials = user_service.authenticate(&alice, "correct horse").await?;

    eyre::ensure!(credentials.has_role(Role::User), "USER role missing");
    eyre::ensure!(
        credentials.password_hash.as_str() != "correct horse",
        "password stored in plaintext"
    );
    eyre::ensure!(user_service.user_exists(&alice).await, "user should exist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_and_unknown_user_fail_alike(
    user_service: UserService,
) -> Result<(), eyre::Report> {
    user_service
        .create_user(RegisterUserRequest::new("alice", "correct horse"))
        .await?;

    let wrong_password = user_service
        .authenticate(&user("alice")?, "battery staple")
        .await;
    let unknown_user = user_service
        .authenticate(&user("mallory")?, "correct horse")
        .await;

    for result in [&wrong_password, &unknown_user] {
        eyre::ensure!(
            matches!(result, Err(UserServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }
    eyre::ensure!(
        wrong_password.map_err(|err| err.to_string()).err()
            == unknown_user.map_err(|err| err.to_string()).err(),
        "messages should not reveal which part was wrong"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changed_password_replaces_the_old_one(
    user_service: UserService,
) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    user_service
        .create_user(RegisterUserRequest::new("alice", "correct horse"))
        .await?;

    user_service
        .change_password(&alice, "battery staple".to_owned())
        .await?;

    eyre::ensure!(
        user_service.authenticate(&alice, "battery staple").await.is_ok(),
        "new password should verify"
    );
    eyre::ensure!(
        user_service.authenticate(&alice, "correct horse").await.is_err(),
        "old password should no longer verify"
    );
    Ok(())
}
