//! In-memory integration tests for owner-scoped list flows.

use std::collections::HashSet;

use rstest::rstest;
use todo_api::todo_list::{
    domain::{ListId, TaskId},
    services::{ListData, TaskData, ToDoListService, ToDoListServiceError},
};

use super::helpers::{ListService, list_service, user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_created_list_gets_a_fresh_identifier(
    list_service: ListService,
) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    let bob = user("bob")?;
    let mut seen = HashSet::new();

    for (index, owner) in [&alice, &bob, &alice, &bob, &alice].into_iter().enumerate() {
        let list = list_service
            .create_list(ListData::titled(format!("List {index}")), owner)
            .await?;
        eyre::ensure!(seen.insert(list.id()), "identifier {} reused", list.id());
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_identifiers_stay_unique_after_removal(
    list_service: ListService,
) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    let list = list_service
        .create_list(ListData::titled("Groceries"), &alice)
        .await?;

    list_service
        .add_task(list.id(), &alice, TaskData::named("Milk"))
        .await?;
    list_service
        .add_task(list.id(), &alice, TaskData::named("Eggs"))
        .await?;
    list_service
        .remove_task(list.id(), &alice, TaskId::new(2))
        .await?;
    let updated = list_service
        .add_task(list.id(), &alice, TaskData::named("Bread"))
        .await?;

    let ids: Vec<TaskId> = updated.tasks().iter().map(|task| task.id()).collect();
    eyre::ensure!(
        ids == vec![TaskId::new(1), TaskId::new(3)],
        "unexpected task ids {ids:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_of_different_users_do_not_mix(
    list_service: ListService,
) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    let bob = user("bob")?;
    let groceries = list_service
        .create_list(ListData::titled("Groceries"), &alice)
        .await?;
    list_service
        .create_list(ListData::titled("Garage"), &bob)
        .await?;

    let alices = list_service.list_all_for_user(&alice).await?;
    let bobs_view = list_service
        .get_list_by_id_for_user(groceries.id(), &bob)
        .await;

    eyre::ensure!(alices.len() == 1, "alice sees {} lists", alices.len());
    eyre::ensure!(
        matches!(bobs_view, Err(ToDoListServiceError::NotFound(id)) if id == groceries.id()),
        "bob should not see alice's list: {bobs_view:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_reports_not_found(list_service: ListService) -> Result<(), eyre::Report> {
    let alice = user("alice")?;
    let list = list_service
        .create_list(ListData::titled("Groceries"), &alice)
        .await?;

    list_service.delete_list(list.id(), &alice).await?;
    let second = list_service.delete_list(list.id(), &alice).await;

    eyre::ensure!(
        matches!(second, Err(ToDoListServiceError::NotFound(id)) if id == ListId::new(1)),
        "unexpected second delete result {second:?}"
    );
    Ok(())
}
