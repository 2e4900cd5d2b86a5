//! Then steps for list ownership BDD scenarios.

use super::world::{ListOwnershipWorld, run_async, username};
use rstest_bdd_macros::then;
use todo_api::todo_list::domain::ListId;
use todo_api::todo_list::services::{ToDoListService, ToDoListServiceError};

#[then("the list has id {id:i64} and is active")]
fn list_has_id_and_is_active(world: &ListOwnershipWorld, id: i64) -> Result<(), eyre::Report> {
    let list = world.list()?;
    eyre::ensure!(
        list.id() == ListId::new(id),
        "expected list id {id}, found {}",
        list.id()
    );
    eyre::ensure!(list.is_active(), "expected list {id} to be active");
    Ok(())
}

#[then(r#"the list is owned by "{owner}""#)]
fn list_is_owned_by(world: &ListOwnershipWorld, owner: String) -> Result<(), eyre::Report> {
    let expected = username(&owner)?;
    let list = world.list()?;
    eyre::ensure!(
        list.owner() == &expected,
        "expected owner {expected}, found {}",
        list.owner()
    );
    Ok(())
}

#[then(r#"the list holds {count:usize} task named "{name}""#)]
fn list_holds_tasks(
    world: &ListOwnershipWorld,
    count: usize,
    name: String,
) -> Result<(), eyre::Report> {
    let list = world.list()?;
    let reloaded = run_async(
        world
            .service
            .get_list_by_id_for_user(list.id(), list.owner()),
    )
    .map_err(|err| eyre::eyre!("reload list: {err}"))?;

    eyre::ensure!(
        reloaded.tasks().len() == count,
        "expected {count} task(s), found {}",
        reloaded.tasks().len()
    );
    eyre::ensure!(
        reloaded.tasks().iter().all(|task| task.name().as_str() == name),
        "expected every task to be named {name:?}"
    );
    Ok(())
}

#[then("the request fails because the task was not found")]
fn fails_with_task_not_found(world: &ListOwnershipWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    eyre::ensure!(
        matches!(error, ToDoListServiceError::TaskNotFound { .. }),
        "expected TaskNotFound, got {error:?}"
    );
    Ok(())
}

#[then("the request fails because the list was not found")]
fn fails_with_list_not_found(world: &ListOwnershipWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    eyre::ensure!(
        matches!(error, ToDoListServiceError::NotFound(_)),
        "expected NotFound, got {error:?}"
    );
    Ok(())
}

#[then(r#""{owner}" can no longer find the list"#)]
fn list_is_gone(world: &ListOwnershipWorld, owner: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_error.is_none(),
        "delete failed: {:?}",
        world.last_error
    );
    let owner_name = username(&owner)?;
    let list_id = world.list()?.id();
    let lookup = run_async(world.service.get_list_by_id_for_user(list_id, &owner_name));
    eyre::ensure!(
        matches!(lookup, Err(ToDoListServiceError::NotFound(_))),
        "expected NotFound after delete, got {lookup:?}"
    );
    Ok(())
}
