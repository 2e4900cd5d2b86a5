//! When steps for list ownership BDD scenarios.

use super::world::{ListOwnershipWorld, run_async, username};
use rstest_bdd_macros::when;
use todo_api::todo_list::domain::TaskId;
use todo_api::todo_list::services::{TaskData, ToDoListService};

#[when(r#""{caller}" adds a task named "{name}""#)]
fn add_task(
    world: &mut ListOwnershipWorld,
    caller: String,
    name: String,
) -> Result<(), eyre::Report> {
    let caller_name = username(&caller)?;
    let list_id = world.list()?.id();
    let result = run_async(
        world
            .service
            .add_task(list_id, &caller_name, TaskData::named(name)),
    );
    world.record(result);
    Ok(())
}

#[when(r#""{caller}" removes task {task_id:i64}"#)]
fn remove_task(
    world: &mut ListOwnershipWorld,
    caller: String,
    task_id: i64,
) -> Result<(), eyre::Report> {
    let caller_name = username(&caller)?;
    let list_id = world.list()?.id();
    let result = run_async(
        world
            .service
            .remove_task(list_id, &caller_name, TaskId::new(task_id)),
    );
    world.record(result);
    Ok(())
}

#[when(r#""{caller}" looks up the list"#)]
fn look_up_list(world: &mut ListOwnershipWorld, caller: String) -> Result<(), eyre::Report> {
    let caller_name = username(&caller)?;
    let list_id = world.list()?.id();
    let result = run_async(world.service.get_list_by_id_for_user(list_id, &caller_name));
    world.record(result);
    Ok(())
}

#[when(r#""{caller}" deletes the list"#)]
fn delete_list(world: &mut ListOwnershipWorld, caller: String) -> Result<(), eyre::Report> {
    let caller_name = username(&caller)?;
    let list_id = world.list()?.id();
    if let Err(err) = run_async(world.service.delete_list(list_id, &caller_name)) {
        world.last_error = Some(err);
    }
    Ok(())
}
