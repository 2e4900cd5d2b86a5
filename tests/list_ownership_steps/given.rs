//! Given steps for list ownership BDD scenarios.

use super::world::{ListOwnershipWorld, run_async, username};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todo_api::todo_list::services::{ListData, TaskData, ToDoListService};

#[given(r#"user "{owner}" has created a list titled "{title}""#)]
fn list_created(
    world: &mut ListOwnershipWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner_name = username(&owner)?;
    let created = run_async(world.service.create_list(ListData::titled(title), &owner_name))
        .wrap_err("create list for scenario setup")?;
    world.current_list = Some(created);
    Ok(())
}

#[given(r#""{owner}" has added a task named "{name}""#)]
fn task_added(
    world: &mut ListOwnershipWorld,
    owner: String,
    name: String,
) -> Result<(), eyre::Report> {
    let owner_name = username(&owner)?;
    let list_id = world.list()?.id();
    let updated = run_async(
        world
            .service
            .add_task(list_id, &owner_name, TaskData::named(name)),
    )
    .wrap_err("add task for scenario setup")?;
    world.current_list = Some(updated);
    Ok(())
}
