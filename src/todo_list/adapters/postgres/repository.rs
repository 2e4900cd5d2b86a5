//! `PostgreSQL` repository implementation for to-do list storage.

use super::{
    models::{ListChangeset, ListRow, NewListRow, TaskRow},
    schema::{list_tasks, todo_lists},
};
use crate::db::DbPool;
use crate::todo_list::{
    domain::{
        Description, ListId, ListTitle, NewToDoList, PersistedTaskData, PersistedToDoListData,
        Task, TaskId, TaskName, ToDoList,
    },
    ports::{ToDoListRepository, ToDoListRepositoryError, ToDoListRepositoryResult},
};
use crate::user::domain::Username;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use std::collections::BTreeMap;

/// `PostgreSQL`-backed to-do list repository.
#[derive(Debug, Clone)]
pub struct PostgresToDoListRepository {
    pool: DbPool,
}

/// Result of the guarded update statement.
enum UpdateOutcome {
    Updated,
    Missing,
    Conflict,
}

impl PostgresToDoListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ToDoListRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ToDoListRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ToDoListRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ToDoListRepositoryError::persistence)?
    }
}

#[async_trait]
impl ToDoListRepository for PostgresToDoListRepository {
    async fn insert(&self, list: &NewToDoList) -> ToDoListRepositoryResult<ToDoList> {
        let new_row = to_new_row(list);
        let draft = list.clone();

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(todo_lists::table)
                .values(&new_row)
                .returning(todo_lists::id)
                .get_result::<i64>(connection)
                .map_err(ToDoListRepositoryError::persistence)?;
            Ok(ToDoList::from_new(ListId::new(id), &draft))
        })
        .await
    }

    async fn update(&self, list: &ToDoList) -> ToDoListRepositoryResult<ToDoList> {
        let list_id = list.id();
        let loaded_version = list.version();
        let expected =
            i64::try_from(loaded_version).map_err(ToDoListRepositoryError::persistence)?;
        let changeset = ListChangeset {
            title: list.title().as_str().to_owned(),
            description: list.description().map(|text| text.as_str().to_owned()),
            active: list.is_active(),
            last_task_id: list.last_task_id(),
            version: expected.saturating_add(1),
            updated_at: list.updated_at(),
        };
        let task_rows: Vec<TaskRow> = list
            .tasks()
            .iter()
            .map(|task| to_task_row(list_id, task))
            .collect();
        let mut updated = list.clone();

        self.run_blocking(move |connection| {
            let outcome = connection
                .transaction::<_, DieselError, _>(|tx| {
                    let affected = diesel::update(
                        todo_lists::table
                            .filter(todo_lists::id.eq(list_id.value()))
                            .filter(todo_lists::version.eq(expected)),
                    )
                    .set(&changeset)
                    .execute(tx)?;

                    if affected == 0 {
                        let exists = diesel::select(diesel::dsl::exists(
                            todo_lists::table.find(list_id.value()),
                        ))
                        .get_result::<bool>(tx)?;
                        return Ok(if exists {
                            UpdateOutcome::Conflict
                        } else {
                            UpdateOutcome::Missing
                        });
                    }

                    diesel::delete(list_tasks::table.filter(list_tasks::list_id.eq(list_id.value())))
                        .execute(tx)?;
                    if !task_rows.is_empty() {
                        diesel::insert_into(list_tasks::table)
                            .values(&task_rows)
                            .execute(tx)?;
                    }
                    Ok(UpdateOutcome::Updated)
                })
                .map_err(ToDoListRepositoryError::persistence)?;

            match outcome {
                UpdateOutcome::Updated => {
                    updated.advance_version();
                    Ok(updated)
                }
                UpdateOutcome::Missing => Err(ToDoListRepositoryError::NotFound(list_id)),
                UpdateOutcome::Conflict => Err(ToDoListRepositoryError::VersionConflict {
                    id: list_id,
                    expected: loaded_version,
                }),
            }
        })
        .await
    }

    async fn find_by_id_and_owner(
        &self,
        id: ListId,
        owner: &Username,
    ) -> ToDoListRepositoryResult<Option<ToDoList>> {
        let owner_name = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = todo_lists::table
                .filter(todo_lists::id.eq(id.value()))
                .filter(todo_lists::owner.eq(owner_name))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(ToDoListRepositoryError::persistence)?;
            let Some(list_row) = row else {
                return Ok(None);
            };

            let tasks = list_tasks::table
                .filter(list_tasks::list_id.eq(list_row.id))
                .order(list_tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(ToDoListRepositoryError::persistence)?;
            row_to_list(list_row, tasks).map(Some)
        })
        .await
    }

    async fn find_all_by_owner(&self, owner: &Username) -> ToDoListRepositoryResult<Vec<ToDoList>> {
        let owner_name = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = todo_lists::table
                .filter(todo_lists::owner.eq(owner_name))
                .order(todo_lists::id.asc())
                .select(ListRow::as_select())
                .load::<ListRow>(connection)
                .map_err(ToDoListRepositoryError::persistence)?;
            let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

            let task_rows = list_tasks::table
                .filter(list_tasks::list_id.eq_any(&ids))
                .order((list_tasks::list_id.asc(), list_tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(ToDoListRepositoryError::persistence)?;
            let mut tasks_by_list: BTreeMap<i64, Vec<TaskRow>> = BTreeMap::new();
            for task_row in task_rows {
                tasks_by_list.entry(task_row.list_id).or_default().push(task_row);
            }

            rows.into_iter()
                .map(|row| {
                    let tasks = tasks_by_list.remove(&row.id).unwrap_or_default();
                    row_to_list(row, tasks)
                })
                .collect()
        })
        .await
    }

    async fn delete(&self, id: ListId, owner: &Username) -> ToDoListRepositoryResult<()> {
        let owner_name = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                todo_lists::table
                    .filter(todo_lists::id.eq(id.value()))
                    .filter(todo_lists::owner.eq(owner_name)),
            )
            .execute(connection)
            .map_err(ToDoListRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ToDoListRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(list: &NewToDoList) -> NewListRow {
    NewListRow {
        owner: list.owner().as_str().to_owned(),
        title: list.title().as_str().to_owned(),
        description: list.description().map(|text| text.as_str().to_owned()),
        active: list.is_active(),
        created_at: list.created_at(),
        updated_at: list.created_at(),
    }
}

fn to_task_row(list_id: ListId, task: &Task) -> TaskRow {
    TaskRow {
        list_id: list_id.value(),
        id: task.id().value(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(|text| text.as_str().to_owned()),
        completed: task.is_completed(),
        created_at: task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> ToDoListRepositoryResult<Task> {
    let name = TaskName::new(&row.name).map_err(ToDoListRepositoryError::persistence)?;
    let description =
        Description::parse_optional(row.description).map_err(ToDoListRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        name,
        description,
        completed: row.completed,
        created_at: row.created_at,
    }))
}

fn row_to_list(row: ListRow, task_rows: Vec<TaskRow>) -> ToDoListRepositoryResult<ToDoList> {
    let ListRow {
        id,
        owner: persisted_owner,
        title: persisted_title,
        description: persisted_description,
        active,
        last_task_id,
        version: persisted_version,
        created_at,
        updated_at,
    } = row;

    let owner = Username::new(persisted_owner).map_err(ToDoListRepositoryError::persistence)?;
    let title = ListTitle::new(&persisted_title).map_err(ToDoListRepositoryError::persistence)?;
    let description = Description::parse_optional(persisted_description)
        .map_err(ToDoListRepositoryError::persistence)?;
    let version = u64::try_from(persisted_version).map_err(ToDoListRepositoryError::persistence)?;
    let tasks = task_rows
        .into_iter()
        .map(row_to_task)
        .collect::<ToDoListRepositoryResult<Vec<_>>>()?;

    Ok(ToDoList::from_persisted(PersistedToDoListData {
        id: ListId::new(id),
        owner,
        title,
        description,
        active,
        tasks,
        last_task_id,
        version,
        created_at,
        updated_at,
    }))
}
