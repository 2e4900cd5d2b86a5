//! In-memory repository for to-do lists.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::todo_list::{
    domain::{ListId, NewToDoList, ToDoList},
    ports::{ToDoListRepository, ToDoListRepositoryError, ToDoListRepositoryResult},
};
use crate::user::domain::Username;

/// Thread-safe in-memory to-do list repository.
///
/// Identifiers start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToDoListRepository {
    state: Arc<RwLock<InMemoryListState>>,
}

#[derive(Debug, Default)]
struct InMemoryListState {
    lists: BTreeMap<ListId, ToDoList>,
    last_id: i64,
}

impl InMemoryToDoListRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ToDoListRepositoryError {
    ToDoListRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ToDoListRepository for InMemoryToDoListRepository {
    async fn insert(&self, list: &NewToDoList) -> ToDoListRepositoryResult<ToDoList> {
        let mut state = self.state.write().map_err(poisoned)?;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| poisoned("list identifier space exhausted"))?;
        let created = ToDoList::from_new(ListId::new(next), list);

        state.last_id = next;
        state.lists.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn update(&self, list: &ToDoList) -> ToDoListRepositoryResult<ToDoList> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .lists
            .get_mut(&list.id())
            .ok_or(ToDoListRepositoryError::NotFound(list.id()))?;

        if stored.version() != list.version() {
            return Err(ToDoListRepositoryError::VersionConflict {
                id: list.id(),
                expected: list.version(),
            });
        }

        let mut updated = list.clone();
        updated.advance_version();
        *stored = updated.clone();
        Ok(updated)
    }

    async fn find_by_id_and_owner(
        &self,
        id: ListId,
        owner: &Username,
    ) -> ToDoListRepositoryResult<Option<ToDoList>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .lists
            .get(&id)
            .filter(|list| list.is_owned_by(owner))
            .cloned())
    }

    async fn find_all_by_owner(&self, owner: &Username) -> ToDoListRepositoryResult<Vec<ToDoList>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .lists
            .values()
            .filter(|list| list.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: ListId, owner: &Username) -> ToDoListRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let owned = state
            .lists
            .get(&id)
            .is_some_and(|list| list.is_owned_by(owner));
        if !owned {
            return Err(ToDoListRepositoryError::NotFound(id));
        }
        state.lists.remove(&id);
        Ok(())
    }
}
