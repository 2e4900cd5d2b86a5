//! In-memory repository behaviour for to-do lists.

use crate::todo_list::{
    adapters::memory::InMemoryToDoListRepository,
    domain::{ListId, ListTitle, NewToDoList},
    ports::{ToDoListRepository, ToDoListRepositoryError},
};
use crate::user::domain::Username;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryToDoListRepository {
    InMemoryToDoListRepository::new()
}

fn user(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

fn new_list(owner: &str, title: &str) -> NewToDoList {
    NewToDoList::new(
        user(owner),
        ListTitle::new(title).expect("valid title"),
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_distinct_identifiers(repository: InMemoryToDoListRepository) {
    let first = repository
        .insert(&new_list("alice", "Groceries"))
        .await
        .expect("insert should succeed");
    let second = repository
        .insert(&new_list("bob", "Chores"))
        .await
        .expect("insert should succeed");

    assert_eq!(first.id(), ListId::new(1));
    assert_eq!(second.id(), ListId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_are_scoped_to_the_owner(repository: InMemoryToDoListRepository) {
    let created = repository
        .insert(&new_list("alice", "Groceries"))
        .await
        .expect("insert should succeed");

    let as_owner = repository
        .find_by_id_and_owner(created.id(), &user("alice"))
        .await
        .expect("lookup should succeed");
    let as_stranger = repository
        .find_by_id_and_owner(created.id(), &user("bob"))
        .await
        .expect("lookup should succeed");

    assert_eq!(as_owner, Some(created));
    assert_eq!(as_stranger, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_returns_only_owned_lists_in_id_order(repository: InMemoryToDoListRepository) {
    for (owner, title) in [("alice", "One"), ("bob", "Other"), ("alice", "Two")] {
        repository
            .insert(&new_list(owner, title))
            .await
            .expect("insert should succeed");
    }

    let titles: Vec<String> = repository
        .find_all_by_owner(&user("alice"))
        .await
        .expect("listing should succeed")
        .iter()
        .map(|list| list.title().as_str().to_owned())
        .collect();

    assert_eq!(titles, vec!["One".to_owned(), "Two".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_update_is_rejected(repository: InMemoryToDoListRepository) {
    let created = repository
        .insert(&new_list("alice", "Groceries"))
        .await
        .expect("insert should succeed");
    let mut first_writer = created.clone();
    let mut second_writer = created;

    first_writer.set_active(false, &DefaultClock);
    let stored = repository
        .update(&first_writer)
        .await
        .expect("first update should succeed");
    assert_eq!(stored.version(), 1);

    second_writer.set_active(false, &DefaultClock);
    let result = repository.update(&second_writer).await;

    assert!(matches!(
        result,
        Err(ToDoListRepositoryError::VersionConflict { expected: 0, .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_requires_ownership(repository: InMemoryToDoListRepository) {
    let created = repository
        .insert(&new_list("alice", "Groceries"))
        .await
        .expect("insert should succeed");

    let by_stranger = repository.delete(created.id(), &user("bob")).await;
    assert!(matches!(by_stranger, Err(ToDoListRepositoryError::NotFound(id)) if id == created.id()));

    repository
        .delete(created.id(), &user("alice"))
        .await
        .expect("owner delete should succeed");
    let again = repository.delete(created.id(), &user("alice")).await;
    assert!(matches!(again, Err(ToDoListRepositoryError::NotFound(_))));
}
