//! Diesel schema for to-do list persistence.

diesel::table! {
    /// To-do list records.
    todo_lists (id) {
        /// List identifier.
        id -> Int8,
        /// Owning username.
        #[max_length = 50]
        owner -> Varchar,
        /// List title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Active flag.
        active -> Bool,
        /// Highest task identifier issued within the list.
        last_task_id -> Int8,
        /// Optimistic concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks belonging to a to-do list.
    list_tasks (list_id, id) {
        /// Owning list identifier.
        list_id -> Int8,
        /// Task identifier within the list.
        id -> Int8,
        /// Task name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(list_tasks -> todo_lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(todo_lists, list_tasks);
