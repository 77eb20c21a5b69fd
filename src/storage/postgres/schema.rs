//! Diesel schema for project and task persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Server-assigned project identifier.
        id -> Int8,
        /// Unique project name.
        name -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records owned by projects.
    tasks (id) {
        /// Server-assigned task identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Closure timestamp, set exactly while the task is done.
        closed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
