//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name (max 150 characters).
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        is_staff -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Thematic groups posts may belong to.
    post_groups (id) {
        id -> Int8,
        title -> Varchar,
        /// Unique URL slug (max 50 characters).
        slug -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Blog posts.
    ///
    /// `author_id` cascades on user deletion; `group_id` is set to null when
    /// its group is deleted.
    posts (id) {
        id -> Int8,
        text -> Text,
        pub_date -> Timestamptz,
        author_id -> Uuid,
        group_id -> Nullable<Int8>,
        /// Relative image path (max 255 characters).
        image -> Nullable<Varchar>,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> post_groups (group_id));

diesel::allow_tables_to_appear_in_same_query!(users, post_groups, posts);
