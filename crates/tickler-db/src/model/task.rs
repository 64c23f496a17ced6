use diesel::{prelude::*, sqlite::Sqlite};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::scheduler)]
#[diesel(check_for_backend(Sqlite))]
pub struct Task {
    pub id: i32,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Column values for inserting a task or overwriting an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = schema::scheduler)]
pub struct NewTask {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}
