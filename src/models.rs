use crate::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the room that can never be deleted.
pub const PROTECTED_ROOM_NAME: &str = "General";

/// Upper bound on `Message::message_text`, in characters.
pub const MAX_MESSAGE_LEN: usize = 255;

// db models
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable, Insertable,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Selectable, Queryable, Identifiable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Room {
    pub id: i32,
    pub name: String,
}

impl Room {
    pub fn is_protected(&self) -> bool {
        self.name == PROTECTED_ROOM_NAME
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = rooms)]
pub struct NewRoom<'a> {
    pub name: &'a str,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Queryable,
    Selectable,
    Identifiable,
    Associations,
)]
#[diesel(belongs_to(Room))]
#[diesel(belongs_to(User))]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Message {
    pub id: i32,
    pub room_id: i32,
    pub user_id: String,
    pub message_text: String,
    pub created_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage<'a> {
    pub room_id: i32,
    pub user_id: &'a str,
    pub message_text: &'a str,
    pub created_at: String,
}

// business models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<Message>,
}
