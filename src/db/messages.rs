use diesel::prelude::*;

use crate::models::{Message, NewMessage};
use crate::schema::messages;

use super::{iso_date, rooms::find_room_by_id, users::find_user_by_id, DbError};

/// Outcome of [`post_message`].
#[derive(Debug, PartialEq)]
pub enum MessagePost {
    Posted(Message),
    RoomNotFound,
    UserNotFound,
}

/// Messages of a room in posting order, or `None` if the room does not exist.
pub fn get_room_messages(
    conn: &mut SqliteConnection,
    room_id: i32,
) -> Result<Option<Vec<Message>>, DbError> {
    conn.immediate_transaction::<_, DbError, _>(|conn| {
        if find_room_by_id(conn, room_id)?.is_none() {
            return Ok(None);
        }

        let messages = messages::table
            .filter(messages::room_id.eq(room_id))
            .select(Message::as_select())
            .order(messages::id.asc())
            .load(conn)?;

        Ok(Some(messages))
    })
}

pub fn post_message(
    conn: &mut SqliteConnection,
    room_id: i32,
    user_id: &str,
    message_text: &str,
) -> Result<MessagePost, DbError> {
    conn.immediate_transaction::<_, DbError, _>(|conn| {
        if find_room_by_id(conn, room_id)?.is_none() {
            return Ok(MessagePost::RoomNotFound);
        }
        if find_user_by_id(conn, user_id)?.is_none() {
            return Ok(MessagePost::UserNotFound);
        }

        let message = diesel::insert_into(messages::table)
            .values(&NewMessage {
                room_id,
                user_id,
                message_text,
                created_at: iso_date(),
            })
            .returning(Message::as_returning())
            .get_result(conn)?;

        Ok(MessagePost::Posted(message))
    })
}
