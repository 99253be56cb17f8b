use diesel::prelude::*;

use crate::models::{NewRoom, Room};
use crate::schema::{messages, rooms};

use super::DbError;

/// Outcome of [`delete_room`].
#[derive(Debug, PartialEq)]
pub enum RoomDeletion {
    /// The room and `messages` dependent rows were removed.
    Deleted { room: Room, messages: usize },
    NotFound,
    Protected(Room),
}

pub fn get_all_rooms(conn: &mut SqliteConnection) -> Result<Vec<Room>, DbError> {
    let rooms = rooms::table
        .select(Room::as_select())
        .order(rooms::id.asc())
        .load(conn)?;

    Ok(rooms)
}

pub fn find_room_by_id(conn: &mut SqliteConnection, room_id: i32) -> Result<Option<Room>, DbError> {
    let room = rooms::table
        .find(room_id)
        .select(Room::as_select())
        .first(conn)
        .optional()?;

    Ok(room)
}

/// Inserts a room. A taken name surfaces as a unique violation.
pub fn create_room(conn: &mut SqliteConnection, room_name: &str) -> Result<Room, DbError> {
    conn.immediate_transaction::<_, DbError, _>(|conn| {
        let room = diesel::insert_into(rooms::table)
            .values(&NewRoom { name: room_name })
            .returning(Room::as_returning())
            .get_result(conn)?;

        Ok(room)
    })
}

/// Deletes a room together with its messages in one transaction.
///
/// The protected room is reported back untouched.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i32) -> Result<RoomDeletion, DbError> {
    conn.immediate_transaction::<_, DbError, _>(|conn| {
        let Some(room) = find_room_by_id(conn, room_id)? else {
            return Ok(RoomDeletion::NotFound);
        };

        if room.is_protected() {
            return Ok(RoomDeletion::Protected(room));
        }

        let removed = diesel::delete(messages::table.filter(messages::room_id.eq(room.id)))
            .execute(conn)?;
        diesel::delete(rooms::table.find(room.id)).execute(conn)?;

        Ok(RoomDeletion::Deleted {
            room,
            messages: removed,
        })
    })
}
