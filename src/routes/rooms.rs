use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db::{self, rooms::RoomDeletion},
    error::ApiError,
    models::ListRoomsResponse,
    types::DbPool,
    utils::room_name_from_json,
};

#[get("")]
pub async fn get_rooms(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let rooms = web::block(move || {
        let mut conn = pool.get()?;
        db::rooms::get_all_rooms(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(ListRoomsResponse { rooms }))
}

#[derive(Deserialize)]
struct CreateRoomData {
    name: Option<Value>,
}

#[post("/addRooms")]
pub async fn create_room(
    pool: web::Data<DbPool>,
    data: web::Json<CreateRoomData>,
) -> Result<HttpResponse, ApiError> {
    let room_name = room_name_from_json(data.name.as_ref())?;

    let room = web::block({
        let room_name = room_name.clone();
        move || {
            let mut conn = pool.get()?;
            db::rooms::create_room(&mut conn, &room_name)
        }
    })
    .await?
    .map_err(|err| {
        if err.is_unique_violation() {
            log::debug!("room name {room_name:?} is taken");
            ApiError::Conflict(format!("Room {room_name:?} already exists."))
        } else {
            err.into()
        }
    })?;

    log::info!("created room {} ({:?})", room.id, room.name);

    Ok(HttpResponse::Created().json(json!({
        "message": "Room created.",
        "room": room,
    })))
}

#[delete("/{room_id}")]
pub async fn delete_room(
    pool: web::Data<DbPool>,
    room_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let room_id = room_id.into_inner();
    let outcome = web::block(move || {
        let mut conn = pool.get()?;
        db::rooms::delete_room(&mut conn, room_id)
    })
    .await??;

    match outcome {
        RoomDeletion::Deleted { room, messages } => {
            log::info!(
                "deleted room {} ({:?}) with {messages} messages",
                room.id,
                room.name
            );
            Ok(HttpResponse::Ok().json(json!({
                "message": format!("Room {:?} deleted.", room.name),
            })))
        }
        RoomDeletion::NotFound => Err(ApiError::NotFound(format!(
            "No room found with id: {room_id}"
        ))),
        RoomDeletion::Protected(room) => {
            log::warn!("refused to delete protected room {}", room.id);
            Err(ApiError::Forbidden(format!(
                "Room {:?} cannot be deleted.",
                room.name
            )))
        }
    }
}
