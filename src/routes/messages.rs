use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db::{self, messages::MessagePost},
    error::ApiError,
    models::ListMessagesResponse,
    types::DbPool,
    utils::{message_text_from_json, user_id_from_json},
};

fn room_not_found(room_id: i32) -> ApiError {
    ApiError::NotFound(format!("No room found with id: {room_id}"))
}

#[get("/{room_id}/messages")]
pub async fn get_room_messages(
    pool: web::Data<DbPool>,
    room_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let room_id = room_id.into_inner();
    let messages = web::block(move || {
        let mut conn = pool.get()?;
        db::messages::get_room_messages(&mut conn, room_id)
    })
    .await??
    .ok_or_else(|| room_not_found(room_id))?;

    Ok(HttpResponse::Ok().json(ListMessagesResponse { messages }))
}

#[derive(Debug, Deserialize)]
struct PostMessageData {
    user_id: Option<Value>,
    message_text: Option<Value>,
}

#[post("/{room_id}/messages")]
pub async fn post_message(
    pool: web::Data<DbPool>,
    room_id: web::Path<i32>,
    form_data: web::Json<PostMessageData>,
) -> Result<HttpResponse, ApiError> {
    let room_id = room_id.into_inner();
    let user_id = user_id_from_json(form_data.user_id.as_ref())?;
    let message_text = message_text_from_json(form_data.message_text.as_ref())?;

    let res = {
        let user_id = user_id.clone();
        web::block(move || {
            let mut conn = pool.get()?;
            db::messages::post_message(&mut conn, room_id, &user_id, &message_text)
        })
        .await??
    };

    match res {
        MessagePost::Posted(message) => {
            log::info!("user {user_id} posted message {} in room {room_id}", message.id);
            Ok(HttpResponse::Created().json(json!({
                "message": "Message posted.",
                "data": message,
            })))
        }
        MessagePost::RoomNotFound => Err(room_not_found(room_id)),
        MessagePost::UserNotFound => Err(ApiError::NotFound(format!(
            "No user found with id: {user_id}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::{db::test_pool, routes::configure};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn posted_messages_are_listed_in_order() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "id": 7, "name": "Ann" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        let req = test::TestRequest::post()
            .uri("/addRooms")
            .set_json(json!({ "name": "Lobby" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        for text in ["first", "second"] {
            let req = test::TestRequest::post()
                .uri("/rooms/1/messages")
                .set_json(json!({ "user_id": 7, "message_text": text }))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["data"]["room_id"], 1);
            assert_eq!(body["data"]["user_id"], "7");
            assert_eq!(body["data"]["message_text"], text);
        }

        let req = test::TestRequest::get().uri("/rooms/1/messages").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let texts: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["message_text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[actix_web::test]
    async fn posting_needs_existing_room_and_user() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/rooms/1/messages")
            .set_json(json!({ "user_id": "ann", "message_text": "hi" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/addRooms")
            .set_json(json!({ "name": "Lobby" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/rooms/1/messages")
            .set_json(json!({ "user_id": "ann", "message_text": "hi" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "No user found with id: ann" }));

        let req = test::TestRequest::get().uri("/rooms/2/messages").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn invalid_message_text_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(configure),
        )
        .await;

        for payload in [
            json!({ "user_id": "ann" }),
            json!({ "user_id": "ann", "message_text": "  " }),
            json!({ "user_id": "ann", "message_text": 3 }),
            json!({ "user_id": "ann", "message_text": "x".repeat(256) }),
            json!({ "message_text": "hi" }),
        ] {
            let req = test::TestRequest::post()
                .uri("/rooms/1/messages")
                .set_json(&payload)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{payload}");
        }
    }
}
