use actix_web::{web, HttpRequest, HttpResponse, Scope};

use crate::error::ApiError;

pub mod messages;
pub mod rooms;
pub mod users;

pub fn create_room_scope() -> Scope {
    web::scope("/rooms")
        .service(rooms::get_rooms)
        .service(rooms::delete_room)
        .service(messages::get_room_messages)
        .service(messages::post_message)
}

pub fn create_user_scope() -> Scope {
    web::scope("/users")
        .service(users::create_user)
        .service(users::get_user_by_id)
}

/// Registers every route plus the extractor settings that keep error bodies JSON.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid JSON body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        log::debug!("unmatched path parameter in {}: {err}", req.path());
        ApiError::NotFound(format!("No resource at {}", req.path())).into()
    }))
    .service(rooms::create_room)
    .service(create_room_scope())
    .service(create_user_scope())
    .default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
