use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db,
    error::ApiError,
    models::User,
    types::DbPool,
    utils::{user_id_from_json, user_name_from_json},
};

#[get("/{user_id}")]
pub async fn get_user_by_id(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = id.into_inner();
    let user = web::block({
        let user_id = user_id.clone();
        move || {
            let mut conn = pool.get()?;
            db::users::find_user_by_id(&mut conn, &user_id)
        }
    })
    .await??;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(ApiError::NotFound(format!(
            "No user found with id: {user_id}"
        ))),
    }
}

#[derive(Deserialize)]
struct CreateUserData {
    id: Option<Value>,
    name: Option<Value>,
}

#[post("")]
pub async fn create_user(
    pool: web::Data<DbPool>,
    form: web::Json<CreateUserData>,
) -> Result<HttpResponse, ApiError> {
    let new_user = User {
        id: user_id_from_json(form.id.as_ref())?,
        name: user_name_from_json(form.name.as_ref())?,
    };
    let User { id, name } = new_user.clone();

    web::block(move || {
        let mut conn = pool.get()?;
        db::users::insert_new_user(&mut conn, &new_user)
    })
    .await?
    .map_err(|err| {
        if err.is_unique_violation() {
            ApiError::Conflict(format!("User {id} already exists."))
        } else {
            err.into()
        }
    })?;

    log::info!("created user {id}");

    Ok(HttpResponse::Created().json(json!({
        "message": "User created.",
        "name": name,
    })))
}
