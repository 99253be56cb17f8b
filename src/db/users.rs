use diesel::prelude::*;

use crate::models::User;

use super::DbError;

pub fn find_user_by_id(conn: &mut SqliteConnection, uid: &str) -> Result<Option<User>, DbError> {
    use crate::schema::users::dsl::*;

    let user = users
        .filter(id.eq(uid))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    Ok(user)
}

/// Inserts a user. A taken id surfaces as a unique violation.
pub fn insert_new_user(conn: &mut SqliteConnection, new_user: &User) -> Result<(), DbError> {
    use crate::schema::users::dsl::*;

    conn.immediate_transaction::<_, DbError, _>(|conn| {
        diesel::insert_into(users).values(new_user).execute(conn)?;
        Ok(())
    })
}
