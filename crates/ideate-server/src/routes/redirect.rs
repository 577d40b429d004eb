use axum::extract::Query;
use axum::response::Redirect;

use super::OwnerQuery;

/// `GET /api/redirect?email=`: landing hop after the form. Marks the
/// dashboard visit as fresh so it starts polling.
pub async fn redirect(Query(query): Query<OwnerQuery>) -> Redirect {
    match query.email("") {
        Ok(email) => Redirect::temporary(&format!(
            "/?email={}&new=true",
            urlencoding::encode(email)
        )),
        Err(_) => Redirect::temporary("/?error=no-email"),
    }
}
