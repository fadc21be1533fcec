use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::reviews::{ReviewForm, ReviewFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::reviews::submit_review as submit_review_service;

/// The page the form was posted from, or the home page.
fn referer(req: &HttpRequest) -> String {
    req.headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("/")
        .to_string()
}

#[post("/review/{product_id}/")]
pub async fn submit_review(
    req: HttpRequest,
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    form: Result<web::Form<ReviewForm>, actix_web::Error>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let back = referer(&req);

    let Some(user) = user else {
        FlashMessage::error("Please log in to leave a review.").send();
        return redirect(&server_config.login_url);
    };

    let payload = match form {
        Ok(form) => ReviewFormPayload::try_from(form.into_inner()),
        Err(err) => {
            log::warn!("Unreadable review form: {err}");
            FlashMessage::error("Please fill in the subject and choose a rating.").send();
            return redirect(&back);
        }
    };
    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => {
            log::warn!("Rejected review form: {err}");
            FlashMessage::error(format!("Your review could not be saved: {err}")).send();
            return redirect(&back);
        }
    };

    let ip = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default();

    match submit_review_service(product_id.into_inner(), payload, &ip, &user, repo.get_ref()) {
        Ok(outcome) => {
            FlashMessage::success(outcome.message()).send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect(&back)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to submit review: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
