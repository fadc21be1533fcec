use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::product::ProductView;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::storefront::show_home;

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let products = match show_home(repo.get_ref()) {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to render home page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let products: Vec<ProductView> = products.into_iter().map(ProductView::from).collect();
    let mut context = base_context(&flash_messages, user.as_ref(), "index", &server_config);
    context.insert("products", &products);
    render_template(&tera, "index.html", &context)
}

#[get("/about.html")]
pub async fn about(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "about", &server_config);
    render_template(&tera, "about.html", &context)
}

#[get("/contact.html")]
pub async fn contact(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "contact", &server_config);
    render_template(&tera, "contact.html", &context)
}

/// Fallback for unmatched paths.
pub async fn page_not_found(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "404", &server_config);
    crate::routes::not_found(&tera, &context)
}
