use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

pub mod admin;
pub mod blog;
pub mod main;
pub mod reviews;
pub mod shop;

/// Register every storefront and admin handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(main::about)
        .service(main::contact)
        .service(shop::shop)
        .service(shop::shop_category)
        .service(shop::product_details)
        .service(shop::search)
        .service(reviews::submit_review)
        .service(blog::blog)
        .service(blog::blog_html)
        .service(blog::blog_detail)
        .service(admin::dashboard)
        .service(admin::accounts)
        .service(admin::account_action)
        .service(admin::profiles)
        .service(admin::products)
        .service(admin::product_action)
        .service(admin::categories)
        .service(admin::variations)
        .service(admin::reviews)
        .service(admin::gallery)
        .service(admin::blog_posts)
        .service(admin::orders)
        .service(admin::order_products)
        .service(admin::payments)
        .default_service(web::to(main::page_not_found));
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

/// 404 page rendered with the usual layout.
pub fn not_found(tera: &Tera, context: &Context) -> HttpResponse {
    let body = tera.render("404.html", context).unwrap_or_else(|e| {
        log::error!("Failed to render template '404.html': {e}");
        String::new()
    });
    HttpResponse::NotFound().body(body)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    server_config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context.insert("media_url", &server_config.media_url);
    context.insert("login_url", &server_config.login_url);
    context
}
