use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PageRequest;
use crate::repository::DieselRepository;
use crate::routes::{base_context, not_found, render_template};
use crate::services::ServiceError;
use crate::services::blog::{show_blog, show_blog_post};

#[derive(Deserialize)]
struct BlogQueryParams {
    page: Option<String>,
}

fn render_blog(
    params: &BlogQueryParams,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let page = PageRequest::parse(params.page.as_deref());

    match show_blog(page, repo) {
        Ok(listing) => {
            let mut context = base_context(flash_messages, user, "blog", server_config);
            context.insert("source", &listing.source);
            context.insert("posts", &listing.posts);
            render_template(tera, "blog/blog.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render blog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blog/")]
pub async fn blog(
    params: web::Query<BlogQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_blog(
        &params,
        user.as_ref(),
        &flash_messages,
        repo.get_ref(),
        &server_config,
        &tera,
    )
}

#[get("/blog.html")]
pub async fn blog_html(
    params: web::Query<BlogQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_blog(
        &params,
        user.as_ref(),
        &flash_messages,
        repo.get_ref(),
        &server_config,
        &tera,
    )
}

#[get("/blog/{slug}/")]
pub async fn blog_detail(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, user.as_ref(), "blog", &server_config);

    match show_blog_post(&slug, repo.get_ref()) {
        Ok(post) => {
            context.insert("post", &post);
            render_template(&tera, "blog/blog_detail.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to render blog post `{slug}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
