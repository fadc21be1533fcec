use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::product::{CategoryView, ProductView, ReviewView, gallery_paths};
use crate::models::config::ServerConfig;
use crate::pagination::PageRequest;
use crate::repository::DieselRepository;
use crate::routes::{base_context, not_found, render_template};
use crate::services::ServiceError;
use crate::services::storefront::{
    search_products, show_product_details as show_product_details_service,
    show_shop as show_shop_service,
};

/// Session key holding the visitor's cart identifier.
pub const CART_SESSION_KEY: &str = "cart_id";

#[derive(Deserialize)]
struct ShopQueryParams {
    page: Option<String>,
}

#[derive(Deserialize)]
struct SearchQueryParams {
    keyword: Option<String>,
}

fn render_shop(
    category_slug: Option<&str>,
    params: &ShopQueryParams,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let page = PageRequest::parse(params.page.as_deref());
    let mut context = base_context(flash_messages, user, "shop", server_config);

    match show_shop_service(category_slug, page, repo) {
        Ok(listing) => {
            context.insert("category", &listing.category.map(CategoryView::from));
            context.insert("products", &listing.products.map(ProductView::from));
            render_template(tera, "shop/shop.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(tera, &context),
        Err(err) => {
            log::error!("Failed to render shop page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/shop/")]
pub async fn shop(
    params: web::Query<ShopQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_shop(
        None,
        &params,
        user.as_ref(),
        &flash_messages,
        repo.get_ref(),
        &server_config,
        &tera,
    )
}

#[get("/shop/{category_slug}/")]
pub async fn shop_category(
    category_slug: web::Path<String>,
    params: web::Query<ShopQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_shop(
        Some(category_slug.as_str()),
        &params,
        user.as_ref(),
        &flash_messages,
        repo.get_ref(),
        &server_config,
        &tera,
    )
}

#[get("/shop/{category_slug}/{product_slug}/")]
pub async fn product_details(
    path: web::Path<(String, String)>,
    session: Session,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, product_slug) = path.into_inner();
    let cart_id = session
        .get::<String>(CART_SESSION_KEY)
        .unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable cart session: {e}");
            None
        });

    let mut context = base_context(&flash_messages, user.as_ref(), "shop", &server_config);

    match show_product_details_service(
        &category_slug,
        &product_slug,
        cart_id.as_deref(),
        user.as_ref(),
        repo.get_ref(),
    ) {
        Ok(details) => {
            let reviews: Vec<ReviewView> =
                details.reviews.into_iter().map(ReviewView::from).collect();
            context.insert("product", &ProductView::from(details.product));
            context.insert("gallery", &gallery_paths(details.gallery));
            context.insert("reviews", &reviews);
            context.insert("rating", &details.rating);
            context.insert("in_cart", &details.in_cart);
            context.insert("purchased", &details.purchased);
            render_template(&tera, "shop/product_details.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to render product `{category_slug}/{product_slug}`: {err}");
            not_found(&tera, &context)
        }
    }
}

#[get("/search/")]
pub async fn search(
    params: web::Query<SearchQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match search_products(params.keyword.as_deref(), repo.get_ref()) {
        Ok(results) => {
            let mut context =
                base_context(&flash_messages, user.as_ref(), "search", &server_config);
            context.insert("count", &results.count());
            context.insert("keyword", &results.keyword);
            let products: Vec<ProductView> =
                results.products.into_iter().map(ProductView::from).collect();
            context.insert("products", &products);
            render_template(&tera, "shop/search.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render search results: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
