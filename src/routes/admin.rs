//! Admin dashboard, list screens and bulk actions.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::admin::tables::{self, AdminTable};
use crate::domain::account::Account;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::admin::{
    AccountBulkActionPayload, AdminListParams, BulkActionForm, ProductBulkActionPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::admin::{self as admin_service, require_admin};
use crate::services::bulk_actions::{apply_account_action, apply_product_action};
use crate::services::{ServiceError, ServiceResult};

/// The admin account behind the request, or the response to send instead.
fn authorize(
    user: Option<&AuthenticatedUser>,
    repo: &DieselRepository,
    server_config: &ServerConfig,
) -> Result<Account, HttpResponse> {
    match require_admin(user, repo) {
        Ok(account) => Ok(account),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Please log in to access the admin.").send();
            Err(redirect(&server_config.login_url))
        }
        Err(ServiceError::Forbidden) => Err(HttpResponse::Forbidden().finish()),
        Err(err) => {
            log::error!("Failed to authorize admin request: {err}");
            Err(HttpResponse::InternalServerError().finish())
        }
    }
}

fn render_table(
    table: ServiceResult<AdminTable>,
    admin: &Account,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match table {
        Ok(table) => {
            let mut context = base_context(flash_messages, user, table.path, server_config);
            context.insert("admin", &admin.username);
            context.insert("table", &table);
            render_template(tera, "admin/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render admin list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/")]
pub async fn dashboard(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    match admin_service::show_dashboard(repo.get_ref()) {
        Ok(stats) => {
            let mut context =
                base_context(&flash_messages, user.as_ref(), "/admin/", &server_config);
            context.insert("admin", &admin.username);
            context.insert("stats", &stats);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render admin dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/accounts/")]
pub async fn accounts(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_accounts(params.accounts_query(), params.page(), repo.get_ref())
        .map(|page| tables::accounts_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/profiles/")]
pub async fn profiles(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_profiles(params.profiles_query(), params.page(), repo.get_ref())
        .map(|page| tables::profiles_table(page, &params, &server_config));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/products/")]
pub async fn products(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::category_choices(repo.get_ref()).and_then(|choices| {
        admin_service::list_products(params.products_query(), params.page(), repo.get_ref())
            .map(|page| tables::products_table(page, &params, &choices, &server_config))
    });
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/categories/")]
pub async fn categories(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table =
        admin_service::list_categories(params.categories_query(), params.page(), repo.get_ref())
            .map(|page| tables::categories_table(page, &params, &server_config));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/variations/")]
pub async fn variations(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table =
        admin_service::list_variations(params.variations_query(), params.page(), repo.get_ref())
            .map(|page| tables::variations_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/reviews/")]
pub async fn reviews(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_reviews(params.reviews_query(), params.page(), repo.get_ref())
        .map(|page| tables::reviews_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/gallery/")]
pub async fn gallery(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_gallery(params.gallery_query(), params.page(), repo.get_ref())
        .map(|page| tables::gallery_table(page, &params, &server_config));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/blog/")]
pub async fn blog_posts(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_blog_posts(params.blog_query(), params.page(), repo.get_ref())
        .map(|page| tables::blog_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/orders/")]
pub async fn orders(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_orders(params.orders_query(), params.page(), repo.get_ref())
        .map(|page| tables::orders_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/order-products/")]
pub async fn order_products(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_order_products(
        params.order_products_query(),
        params.page(),
        repo.get_ref(),
    )
    .map(|page| tables::order_products_table(page, &params, &server_config));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[get("/admin/payments/")]
pub async fn payments(
    params: web::Query<AdminListParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = match authorize(user.as_ref(), &repo, &server_config) {
        Ok(admin) => admin,
        Err(response) => return response,
    };
    let table = admin_service::list_payments(params.payments_query(), params.page(), repo.get_ref())
        .map(|page| tables::payments_table(page, &params));
    render_table(table, &admin, user.as_ref(), &flash_messages, &server_config, &tera)
}

#[post("/admin/products/action/")]
pub async fn product_action(
    form: web::Form<BulkActionForm>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(response) = authorize(user.as_ref(), &repo, &server_config) {
        return response;
    }

    let payload = match ProductBulkActionPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/admin/products/");
        }
    };

    match apply_product_action(&payload, repo.get_ref()) {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to apply product action: {err}");
            FlashMessage::error("The action could not be applied.").send();
        }
    }
    redirect("/admin/products/")
}

#[post("/admin/accounts/action/")]
pub async fn account_action(
    form: web::Form<BulkActionForm>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(response) = authorize(user.as_ref(), &repo, &server_config) {
        return response;
    }

    let payload = match AccountBulkActionPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/admin/accounts/");
        }
    };

    match apply_account_action(&payload, repo.get_ref()) {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to apply account action: {err}");
            FlashMessage::error("The action could not be applied.").send();
        }
    }
    redirect("/admin/accounts/")
}
