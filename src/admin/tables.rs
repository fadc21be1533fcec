//! Screen definitions for the admin lists. Every screen is rendered by the
//! same `admin/list.html` template from an [`AdminTable`].

use serde::Serialize;
use tera::escape_html;

use crate::admin::badges::{
    account_status_pill, avatar_html, full_name, join_date, location, money, new_badge_html,
    order_date, order_product_pill, order_status_pill, order_total_html, payment_status_pill,
    price_label, rating_stars_html, review_status_pill, stock_label, thumbnail_html,
    variation_status_pill,
};
use crate::domain::account::{Account, UserProfile};
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::order::{Order, OrderProduct, Payment};
use crate::domain::product::Product;
use crate::domain::review::Review;
use crate::domain::types::{OrderStatus, PaymentStatus, VariationCategory};
use crate::domain::variation::Variation;
use crate::forms::admin::AdminListParams;
use crate::models::config::ServerConfig;
use crate::pagination::Paginated;

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub id: i32,
    /// Pre-rendered, escaped HTML.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkAction {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything `admin/list.html` needs to draw one screen.
#[derive(Debug, Clone, Serialize)]
pub struct AdminTable {
    pub title: &'static str,
    /// Path of the screen, also used to highlight the navigation entry.
    pub path: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub filters: Vec<Filter>,
    pub searchable: bool,
    pub search: String,
    pub actions: Vec<BulkAction>,
    pub action_url: Option<&'static str>,
}

impl AdminTable {
    fn new<T>(
        title: &'static str,
        path: &'static str,
        columns: Vec<&'static str>,
        page: Paginated<T>,
        row: impl Fn(T) -> TableRow,
    ) -> Self {
        Self {
            title,
            path,
            columns,
            page: page.page,
            pages: page.pages,
            total: page.total,
            has_previous: page.has_previous,
            has_next: page.has_next,
            rows: page.items.into_iter().map(row).collect(),
            filters: Vec::new(),
            searchable: false,
            search: String::new(),
            actions: Vec::new(),
            action_url: None,
        }
    }

    fn searchable(mut self, params: &AdminListParams) -> Self {
        self.searchable = true;
        self.search = params.search().unwrap_or_default();
        self
    }

    fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    fn actions(mut self, url: &'static str, actions: Vec<BulkAction>) -> Self {
        self.action_url = Some(url);
        self.actions = actions;
        self
    }
}

fn text(value: &str) -> String {
    escape_html(value)
}

fn yes_no(value: bool) -> String {
    let mark = if value { "✔" } else { "✘" };
    mark.to_string()
}

fn options(current: &Option<String>, choices: Vec<(String, String)>) -> Vec<FilterOption> {
    let current = current.as_deref().unwrap_or_default();
    let mut options = vec![FilterOption {
        value: String::new(),
        label: "All".to_string(),
        selected: current.is_empty(),
    }];
    options.extend(choices.into_iter().map(|(value, label)| FilterOption {
        selected: value == current,
        value,
        label,
    }));
    options
}

fn flag_filter(name: &'static str, label: &'static str, current: &Option<String>) -> Filter {
    Filter {
        name,
        label,
        options: options(
            current,
            vec![
                ("1".to_string(), "Yes".to_string()),
                ("0".to_string(), "No".to_string()),
            ],
        ),
    }
}

fn text_filter(
    name: &'static str,
    label: &'static str,
    current: &Option<String>,
    values: &[&str],
) -> Filter {
    Filter {
        name,
        label,
        options: options(
            current,
            values
                .iter()
                .map(|v| (v.to_string(), v.to_string()))
                .collect(),
        ),
    }
}

pub fn accounts_table(page: Paginated<Account>, params: &AdminListParams) -> AdminTable {
    AdminTable::new(
        "Accounts",
        "/admin/accounts/",
        vec!["Avatar", "Email", "Full Name", "Username", "Staff", "Active", "Status", "Joined"],
        page,
        |account| TableRow {
            id: account.id.get(),
            cells: vec![
                avatar_html(&account.first_name, account.email.as_str()),
                text(account.email.as_str()),
                text(&full_name(&account.first_name, &account.last_name)),
                text(account.username.as_str()),
                yes_no(account.is_staff),
                yes_no(account.is_active),
                account_status_pill(&account).html(),
                join_date(account.date_joined),
            ],
        },
    )
    .searchable(params)
    .filter(flag_filter("is_active", "Active", &params.is_active))
    .filter(flag_filter("is_staff", "Staff", &params.is_staff))
    .filter(flag_filter("is_superadmin", "Superuser", &params.is_superadmin))
    .actions(
        "/admin/accounts/action/",
        vec![
            BulkAction { value: "make_active", label: "Mark selected users as active" },
            BulkAction { value: "make_inactive", label: "Mark selected users as inactive" },
            BulkAction { value: "make_staff", label: "Grant staff status" },
            BulkAction { value: "revoke_staff", label: "Revoke staff status" },
        ],
    )
}

pub fn profiles_table(
    page: Paginated<UserProfile>,
    params: &AdminListParams,
    config: &ServerConfig,
) -> AdminTable {
    AdminTable::new(
        "User Profiles",
        "/admin/profiles/",
        vec!["Profile", "User", "Location"],
        page,
        |profile| {
            let picture = match &profile.profile_picture {
                Some(path) => thumbnail_html(Some(&config.media(path.as_str())), 50),
                None => avatar_html(&profile.first_name, profile.email.as_str()),
            };
            let name = if profile.first_name.is_empty() {
                profile.username.as_str().to_string()
            } else {
                format!("{} {}", profile.first_name, profile.last_name)
            };
            TableRow {
                id: profile.id.get(),
                cells: vec![
                    picture,
                    format!(
                        "<strong>{}</strong><br><small>{}</small>",
                        text(&name),
                        text(profile.email.as_str())
                    ),
                    text(&location(&profile.city, &profile.state, &profile.country)),
                ],
            }
        },
    )
    .searchable(params)
}

pub fn products_table(
    page: Paginated<Product>,
    params: &AdminListParams,
    categories: &[Category],
    config: &ServerConfig,
) -> AdminTable {
    let category_options = categories
        .iter()
        .map(|c| (c.id.get().to_string(), c.name.as_str().to_string()))
        .collect();

    AdminTable::new(
        "Products",
        "/admin/products/",
        vec!["Image", "Name", "Category", "Available", "Price", "Stock", "New", "Created"],
        page,
        |product| {
            let image = product.image.as_ref().map(|i| config.media(i.as_str()));
            TableRow {
                id: product.id.get(),
                cells: vec![
                    thumbnail_html(image.as_deref(), 60),
                    format!(
                        r#"<a href="{}">{}</a>"#,
                        text(&product.url()),
                        text(product.name.as_str())
                    ),
                    text(product.category.name.as_str()),
                    yes_no(product.is_available),
                    price_label(product.price.get(), product.discount.get()).html(),
                    stock_label(product.stock.get()).html(),
                    new_badge_html(product.new),
                    order_date(product.created_at),
                ],
            }
        },
    )
    .searchable(params)
    .filter(flag_filter("is_available", "Available", &params.is_available))
    .filter(Filter {
        name: "category",
        label: "Category",
        options: options(&params.category, category_options),
    })
    .filter(flag_filter("new", "New", &params.new))
    .actions(
        "/admin/products/action/",
        vec![
            BulkAction { value: "make_available", label: "Mark selected as available" },
            BulkAction { value: "make_unavailable", label: "Mark selected as unavailable" },
            BulkAction { value: "mark_as_new", label: "Mark selected as NEW" },
            BulkAction { value: "clear_new_flag", label: "Clear NEW flag" },
            BulkAction { value: "apply_discount_percent", label: "Apply 10% discount" },
        ],
    )
}

pub fn categories_table(
    page: Paginated<Category>,
    params: &AdminListParams,
    config: &ServerConfig,
) -> AdminTable {
    AdminTable::new(
        "Categories",
        "/admin/categories/",
        vec!["Name", "Slug", "Image"],
        page,
        |category| {
            let image = category.image.as_ref().map(|i| config.media(i.as_str()));
            TableRow {
                id: category.id.get(),
                cells: vec![
                    text(category.name.as_str()),
                    text(category.slug.as_str()),
                    thumbnail_html(image.as_deref(), 50),
                ],
            }
        },
    )
    .searchable(params)
}

pub fn variations_table(page: Paginated<Variation>, params: &AdminListParams) -> AdminTable {
    let categories: Vec<&str> = VariationCategory::ALL.iter().map(|c| c.as_str()).collect();

    AdminTable::new(
        "Variations",
        "/admin/variations/",
        vec!["Product", "Category", "Value", "Active", "Status"],
        page,
        |variation| TableRow {
            id: variation.id.get(),
            cells: vec![
                text(&variation.product_name),
                text(variation.category.as_str()),
                text(variation.value.as_str()),
                yes_no(variation.is_active),
                variation_status_pill(variation.is_active).html(),
            ],
        },
    )
    .searchable(params)
    .filter(text_filter("category", "Category", &params.category, &categories))
    .filter(flag_filter("is_active", "Active", &params.is_active))
}

pub fn reviews_table(page: Paginated<Review>, params: &AdminListParams) -> AdminTable {
    AdminTable::new(
        "Reviews",
        "/admin/reviews/",
        vec!["Product", "User", "Subject", "Rating", "Status"],
        page,
        |review| TableRow {
            id: review.id.get(),
            cells: vec![
                text(&review.product_name),
                text(&review.author),
                text(&review.subject),
                rating_stars_html(review.rating.get()),
                review_status_pill(review.status).html(),
            ],
        },
    )
    .filter(text_filter(
        "rating",
        "Rating",
        &params.rating,
        &["1", "2", "3", "4", "5"],
    ))
    .filter(flag_filter("status", "Approved", &params.status))
}

pub fn gallery_table(
    page: Paginated<GalleryImage>,
    _params: &AdminListParams,
    config: &ServerConfig,
) -> AdminTable {
    AdminTable::new(
        "Product Gallery",
        "/admin/gallery/",
        vec!["Image", "Product"],
        page,
        |image| TableRow {
            id: image.id.get(),
            cells: vec![
                thumbnail_html(Some(&config.media(image.image.as_str())), 60),
                image.product_id.to_string(),
            ],
        },
    )
}

pub fn blog_table(page: Paginated<BlogPost>, params: &AdminListParams) -> AdminTable {
    AdminTable::new(
        "Blog Posts",
        "/admin/blog/",
        vec!["Title", "Author", "Published", "Published At"],
        page,
        |post| TableRow {
            id: post.id.get(),
            cells: vec![
                text(post.title.as_str()),
                text(&post.author),
                yes_no(post.is_published),
                order_date(post.published_at),
            ],
        },
    )
    .searchable(params)
    .filter(flag_filter("is_published", "Published", &params.is_published))
}

pub fn orders_table(page: Paginated<Order>, params: &AdminListParams) -> AdminTable {
    let statuses: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();

    AdminTable::new(
        "Orders",
        "/admin/orders/",
        vec!["Order Number", "Full Name", "Email", "Total", "Status", "Order Date"],
        page,
        |order| TableRow {
            id: order.id.get(),
            cells: vec![
                text(order.order_number.as_str()),
                text(&order.full_name()),
                text(&order.email),
                order_total_html(order.order_total.get()),
                order_status_pill(order.status).html(),
                order_date(order.created_at),
            ],
        },
    )
    .searchable(params)
    .filter(flag_filter("is_ordered", "Ordered", &params.is_ordered))
    .filter(text_filter("status", "Status", &params.status, &statuses))
}

pub fn order_products_table(
    page: Paginated<OrderProduct>,
    params: &AdminListParams,
    config: &ServerConfig,
) -> AdminTable {
    AdminTable::new(
        "Order Products",
        "/admin/order-products/",
        vec!["Image", "Product", "User", "Quantity", "Price", "Status"],
        page,
        |line| {
            let image = line.product_image.as_deref().map(|i| config.media(i));
            TableRow {
                id: line.id.get(),
                cells: vec![
                    thumbnail_html(image.as_deref(), 50),
                    text(&line.product_name),
                    text(&line.user_email),
                    line.quantity.to_string(),
                    money(line.product_price.get()),
                    order_product_pill(line.ordered).html(),
                ],
            }
        },
    )
    .searchable(params)
    .filter(flag_filter("ordered", "Ordered", &params.ordered))
}

pub fn payments_table(page: Paginated<Payment>, params: &AdminListParams) -> AdminTable {
    let statuses: Vec<&str> = PaymentStatus::ALL.iter().map(|s| s.as_str()).collect();

    AdminTable::new(
        "Payments",
        "/admin/payments/",
        vec!["Payment ID", "User", "Method", "Amount Paid", "Status", "Created"],
        page,
        |payment| TableRow {
            id: payment.id.get(),
            cells: vec![
                text(payment.payment_id.as_str()),
                text(&payment.user_email),
                text(payment.payment_method.as_str()),
                money(payment.amount_paid.get()),
                payment_status_pill(payment.status).html(),
                order_date(payment.created_at),
            ],
        },
    )
    .searchable(params)
    .filter(text_filter("status", "Status", &params.status, &statuses))
}
