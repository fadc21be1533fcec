//! Helpers for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use eshop::db::{DbPool, establish_connection_pool};
use eshop::schema::{
    accounts, blog_posts, cart_items, categories, order_products, orders, products,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let test_db = Self::unmigrated();
        let mut conn = test_db
            .pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        test_db
    }

    /// An empty database without any tables.
    pub fn unmigrated() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn conn(&self) -> eshop::db::DbConnection {
        self.pool
            .get()
            .expect("should acquire DB connection for setup")
    }

    pub fn add_category(&self, name: &str, slug: &str) -> i32 {
        diesel::insert_into(categories::table)
            .values((categories::name.eq(name), categories::slug.eq(slug)))
            .returning(categories::id)
            .get_result(&mut self.conn())
            .expect("should create category")
    }

    /// Product created `created` seconds after the epoch.
    pub fn add_product(&self, category_id: i32, name: &str, slug: &str, created: i64) -> i32 {
        self.add_product_with(category_id, name, slug, None, 10, created)
    }

    pub fn add_product_with(
        &self,
        category_id: i32,
        name: &str,
        slug: &str,
        description: Option<&str>,
        stock: i32,
        created: i64,
    ) -> i32 {
        diesel::insert_into(products::table)
            .values((
                products::category_id.eq(category_id),
                products::name.eq(name),
                products::slug.eq(slug),
                products::description.eq(description),
                products::price.eq(100.0_f64),
                products::stock.eq(stock),
                products::created_at.eq(at(created)),
                products::updated_at.eq(at(created)),
            ))
            .returning(products::id)
            .get_result(&mut self.conn())
            .expect("should create product")
    }

    pub fn add_account(&self, username: &str) -> i32 {
        diesel::insert_into(accounts::table)
            .values((
                accounts::username.eq(username),
                accounts::email.eq(format!("{username}@example.com")),
                accounts::is_active.eq(true),
            ))
            .returning(accounts::id)
            .get_result(&mut self.conn())
            .expect("should create account")
    }

    pub fn add_staff_account(&self, username: &str) -> i32 {
        let id = self.add_account(username);
        diesel::update(accounts::table.filter(accounts::id.eq(id)))
            .set(accounts::is_staff.eq(true))
            .execute(&mut self.conn())
            .expect("should promote account");
        id
    }

    pub fn add_blog_post(&self, title: &str, slug: &str, published: bool, at_secs: i64) {
        diesel::insert_into(blog_posts::table)
            .values((
                blog_posts::title.eq(title),
                blog_posts::slug.eq(slug),
                blog_posts::is_published.eq(published),
                blog_posts::published_at.eq(at(at_secs)),
            ))
            .execute(&mut self.conn())
            .expect("should create blog post");
    }

    pub fn add_cart_item(&self, cart_id: &str, product_id: i32) {
        diesel::insert_into(cart_items::table)
            .values((
                cart_items::cart_id.eq(cart_id),
                cart_items::product_id.eq(product_id),
            ))
            .execute(&mut self.conn())
            .expect("should create cart item");
    }

    /// An order with a single line for `product_id`.
    pub fn add_purchase(&self, user_id: i32, product_id: i32) {
        let mut conn = self.conn();
        let order_id: i32 = diesel::insert_into(orders::table)
            .values((
                orders::user_id.eq(user_id),
                orders::order_number.eq(format!("ORD-{user_id}-{product_id}")),
                orders::first_name.eq("Ada"),
                orders::last_name.eq("Lovelace"),
                orders::phone.eq("555-0100"),
                orders::email.eq("ada@example.com"),
                orders::address_line_1.eq("1 Main St"),
                orders::country.eq("UK"),
                orders::state.eq("London"),
                orders::city.eq("London"),
                orders::order_total.eq(100.0_f64),
                orders::tax.eq(2.0_f64),
                orders::is_ordered.eq(true),
            ))
            .returning(orders::id)
            .get_result(&mut conn)
            .expect("should create order");

        diesel::insert_into(order_products::table)
            .values((
                order_products::order_id.eq(order_id),
                order_products::user_id.eq(user_id),
                order_products::product_id.eq(product_id),
                order_products::quantity.eq(1),
                order_products::product_price.eq(100.0_f64),
                order_products::ordered.eq(true),
            ))
            .execute(&mut conn)
            .expect("should create order product");
    }
}

pub fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0)
        .expect("valid timestamp")
        .naive_utc()
}
