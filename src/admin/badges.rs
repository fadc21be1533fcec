use chrono::NaiveDateTime;
use tera::escape_html;

use crate::domain::account::Account;
use crate::domain::types::{OrderStatus, PaymentStatus};

pub const BLUE: &str = "#007bff";
pub const GREEN: &str = "#28a745";
pub const YELLOW: &str = "#ffc107";
pub const RED: &str = "#dc3545";
pub const GREY: &str = "#6c757d";
pub const PINK: &str = "#f5576c";

/// Rounded, filled status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub label: String,
    pub background: &'static str,
}

impl Pill {
    fn new(label: impl Into<String>, background: &'static str) -> Self {
        Self {
            label: label.into(),
            background,
        }
    }

    pub fn html(&self) -> String {
        format!(
            r#"<span class="pill" style="background: {}; color: white; padding: 4px 8px; border-radius: 12px; font-size: 11px;">{}</span>"#,
            self.background,
            escape_html(&self.label)
        )
    }
}

/// Inline text drawn in a colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    pub text: String,
    pub color: &'static str,
    pub bold: bool,
}

impl ColoredText {
    pub fn html(&self) -> String {
        let weight = if self.bold { " font-weight: bold;" } else { "" };
        format!(
            r#"<span style="color: {};{weight}">{}</span>"#,
            self.color,
            escape_html(&self.text)
        )
    }
}

pub fn order_status_pill(status: OrderStatus) -> Pill {
    let color = match status {
        OrderStatus::New => BLUE,
        OrderStatus::Accepted | OrderStatus::Completed => GREEN,
        OrderStatus::Cancelled => RED,
    };
    Pill::new(status.as_str().to_uppercase(), color)
}

pub fn payment_status_pill(status: PaymentStatus) -> Pill {
    match status {
        PaymentStatus::Completed => Pill::new("COMPLETED", GREEN),
        PaymentStatus::Pending => Pill::new("PENDING", YELLOW),
        PaymentStatus::Failed => Pill::new("FAILED", RED),
    }
}

pub fn review_status_pill(approved: bool) -> Pill {
    if approved {
        Pill::new("APPROVED", GREEN)
    } else {
        Pill::new("PENDING", YELLOW)
    }
}

pub fn variation_status_pill(active: bool) -> Pill {
    if active {
        Pill::new("ACTIVE", GREEN)
    } else {
        Pill::new("INACTIVE", GREY)
    }
}

pub fn order_product_pill(ordered: bool) -> Pill {
    if ordered {
        Pill::new("ORDERED", GREEN)
    } else {
        Pill::new("PENDING", YELLOW)
    }
}

/// Highest-privilege status of an account.
pub fn account_status_pill(account: &Account) -> Pill {
    if account.is_superadmin {
        Pill::new("SUPERUSER", RED)
    } else if account.is_staff {
        Pill::new("STAFF", YELLOW)
    } else if account.is_active {
        Pill::new("ACTIVE", GREEN)
    } else {
        Pill::new("INACTIVE", GREY)
    }
}

/// "NEW" pill for flagged products, a dash otherwise.
pub fn new_badge_html(new: bool) -> String {
    if new {
        Pill::new("NEW", PINK).html()
    } else {
        "-".to_string()
    }
}

/// Stock level buckets shown in the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTier {
    Out,
    Low,
    InStock,
}

impl StockTier {
    /// Units at or below this are low.
    pub const LOW_THRESHOLD: i32 = 10;

    pub fn of(stock: i32) -> Self {
        if stock <= 0 {
            Self::Out
        } else if stock <= Self::LOW_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Out => "Out",
            Self::Low => "Low",
            Self::InStock => "In Stock",
        }
    }
}

pub fn stock_label(stock: i32) -> ColoredText {
    let (text, color) = match StockTier::of(stock) {
        StockTier::Out => ("✗ Out".to_string(), RED),
        StockTier::Low => (format!("⚠ Low ({stock})"), YELLOW),
        StockTier::InStock => (format!("✓ In Stock ({stock})"), GREEN),
    };
    ColoredText {
        text,
        color,
        bold: false,
    }
}

/// Five glyphs: one filled star per rating point.
pub fn rating_stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn rating_stars_html(rating: i32) -> String {
    ColoredText {
        text: rating_stars(rating),
        color: YELLOW,
        bold: false,
    }
    .html()
}

/// `$12.34`
pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Effective price in green when discounted, list price in blue otherwise.
pub fn price_label(price: f64, discount: f64) -> ColoredText {
    if discount > 0.0 {
        ColoredText {
            text: money((price - discount).max(0.0)),
            color: GREEN,
            bold: true,
        }
    } else {
        ColoredText {
            text: money(price),
            color: BLUE,
            bold: true,
        }
    }
}

pub fn order_total_html(total: f64) -> String {
    ColoredText {
        text: money(total),
        color: GREEN,
        bold: true,
    }
    .html()
}

/// First letter of the first name, or the upper-cased first letter of the email.
pub fn avatar_initial(first_name: &str, email: &str) -> String {
    match first_name.chars().next() {
        Some(c) => c.to_string(),
        None => email
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default(),
    }
}

pub fn avatar_html(first_name: &str, email: &str) -> String {
    format!(
        r#"<div class="avatar" style="width: 40px; height: 40px; border-radius: 50%; background: linear-gradient(135deg, #667eea, #764ba2); display: flex; align-items: center; justify-content: center; color: white; font-weight: bold;">{}</div>"#,
        escape_html(&avatar_initial(first_name, email))
    )
}

pub fn full_name(first_name: &str, last_name: &str) -> String {
    if first_name.is_empty() && last_name.is_empty() {
        "No Name".to_string()
    } else {
        format!("{first_name} {last_name}")
    }
}

/// Non-empty parts joined with commas.
pub fn location(city: &str, state: &str, country: &str) -> String {
    let parts: Vec<&str> = [city, state, country]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        "Not specified".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn order_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn join_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Square thumbnail of a media URL, or "No Image".
pub fn thumbnail_html(url: Option<&str>, size: u32) -> String {
    match url {
        Some(url) => format!(
            r#"<img src="{}" width="{size}" height="{size}" style="border-radius: 8px; object-fit: cover;" />"#,
            escape_html(url)
        ),
        None => "No Image".to_string(),
    }
}
