use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    Order as DomainOrder, OrderProduct as DomainOrderProduct, Payment as DomainPayment,
};
use crate::domain::types::{
    GatewayPaymentId, MoneyAmount, OrderNumber, OrderStatus, PaymentMethod, PaymentStatus,
    Quantity, TypeConstraintError,
};

/// Diesel model representing the `orders` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    pub id: i32,
    pub user_id: Option<i32>,
    pub payment_id: Option<i32>,
    pub order_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub order_note: String,
    pub order_total: f64,
    pub tax: f64,
    pub status: String,
    pub ip: String,
    pub is_ordered: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `order_products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::order_products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderProduct {
    pub id: i32,
    pub order_id: i32,
    pub payment_id: Option<i32>,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub product_price: f64,
    pub ordered: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `payments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Payment {
    pub id: i32,
    pub user_id: i32,
    pub payment_id: String,
    pub payment_method: String,
    pub amount_paid: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Order> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order.id.try_into()?,
            user_id: order.user_id.map(TryInto::try_into).transpose()?,
            payment_id: order.payment_id.map(TryInto::try_into).transpose()?,
            order_number: OrderNumber::new(order.order_number)?,
            first_name: order.first_name,
            last_name: order.last_name,
            phone: order.phone,
            email: order.email,
            address_line_1: order.address_line_1,
            address_line_2: order.address_line_2,
            country: order.country,
            state: order.state,
            city: order.city,
            order_note: order.order_note,
            order_total: MoneyAmount::new(order.order_total)?,
            tax: MoneyAmount::new(order.tax)?,
            status: OrderStatus::try_from(order.status)?,
            ip: order.ip,
            is_ordered: order.is_ordered,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

/// Order line joined with the product name/image and buyer email.
pub type OrderProductRow = (OrderProduct, String, Option<String>, String);

impl TryFrom<OrderProductRow> for DomainOrderProduct {
    type Error = TypeConstraintError;

    fn try_from(
        (line, product_name, product_image, user_email): OrderProductRow,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id: line.id.try_into()?,
            order_id: line.order_id.try_into()?,
            payment_id: line.payment_id.map(TryInto::try_into).transpose()?,
            user_id: line.user_id.try_into()?,
            user_email,
            product_id: line.product_id.try_into()?,
            product_name,
            product_image,
            quantity: Quantity::new(line.quantity)?,
            product_price: MoneyAmount::new(line.product_price)?,
            ordered: line.ordered,
            created_at: line.created_at,
            updated_at: line.updated_at,
        })
    }
}

impl TryFrom<(Payment, String)> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from((payment, user_email): (Payment, String)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: payment.id.try_into()?,
            user_id: payment.user_id.try_into()?,
            user_email,
            payment_id: GatewayPaymentId::new(payment.payment_id)?,
            payment_method: PaymentMethod::new(payment.payment_method)?,
            amount_paid: MoneyAmount::new(payment.amount_paid)?,
            status: PaymentStatus::try_from(payment.status)?,
            created_at: payment.created_at,
        })
    }
}
