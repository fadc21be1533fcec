use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AccountId, GatewayPaymentId, MoneyAmount, OrderId, OrderNumber, OrderProductId, OrderStatus,
    PaymentId, PaymentMethod, PaymentStatus, ProductId, Quantity,
};

/// A placed or in-progress customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<AccountId>,
    pub payment_id: Option<PaymentId>,
    pub order_number: OrderNumber,
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
    pub order_total: MoneyAmount,
    pub tax: MoneyAmount,
    pub status: OrderStatus,
    pub ip: String,
    pub is_ordered: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One product line of an [`Order`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: OrderProductId,
    pub order_id: OrderId,
    pub payment_id: Option<PaymentId>,
    pub user_id: AccountId,
    pub user_email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: Quantity,
    pub product_price: MoneyAmount,
    pub ordered: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Settlement record received from the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: AccountId,
    pub user_email: String,
    pub payment_id: GatewayPaymentId,
    pub payment_method: PaymentMethod,
    pub amount_paid: MoneyAmount,
    pub status: PaymentStatus,
    pub created_at: NaiveDateTime,
}
