//! Order fixtures for unit tests

use rust_decimal::Decimal;
use shared::models::{
    Actor, CustomerInfo, Order, OrderItem, OrderLog, OrderLogAction, OrderStatus, PaymentMethod,
    PaymentStatus,
};
use shared::util::now_millis;

/// Order for product `p-1`, variant `v-1`, two units
pub fn sample_order(id: &str, order_number: &str) -> Order {
    Order {
        id: id.to_string(),
        order_number: order_number.to_string(),
        customer: CustomerInfo {
            name: "Ayşe Yılmaz".to_string(),
            phone: "0532 418 27 93".to_string(),
            address: "Atatürk Cd. No:5".to_string(),
            city: "İzmir".to_string(),
            district: "Konak".to_string(),
        },
        items: vec![OrderItem {
            product_id: "p-1".to_string(),
            variant_id: Some("v-1".to_string()),
            quantity: 2,
            unit_price: Decimal::new(24950, 2),
            total_price: Decimal::new(49900, 2),
            variant_selection: None,
        }],
        status: OrderStatus::New,
        total_amount: Decimal::new(49900, 2),
        payment_method: PaymentMethod::CashOnDelivery,
        payment_status: PaymentStatus::Unpaid,
        ip_address: "10.0.0.1".to_string(),
        user_agent: None,
        referrer: None,
        created_at: now_millis(),
        dealer_id: None,
        tracking_code: None,
        transaction_id: None,
    }
}

pub fn sample_log(order_id: &str, action: OrderLogAction) -> OrderLog {
    super::new_log(order_id, &Actor::system(), action, "test entry")
}
