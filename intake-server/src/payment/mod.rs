//! 支付模块 - 信用卡订单的在线扣款

pub mod provider;
pub mod service;

pub use provider::{ChargeResult, MockPaymentProvider, PaymentError, PaymentProvider};
pub use service::PaymentService;
