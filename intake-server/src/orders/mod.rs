//! 订单模块 - 订单准入、存储、状态流转
//!
//! # 模块结构
//!
//! ```text
//! orders/
//! ├── intake.rs      # 准入编排: 限流 → 黑名单 → 欺诈评分 → 创建
//! ├── repository.rs  # 订单与订单日志存储
//! ├── lifecycle.rs   # 状态机、外呼结果、发货、备注
//! ├── number.rs      # 订单号生成
//! └── error.rs       # 错误类型
//! ```

pub mod error;
pub mod intake;
pub mod lifecycle;
pub mod number;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{OrderError, OrderResult};
pub use intake::{IntakeError, IntakeResult, OrderIntake};
pub use lifecycle::OrderLifecycle;
pub use number::OrderNumberGenerator;
pub use repository::{InMemoryOrderRepository, OrderCommit, OrderMutation, OrderRepository};

use shared::models::{Actor, OrderLog, OrderLogAction};
use shared::util::{new_id, now_millis};

/// Build an order log entry stamped now
pub fn new_log(
    order_id: &str,
    actor: &Actor,
    action: OrderLogAction,
    message: impl Into<String>,
) -> OrderLog {
    OrderLog {
        id: new_id(),
        order_id: order_id.to_string(),
        user_id: actor.id.clone(),
        user_name: actor.name.clone(),
        action,
        message: message.into(),
        created_at: now_millis(),
    }
}
