//! Intake Server - 落地页订单准入网关
//!
//! # 架构概述
//!
//! 公开结账请求在创建订单前依次经过：
//!
//! - **限流** (`security::rate_limit`): 按 IP 的固定窗口计数
//! - **黑名单** (`security::blacklist`): 运营手动或系统自动封禁的 IP
//! - **欺诈评分** (`security::fraud`): 姓名/电话/IP 速率启发式
//! - **订单创建** (`orders::intake`): 订单、日志、库存出库原子写入
//!
//! 后台操作 (状态流转、外呼结果、发货、备注、支付) 由 `orders::lifecycle`
//! 和 `payment` 提供，均通过 `api` 暴露。
//!
//! # 模块结构
//!
//! ```text
//! intake-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── security/      # 限流、黑名单、欺诈评分、安全事件
//! ├── orders/        # 订单准入、存储、状态机
//! ├── stock/         # 库存流水账
//! ├── catalog/       # 商品目录 (只读)
//! ├── payment/       # 在线支付
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod payment;
pub mod security;
pub mod stock;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use orders::{OrderIntake, OrderLifecycle};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符 (`%x`, `?x`)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($fields:tt)*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($fields)*
        );
    };
}

/// 设置运行环境: 加载 .env、读取配置、初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    ____      __        __
   /  _/___  / /_____ _/ /_____
   / // __ \/ __/ __ `/ //_/ _ \
 _/ // / / / /_/ /_/ / ,< /  __/
/___/_/ /_/\__/\__,_/_/|_|\___/
    "#
    );
}
