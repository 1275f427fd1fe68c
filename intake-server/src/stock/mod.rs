//! 库存模块 - 只追加的库存流水账

pub mod ledger;

pub use ledger::{NewMovement, PreparedMovement, StockError, StockLedger, StockResult};
