use thiserror::Error;

use crate::catalog::CatalogError;
use crate::stock::StockError;

/// 启动与运行期的服务器错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("商品目录加载失败: {0}")]
    Catalog(#[from] CatalogError),

    #[error("期初库存写入失败: {0}")]
    Stock(#[from] StockError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
