use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::core::{Config, Result};
use crate::orders::{InMemoryOrderRepository, OrderIntake, OrderLifecycle, OrderNumberGenerator};
use crate::payment::{MockPaymentProvider, PaymentProvider, PaymentService};
use crate::security::{
    BlacklistStore, FixedWindowRateLimiter, InMemoryBlacklist, RateLimiter, SecurityEventLog,
};
use crate::stock::StockLedger;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | intake | OrderIntake | 订单准入编排 |
/// | lifecycle | OrderLifecycle | 订单状态流转 |
/// | payments | PaymentService | 在线支付 |
/// | rate_limiter | Arc<dyn RateLimiter> | 限流器 |
/// | blacklist | Arc<dyn BlacklistStore> | IP 黑名单 |
/// | events | Arc<SecurityEventLog> | 安全事件日志 |
/// | ledger | Arc<StockLedger> | 库存流水账 |
/// | catalog | Arc<CatalogService> | 商品目录 (只读) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub intake: OrderIntake,
    pub lifecycle: OrderLifecycle,
    pub payments: PaymentService,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub blacklist: Arc<dyn BlacklistStore>,
    pub events: Arc<SecurityEventLog>,
    pub ledger: Arc<StockLedger>,
    pub catalog: Arc<CatalogService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 加载商品目录 (CATALOG_FILE)
    /// 2. 写入期初库存 (INITIAL_STOCK_FROM_CATALOG)
    /// 3. 组装各服务
    pub fn initialize(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_file {
            Some(path) => CatalogService::load(path)?,
            None => {
                tracing::warn!("CATALOG_FILE not set, starting with an empty catalog");
                CatalogService::empty()
            }
        };
        Self::with_catalog(config.clone(), catalog, Arc::new(MockPaymentProvider))
    }

    /// 使用指定目录和支付渠道组装状态 (测试常用)
    pub fn with_catalog(
        config: Config,
        catalog: CatalogService,
        provider: Arc<dyn PaymentProvider>,
    ) -> Result<Self> {
        let ledger = Arc::new(StockLedger::new());
        if config.initial_stock_from_catalog {
            let seeded = catalog.seed_stock(&ledger)?;
            tracing::info!(variants = seeded, "Opening stock seeded");
        }

        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowRateLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window(),
        ));
        let blacklist: Arc<dyn BlacklistStore> = Arc::new(InMemoryBlacklist::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let events = Arc::new(SecurityEventLog::new());
        let catalog = Arc::new(catalog);

        let payments = PaymentService::new(provider, orders.clone(), ledger.clone());
        let lifecycle = OrderLifecycle::new(orders.clone(), ledger.clone());
        let intake = OrderIntake::new(
            rate_limiter.clone(),
            blacklist.clone(),
            orders,
            events.clone(),
            ledger.clone(),
            catalog.clone(),
            Arc::new(OrderNumberGenerator::new()),
            payments.clone(),
        );

        Ok(Self {
            config,
            intake,
            lifecycle,
            payments,
            rate_limiter,
            blacklist,
            events,
            ledger,
            catalog,
        })
    }

    /// 启动后台任务 (限流记录定期清理)
    pub fn start_background_tasks(&self) -> tokio::task::JoinHandle<()> {
        let rate_limiter = self.rate_limiter.clone();
        let period = self.config.rate_limit_cleanup_interval();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // 第一次 tick 立即返回
            interval.tick().await;
            loop {
                interval.tick().await;
                rate_limiter.cleanup();
            }
        })
    }
}
