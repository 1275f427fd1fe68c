use std::time::Duration;

/// 服务器配置 - 订单准入网关的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，存在时按天滚动写文件 |
/// | RATE_LIMIT_MAX_REQUESTS | 10 | 每个窗口每 IP 允许的请求数 |
/// | RATE_LIMIT_WINDOW_SECS | 60 | 限流窗口(秒) |
/// | RATE_LIMIT_CLEANUP_SECS | 300 | 限流记录清理间隔(秒) |
/// | CATALOG_FILE | (无) | 商品目录 JSON 文件，未设置时目录为空 |
/// | INITIAL_STOCK_FROM_CATALOG | true | 启动时按目录写入期初库存 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | TRUST_PROXY_HEADERS | true | 信任 X-Forwarded-For (仅当服务位于可信反向代理之后) |
///
/// # 示例
///
/// ```ignore
/// CATALOG_FILE=./catalog.json HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 限流: 每窗口最大请求数
    pub rate_limit_max_requests: u32,
    /// 限流: 窗口长度 (秒)
    pub rate_limit_window_secs: u64,
    /// 限流记录清理间隔 (秒)
    pub rate_limit_cleanup_secs: u64,
    /// 商品目录文件
    pub catalog_file: Option<String>,
    /// 是否写入期初库存
    pub initial_stock_from_catalog: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 客户端 IP 取自 X-Forwarded-For 首项
    ///
    /// 只有在代理覆盖该头时才可开启，否则客户端可每次换一个 IP 绕过限流和黑名单。
    /// 关闭时使用 TCP 对端地址。
    pub trust_proxy_headers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            rate_limit_cleanup_secs: 300,
            catalog_file: None,
            initial_stock_from_catalog: true,
            request_timeout_ms: 30000,
            trust_proxy_headers: true,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(defaults.http_port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: env_non_empty("LOG_DIR"),
            rate_limit_max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or(defaults.rate_limit_max_requests),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or(defaults.rate_limit_window_secs),
            rate_limit_cleanup_secs: env_parse("RATE_LIMIT_CLEANUP_SECS")
                .unwrap_or(defaults.rate_limit_cleanup_secs),
            catalog_file: env_non_empty("CATALOG_FILE"),
            initial_stock_from_catalog: env_parse("INITIAL_STOCK_FROM_CATALOG")
                .unwrap_or(defaults.initial_stock_from_catalog),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            trust_proxy_headers: env_parse("TRUST_PROXY_HEADERS")
                .unwrap_or(defaults.trust_proxy_headers),
        }
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn rate_limit_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cleanup_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.rate_limit_max_requests, 10);
        assert_eq!(config.rate_limit_window(), Duration::from_secs(60));
        assert_eq!(config.rate_limit_cleanup_interval(), Duration::from_secs(300));
        assert_eq!(config.request_timeout(), Duration::from_millis(30000));
        assert!(config.initial_stock_from_catalog);
        assert!(config.catalog_file.is_none());
        assert!(config.trust_proxy_headers);
        assert!(!config.is_production());
    }
}
