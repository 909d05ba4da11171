use std::sync::Arc;
use std::time::Duration;

use crate::PersonDB;
use crate::config::ServerOptions;

/// 应用状态
pub struct AppState {
    /// 人员记录存储
    pub db: PersonDB,
    /// 请求体大小上限
    pub body_limit: usize,
    /// 单张图片向量化的超时时间
    pub decode_timeout: Duration,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(db: PersonDB, opts: &ServerOptions) -> Arc<Self> {
        Arc::new(AppState {
            db,
            body_limit: opts.body_limit,
            decode_timeout: opts.decode_timeout(),
        })
    }
}
