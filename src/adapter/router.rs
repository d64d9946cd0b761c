//! 路由适配器

use super::{LogAdapter, RouterAdapter};
use std::sync::Arc;

const TAG: &str = "Router";

/// 默认路由：没有页面栈可操作时仅记录日志
pub struct LogRouterAdapter {
    log: Arc<dyn LogAdapter>,
}

impl LogRouterAdapter {
    pub fn new(log: Arc<dyn LogAdapter>) -> Self {
        Self { log }
    }
}

impl RouterAdapter for LogRouterAdapter {
    fn open_page(&self, page_name: &str, page_data: &serde_json::Value) {
        self.log
            .info(TAG, &format!("open page: {} {}", page_name, page_data));
    }

    fn close_page(&self) {
        self.log.info(TAG, "close page");
    }
}
