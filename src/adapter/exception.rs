//! 未捕获异常处理
//! debug 构建立即重新抛出便于开发期暴露，release 构建记录后继续运行

use super::{LogAdapter, UncaughtExceptionAdapter};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

const TAG: &str = "ExceptionHandler";

pub struct DefaultExceptionAdapter {
    log: Arc<dyn LogAdapter>,
}

impl DefaultExceptionAdapter {
    pub fn new(log: Arc<dyn LogAdapter>) -> Self {
        Self { log }
    }
}

impl UncaughtExceptionAdapter for DefaultExceptionAdapter {
    fn uncaught_exception(&self, payload: Box<dyn Any + Send>) {
        if cfg!(debug_assertions) {
            std::panic::resume_unwind(payload);
        }
        self.log
            .error(TAG, &format!("uncaught: {}", describe_panic(payload.as_ref())));
    }
}

/// 提取 panic 负载中的可读信息
pub fn describe_panic(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// 捕获任务中的 panic 并交给异常适配器处理
pub fn run_guarded(adapter: &dyn UncaughtExceptionAdapter, task: impl FnOnce()) {
    if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(task)) {
        adapter.uncaught_exception(payload);
    }
}
