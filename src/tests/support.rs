//! 测试辅助：可记录的适配器替身与上下文构造

use crate::adapter::{HostAdapters, LogAdapter, RouterAdapter, ThreadAdapter};
use crate::module::ModuleRegistry;
use crate::runtime::{HostEventQueue, RenderContext};
use crate::storage::HostStorage;
use crate::view::ViewRegistry;
use crate::SizeI;
use std::sync::{Arc, Mutex};

/// 记录型日志，按级别存下所有消息
pub struct RecordingLog {
    pub infos: Mutex<Vec<String>>,
    pub warns: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            infos: Mutex::new(Vec::new()),
            warns: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        })
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

impl LogAdapter for RecordingLog {
    fn info(&self, _tag: &str, msg: &str) {
        self.infos.lock().unwrap().push(msg.to_string());
    }

    fn debug(&self, _tag: &str, _msg: &str) {}

    fn warn(&self, _tag: &str, msg: &str) {
        self.warns.lock().unwrap().push(msg.to_string());
    }

    fn error(&self, _tag: &str, msg: &str) {
        self.errors.lock().unwrap().push(msg.to_string());
    }
}

/// 当前线程直接执行任务的线程适配器
pub struct InlineThread;

impl ThreadAdapter for InlineThread {
    fn execute(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        task();
    }
}

/// 读写都失败的存储
pub struct FailingStorage;

impl HostStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, String> {
        Err("storage unavailable".to_string())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("storage unavailable".to_string())
    }
}

/// 记录打开/关闭页面调用的路由
pub struct RecordingRouter {
    pub opened: Mutex<Vec<(String, serde_json::Value)>>,
    pub closed: Mutex<usize>,
}

impl RecordingRouter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            opened: Mutex::new(Vec::new()),
            closed: Mutex::new(0),
        })
    }
}

impl RouterAdapter for RecordingRouter {
    fn open_page(&self, page_name: &str, page_data: &serde_json::Value) {
        self.opened
            .lock()
            .unwrap()
            .push((page_name.to_string(), page_data.clone()));
    }

    fn close_page(&self) {
        *self.closed.lock().unwrap() += 1;
    }
}

/// 空注册表的渲染上下文
pub fn make_context() -> RenderContext {
    RenderContext {
        adapters: Arc::new(HostAdapters::new()),
        modules: Arc::new(ModuleRegistry::new()),
        views: Arc::new(ViewRegistry::new()),
        events: Arc::new(HostEventQueue::new()),
        viewport: SizeI::new(375, 667),
    }
}
