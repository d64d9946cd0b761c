//! 渲染视图：宿主侧持有的引擎实例
//! 持有页面标识、不可变页面参数、模块实例与生命周期状态

use super::PageParams;
use crate::adapter::HostAdapters;
use crate::module::{module_not_found, ModuleCallback, ModuleRegistry, RenderModule};
use crate::view::{NativeElement, RenderViewExport, ViewRegistry};
use crate::SizeI;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 宿主事件：由模块与视图上抛，宿主外壳消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// 短时通知，duration_ms 后自动消失
    ShowToast { message: String, duration_ms: u64 },
}

/// 宿主事件队列
pub struct HostEventQueue {
    events: Mutex<Vec<HostEvent>>,
}

impl HostEventQueue {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, event: HostEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// 取走并清空当前积压的事件
    pub fn drain(&self) -> Vec<HostEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for HostEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// 渲染上下文：attach 期组装一次，只读注入到所有需要的组件
#[derive(Clone)]
pub struct RenderContext {
    pub adapters: Arc<HostAdapters>,
    pub modules: Arc<ModuleRegistry>,
    pub views: Arc<ViewRegistry>,
    pub events: Arc<HostEventQueue>,
    pub viewport: SizeI,
}

/// 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Detached,
    Attached,
    Paused,
}

pub struct RenderView {
    context: RenderContext,
    page_name: String,
    params: PageParams,
    size: SizeI,
    lifecycle: Lifecycle,
    module_instances: HashMap<String, Box<dyn RenderModule>>,
    root: NativeElement,
    received_events: Vec<(String, Value)>,
}

impl RenderView {
    pub fn new(context: RenderContext) -> Self {
        Self {
            context,
            page_name: String::new(),
            params: PageParams::empty(),
            size: SizeI::default(),
            lifecycle: Lifecycle::Detached,
            module_instances: HashMap::new(),
            root: NativeElement::new("root"),
            received_events: Vec::new(),
        }
    }

    /// 挂载页面，参数表自此不可变
    pub fn on_attach(
        &mut self,
        page_name: &str,
        params: PageParams,
        size: SizeI,
    ) -> Result<(), String> {
        if self.lifecycle != Lifecycle::Detached {
            return Err("render view already attached".to_string());
        }
        if page_name.is_empty() {
            return Err("page name is empty".to_string());
        }
        self.page_name = page_name.to_string();
        self.params = params;
        self.size = size;
        self.lifecycle = Lifecycle::Attached;
        Ok(())
    }

    pub fn on_resume(&mut self) {
        if self.lifecycle == Lifecycle::Paused {
            self.lifecycle = Lifecycle::Attached;
        }
    }

    pub fn on_pause(&mut self) {
        if self.lifecycle == Lifecycle::Attached {
            self.lifecycle = Lifecycle::Paused;
        }
    }

    /// 卸载，重复调用安全
    pub fn on_detach(&mut self) {
        self.lifecycle = Lifecycle::Detached;
        self.module_instances.clear();
        self.received_events.clear();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn params(&self) -> &PageParams {
        &self.params
    }

    pub fn size(&self) -> SizeI {
        self.size
    }

    pub fn root_element(&self) -> &NativeElement {
        &self.root
    }

    pub fn root_element_mut(&mut self) -> &mut NativeElement {
        &mut self.root
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// 调用指定模块的方法，模块实例首次调用时创建
    pub fn call_module(
        &mut self,
        module: &str,
        method: &str,
        params: Option<&str>,
        callback: Option<&ModuleCallback>,
    ) -> Option<String> {
        if !self.module_instances.contains_key(module) {
            match self.context.modules.create(module) {
                Some(instance) => {
                    self.module_instances.insert(module.to_string(), instance);
                }
                None => {
                    module_not_found(module, callback);
                    return None;
                }
            }
        }
        self.module_instances
            .get_mut(module)
            .and_then(|instance| instance.call(method, params, callback))
    }

    /// 创建自定义视图实例
    pub fn create_view(&self, name: &str) -> Option<Box<dyn RenderViewExport>> {
        self.context.views.create(name, &self.context)
    }

    /// 创建视图并触发挂载回调，模拟引擎把它装进页面树
    pub fn mount_view(&mut self, name: &str) -> Option<Box<dyn RenderViewExport>> {
        let mut view = self.create_view(name)?;
        view.on_add_to_parent();
        Some(view)
    }

    /// 引擎事件下发到页面逻辑
    pub fn send_event(&mut self, event: &str, data: Value) {
        self.received_events.push((event.to_string(), data));
    }

    /// 页面逻辑已收到的事件，按到达顺序
    pub fn received_events(&self) -> &[(String, Value)] {
        &self.received_events
    }

    /// 取走积压的宿主事件（toast 等）
    pub fn drain_host_events(&self) -> Vec<HostEvent> {
        self.context.events.drain()
    }
}
