//! 自定义视图导出
//! 引擎在组装页面遇到未知视图类型时，通过注册表按名创建宿主视图实例

pub mod element;
pub mod message;
pub mod page;
pub mod ready_gate;
pub mod web;

pub use element::NativeElement;
pub use message::MessageView;
pub use page::EmbeddedPageView;
pub use ready_gate::ReadyGate;
pub use web::WebView;

use crate::module::{method_not_found, ModuleCallback};
use crate::runtime::RenderContext;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// 属性回调
pub type PropCallback = Arc<dyn Fn(Value) + Send + Sync>;

/// 属性值：封闭变体，取代字符串散装传值
#[derive(Clone)]
pub enum PropValue {
    String(String),
    Number(f64),
    Bool(bool),
    Callback(PropCallback),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<PropCallback> {
        match self {
            PropValue::Callback(cb) => Some(cb.clone()),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

/// 视图导出契约
pub trait RenderViewExport: Send {
    /// 供引擎挂到页面树上的底层原生元素
    fn element(&self) -> &NativeElement;

    fn element_mut(&mut self) -> &mut NativeElement;

    /// 设置属性，返回是否识别；未识别落到基础空实现
    fn set_prop(&mut self, prop_key: &str, prop_value: PropValue) -> bool {
        let _ = (prop_key, prop_value);
        false
    }

    /// 方法调用，与模块桥接同一未识别应答约定
    fn call(
        &mut self,
        method: &str,
        params: Option<&str>,
        callback: Option<&ModuleCallback>,
    ) -> Option<String> {
        let _ = params;
        method_not_found(method, callback);
        None
    }

    /// 被挂到父元素之后回调
    fn on_add_to_parent(&mut self) {}
}

/// 视图工厂，创建时拿到渲染上下文
pub type ViewFactory = Box<dyn Fn(&RenderContext) -> Box<dyn RenderViewExport> + Send + Sync>;

/// 视图注册表：按稳定的视图类型名创建实例
pub struct ViewRegistry {
    factories: HashMap<String, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn render_view_export<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&RenderContext) -> Box<dyn RenderViewExport> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn create(&self, name: &str, context: &RenderContext) -> Option<Box<dyn RenderViewExport>> {
        self.factories.get(name).map(|factory| factory(context))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
