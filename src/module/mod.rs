//! 模块桥接层
//! 引擎脚本侧按「模块名 + 方法名 + 序列化参数」调用宿主能力

pub mod bridge;
pub mod cache;

pub use bridge::{format_date, BridgeModule};
pub use cache::CacheModule;

use serde_json::{json, Value};
use std::collections::HashMap;

/// 方法/模块未找到的错误码
pub const CODE_NOT_FOUND: i64 = -1;

/// 模块回调，错误应答至少携带 code 与 message
pub type ModuleCallback = Box<dyn Fn(Value) + Send + Sync>;

/// 渲染模块：方法表在实现内固定，不支持运行期注册
pub trait RenderModule: Send {
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
}

/// 未识别方法的统一应答
pub fn method_not_found(method: &str, callback: Option<&ModuleCallback>) {
    let _ = method;
    if let Some(callback) = callback {
        callback(json!({
            "code": CODE_NOT_FOUND,
            "message": "Method does not exist",
        }));
    }
}

/// 未注册模块的统一应答
pub fn module_not_found(module: &str, callback: Option<&ModuleCallback>) {
    let _ = module;
    if let Some(callback) = callback {
        callback(json!({
            "code": CODE_NOT_FOUND,
            "message": "Module does not exist",
        }));
    }
}

/// 模块工厂
pub type ModuleFactory = Box<dyn Fn() -> Box<dyn RenderModule> + Send + Sync>;

/// 模块注册表：attach 期写入，渲染期只读
pub struct ModuleRegistry {
    factories: HashMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// 注册模块工厂，重名时后注册的生效
    pub fn module_export<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn RenderModule> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Option<Box<dyn RenderModule>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
