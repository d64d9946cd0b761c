//! 嵌套页面视图
//! 在自定义视图里再托管一个渲染视图实例；挂载完成前收到的事件
//! 经就绪门缓存，挂载后按到达顺序一次性下发

use super::{NativeElement, PropCallback, PropValue, ReadyGate, RenderViewExport};
use crate::module::{method_not_found, ModuleCallback};
use crate::runtime::{PageParams, RenderContext, RenderView};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const TAG: &str = "EmbeddedPageView";

pub struct EmbeddedPageView {
    element: NativeElement,
    context: RenderContext,
    page_name: String,
    page_data: String,
    load_success: Option<PropCallback>,
    load_failure: Option<PropCallback>,
    gate: Arc<ReadyGate>,
    nested: Arc<Mutex<Option<RenderView>>>,
}

#[derive(Deserialize)]
struct SendEventParams {
    #[serde(default)]
    event: String,
    #[serde(default)]
    data: Value,
}

impl EmbeddedPageView {
    pub const VIEW_NAME: &'static str = "EmbeddedPageView";

    pub fn new(context: RenderContext) -> Self {
        Self {
            element: NativeElement::new("div"),
            context,
            page_name: String::new(),
            page_data: "{}".to_string(),
            load_success: None,
            load_failure: None,
            gate: Arc::new(ReadyGate::new()),
            nested: Arc::new(Mutex::new(None)),
        }
    }

    /// 嵌套视图已挂载则直接执行，否则入队等挂载后冲刷
    fn perform_when_nested_did_load(&self, action: impl FnOnce(&mut RenderView) + Send + 'static) {
        let nested = self.nested.clone();
        self.gate.dispatch(move || {
            if let Ok(mut guard) = nested.lock() {
                if let Some(view) = guard.as_mut() {
                    action(view);
                }
            }
        });
    }

    fn send_event_with_params(&mut self, params: Option<&str>) {
        let parsed = serde_json::from_str::<SendEventParams>(params.unwrap_or("{}"));
        let event = match parsed {
            Ok(event) => event,
            Err(e) => {
                self.context
                    .adapters
                    .log()
                    .error(TAG, &format!("sendEvent json parse error: {}", e));
                return;
            }
        };
        self.perform_when_nested_did_load(move |view| {
            view.send_event(&event.event, event.data);
        });
    }

    fn init_nested_if_needed(&mut self) {
        {
            let Ok(guard) = self.nested.lock() else {
                return;
            };
            if guard.is_some() {
                return;
            }
        }
        if self.page_name.is_empty() {
            return;
        }
        let params = PageParams::from_json_str(&self.page_data);
        let mut view = RenderView::new(self.context.clone());
        match view.on_attach(&self.page_name, params, self.context.viewport) {
            Ok(()) => {
                if let Ok(mut guard) = self.nested.lock() {
                    *guard = Some(view);
                }
                if let Some(callback) = &self.load_success {
                    callback(json!({}));
                }
                // 挂载完成，冲刷缓存的事件
                self.gate.open();
            }
            Err(e) => {
                if let Some(callback) = &self.load_failure {
                    callback(json!({ "code": -1, "message": e }));
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn nested_handle(&self) -> Arc<Mutex<Option<RenderView>>> {
        self.nested.clone()
    }
}

impl RenderViewExport for EmbeddedPageView {
    fn element(&self) -> &NativeElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut NativeElement {
        &mut self.element
    }

    fn set_prop(&mut self, prop_key: &str, prop_value: PropValue) -> bool {
        match prop_key {
            "pageName" => match prop_value.as_str() {
                Some(name) => {
                    self.page_name = name.to_string();
                    true
                }
                None => false,
            },
            "pageData" => match prop_value.as_str() {
                Some(data) => {
                    self.page_data = data.to_string();
                    true
                }
                None => false,
            },
            "loadSuccess" => match prop_value.as_callback() {
                Some(callback) => {
                    self.load_success = Some(callback);
                    true
                }
                None => false,
            },
            "loadFailure" => match prop_value.as_callback() {
                Some(callback) => {
                    self.load_failure = Some(callback);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn call(
        &mut self,
        method: &str,
        params: Option<&str>,
        callback: Option<&ModuleCallback>,
    ) -> Option<String> {
        match method {
            "sendEvent" => {
                self.send_event_with_params(params);
                None
            }
            _ => {
                method_not_found(method, callback);
                None
            }
        }
    }

    fn on_add_to_parent(&mut self) {
        // 页面挂载完成，开始装载嵌套视图
        self.init_nested_if_needed();
    }
}
