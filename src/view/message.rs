//! 自定义文本视图：message 属性直写元素文本

use super::{NativeElement, PropValue, RenderViewExport};

pub struct MessageView {
    element: NativeElement,
}

impl MessageView {
    pub const VIEW_NAME: &'static str = "MessageView";
    const PROP_MESSAGE: &'static str = "message";

    pub fn new() -> Self {
        Self {
            element: NativeElement::new("div"),
        }
    }
}

impl Default for MessageView {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderViewExport for MessageView {
    fn element(&self) -> &NativeElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut NativeElement {
        &mut self.element
    }

    fn set_prop(&mut self, prop_key: &str, prop_value: PropValue) -> bool {
        match prop_key {
            Self::PROP_MESSAGE => match prop_value.as_str() {
                Some(message) => {
                    self.element.set_text(message);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}
