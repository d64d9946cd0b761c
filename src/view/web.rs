//! Web 视图包装
//! 嵌入的 web 容器自动铺满全屏，收到几何属性时提示一次并忽略

use super::{NativeElement, PropValue, RenderViewExport};
use crate::adapter::LogAdapter;
use crate::runtime::{HostEvent, HostEventQueue};
use std::sync::Arc;

const TAG: &str = "WebView";

const FRAME_WARNING: &str = "web-view will fill the full screen, width/height/position are ignored";
const FRAME_WARNING_DURATION_MS: u64 = 3000;

pub struct WebView {
    element: NativeElement,
    events: Arc<HostEventQueue>,
    log: Arc<dyn LogAdapter>,
    frame_warned: bool,
}

impl WebView {
    pub const VIEW_NAME: &'static str = "WebView";
    const PROP_SRC: &'static str = "src";
    const PROP_FRAME: &'static str = "frame";

    pub fn new(events: Arc<HostEventQueue>, log: Arc<dyn LogAdapter>) -> Self {
        Self {
            element: NativeElement::new("web-view"),
            events,
            log,
            frame_warned: false,
        }
    }
}

impl RenderViewExport for WebView {
    fn element(&self) -> &NativeElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut NativeElement {
        &mut self.element
    }

    fn set_prop(&mut self, prop_key: &str, prop_value: PropValue) -> bool {
        match prop_key {
            Self::PROP_SRC => match prop_value.as_str() {
                Some(src) => {
                    self.element.set_attribute("src", src);
                    true
                }
                None => false,
            },
            Self::PROP_FRAME => {
                if !self.frame_warned {
                    self.frame_warned = true;
                    self.events.push(HostEvent::ShowToast {
                        message: FRAME_WARNING.to_string(),
                        duration_ms: FRAME_WARNING_DURATION_MS,
                    });
                }
                self.log.warn(TAG, FRAME_WARNING);
                true
            }
            _ => false,
        }
    }
}
