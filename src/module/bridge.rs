//! 业务桥接模块：toast、日志透传、时间戳、日期格式化

use super::{method_not_found, ModuleCallback, RenderModule};
use crate::adapter::LogAdapter;
use crate::runtime::{HostEvent, HostEventQueue};
use chrono::{Datelike, Timelike};
use serde::Deserialize;
use std::sync::Arc;

const TAG: &str = "BridgeModule";

/// toast 无指定时长时的自动消失时间
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// 日期 token 替换表，严格按此顺序依次替换
/// 顺序是对外契约：新增 token 的文本若是已有 token 的子串会破坏替换结果
pub(crate) const DATE_TOKENS: [&str; 6] = ["yyyy", "MM", "dd", "HH", "mm", "ss"];

pub struct BridgeModule {
    events: Arc<HostEventQueue>,
    log: Arc<dyn LogAdapter>,
}

#[derive(Deserialize)]
struct ToastParams {
    #[serde(default)]
    message: String,
    #[serde(default)]
    duration: Option<u64>,
}

#[derive(Deserialize)]
struct DateFormatterParams {
    #[serde(rename = "timeStamp", default)]
    time_stamp: i64,
    #[serde(default)]
    format: String,
}

impl BridgeModule {
    pub const MODULE_NAME: &'static str = "HRBridgeModule";

    pub fn new(events: Arc<HostEventQueue>, log: Arc<dyn LogAdapter>) -> Self {
        Self { events, log }
    }

    /// 页面上弹出短时通知，到时自动消失
    fn toast(&self, params: Option<&str>) {
        let Some(params) = params else {
            return;
        };
        match serde_json::from_str::<ToastParams>(params) {
            Ok(toast) => {
                if !toast.message.is_empty() {
                    self.events.push(HostEvent::ShowToast {
                        message: toast.message,
                        duration_ms: toast.duration.unwrap_or(DEFAULT_TOAST_DURATION_MS),
                    });
                }
            }
            Err(e) => {
                self.log.error(TAG, &format!("toast json parse error: {}", e));
            }
        }
    }

    fn current_timestamp(&self) -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }

    fn date_formatter(&self, params: Option<&str>) -> String {
        let parsed = serde_json::from_str::<DateFormatterParams>(params.unwrap_or("{}"));
        let params = match parsed {
            Ok(params) => params,
            Err(e) => {
                self.log
                    .error(TAG, &format!("dateFormatter json parse error: {}", e));
                return String::new();
            }
        };
        let date = chrono::DateTime::from_timestamp_millis(params.time_stamp);
        match date {
            Some(date) => format_date(&date.naive_utc(), &params.format),
            None => String::new(),
        }
    }
}

impl RenderModule for BridgeModule {
    fn call(
        &mut self,
        method: &str,
        params: Option<&str>,
        callback: Option<&ModuleCallback>,
    ) -> Option<String> {
        match method {
            "toast" => {
                self.toast(params);
                None
            }
            "log" => {
                self.log.info(TAG, params.unwrap_or(""));
                None
            }
            "currentTimestamp" => Some(self.current_timestamp()),
            "dateFormatter" => Some(self.date_formatter(params)),
            _ => {
                method_not_found(method, callback);
                None
            }
        }
    }
}

/// 按 DATE_TOKENS 顺序做文本替换，数值统一按固定宽度补零
pub fn format_date(date: &chrono::NaiveDateTime, format: &str) -> String {
    let values = [
        format!("{:04}", date.year()),
        format!("{:02}", date.month()),
        format!("{:02}", date.day()),
        format!("{:02}", date.hour()),
        format!("{:02}", date.minute()),
        format!("{:02}", date.second()),
    ];
    let mut result = format.to_string();
    for (token, value) in DATE_TOKENS.iter().zip(values.iter()) {
        result = result.replace(token, value);
    }
    result
}
