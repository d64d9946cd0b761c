//! 页面参数
//! attach 时组装一次，构造后不可变；业务参数来自导航负载或 URL 查询串

use crate::SizeI;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 页面参数表
#[derive(Debug, Clone, Default)]
pub struct PageParams(Map<String, Value>);

impl PageParams {
    pub fn empty() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// 从 JSON 字符串解析，失败时得到空表
    pub fn from_json_str(s: &str) -> Self {
        match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::empty(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 查 param 子表里的业务参数
    pub fn business_param(&self, key: &str) -> Option<&str> {
        self.0.get("param")?.as_object()?.get(key)?.as_str()
    }
}

/// 解析 URL 查询参数，'?' 之后的部分按 & / = 切分并做百分号解码
pub fn parse_query_params(url: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some((_, query)) = url.split_once('?') else {
        return params;
    };
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(percent_decode(key), percent_decode(value));
    }
    params
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let high = (bytes[i + 1] as char).to_digit(16);
                let low = (bytes[i + 2] as char).to_digit(16);
                match (high, low) {
                    (Some(high), Some(low)) => {
                        out.push((high * 16 + low) as u8);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// 组装标准页面参数表
/// 固定键：appId、statusBarHeight、activityWidth、activityHeight、param
pub fn assemble_page_params(
    app_id: i64,
    status_bar_height: f32,
    size: SizeI,
    business: HashMap<String, String>,
    web_origin: bool,
) -> PageParams {
    let mut param = Map::new();
    for (key, value) in business {
        param.insert(key, Value::String(value));
    }
    if web_origin {
        param.insert("is_web".to_string(), Value::String("1".to_string()));
    }
    let mut map = Map::new();
    map.insert("appId".to_string(), Value::from(app_id));
    map.insert("statusBarHeight".to_string(), Value::from(status_bar_height));
    map.insert("activityWidth".to_string(), Value::from(size.width));
    map.insert("activityHeight".to_string(), Value::from(size.height));
    map.insert("param".to_string(), Value::Object(param));
    PageParams::from_map(map)
}
