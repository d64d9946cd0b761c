//! 缓存模块：键值读写委托给宿主存储
//! 读失败转为空结果，写失败记录后吞掉，都不向调用方抛错

use super::{method_not_found, ModuleCallback, RenderModule};
use crate::adapter::LogAdapter;
use crate::storage::HostStorage;
use serde::Deserialize;
use std::sync::Arc;

const TAG: &str = "CacheModule";

const GET_ITEM: &str = "getItem";
const SET_ITEM: &str = "setItem";

pub struct CacheModule {
    storage: Arc<dyn HostStorage>,
    log: Arc<dyn LogAdapter>,
}

#[derive(Deserialize)]
struct SetItemParams {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
}

impl CacheModule {
    pub const MODULE_NAME: &'static str = "HRCacheModule";

    pub fn new(storage: Arc<dyn HostStorage>, log: Arc<dyn LogAdapter>) -> Self {
        Self { storage, log }
    }

    /// 读取缓存，params 即裸 key
    fn get_item(&self, key: Option<&str>) -> String {
        let Some(key) = key else {
            return String::new();
        };
        match self.storage.get_item(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                self.log.error(TAG, &format!("storage get error: {}", e));
                String::new()
            }
        }
    }

    /// 写入缓存，params 为 {"key": ..., "value": ...}
    fn set_item(&self, params: Option<&str>) {
        let parsed = serde_json::from_str::<SetItemParams>(params.unwrap_or("{}"));
        let item = match parsed {
            Ok(item) => item,
            Err(e) => {
                self.log.error(TAG, &format!("setItem json parse error: {}", e));
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&item.key, &item.value) {
            self.log.error(TAG, &format!("storage set error: {}", e));
        }
    }
}

impl RenderModule for CacheModule {
    fn call(
        &mut self,
        method: &str,
        params: Option<&str>,
        callback: Option<&ModuleCallback>,
    ) -> Option<String> {
        match method {
            GET_ITEM => Some(self.get_item(params)),
            SET_ITEM => {
                self.set_item(params);
                None
            }
            _ => {
                method_not_found(method, callback);
                None
            }
        }
    }
}
