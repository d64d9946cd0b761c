//! 字体适配器
//! 字体族名到字体句柄的同步查找，未知族名返回 None，从不向外抛错

use super::FontAdapter;
use fontdue::{Font, FontSettings};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub struct HostFontAdapter {
    assets_dir: Option<PathBuf>,
    registered: Mutex<HashMap<String, Vec<u8>>>,
    /// 解析缓存，None 表示已确认查不到
    cache: Mutex<HashMap<String, Option<Arc<Font>>>>,
}

impl HostFontAdapter {
    pub fn new() -> Self {
        Self {
            assets_dir: None,
            registered: Mutex::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// 指定资源目录，查找时回退到 <assets>/fonts/<family>.ttf
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// 注册一份字体数据，渲染开始前调用
    pub fn register_font(&self, font_family: &str, bytes: Vec<u8>) {
        if let Ok(mut registered) = self.registered.lock() {
            registered.insert(font_family.to_string(), bytes);
        }
    }

    fn load(&self, font_family: &str) -> Option<Arc<Font>> {
        let bytes = {
            let registered = self.registered.lock().ok()?;
            registered.get(font_family).cloned()
        };
        let bytes = match bytes {
            Some(bytes) => bytes,
            None => {
                let dir = self.assets_dir.as_ref()?;
                let path = dir.join("fonts").join(format!("{}.ttf", font_family));
                std::fs::read(path).ok()?
            }
        };
        Font::from_bytes(bytes, FontSettings::default())
            .ok()
            .map(Arc::new)
    }
}

impl Default for HostFontAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FontAdapter for HostFontAdapter {
    fn typeface(&self, font_family: &str) -> Option<Arc<Font>> {
        if font_family.is_empty() {
            return None;
        }
        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.get(font_family) {
                return cached.clone();
            }
        }
        let font = self.load(font_family);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(font_family.to_string(), font.clone());
        }
        font
    }
}
