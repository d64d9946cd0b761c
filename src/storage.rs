//! 键值存储
//! key 与 value 对本层都是不透明字符串，持久化由宿主平台提供

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// 宿主键值存储能力
pub trait HostStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

/// 内存存储
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        let items = self.items.lock().map_err(|e| e.to_string())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|e| e.to_string())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 文件存储，打开时整体加载，写入时整体回写 JSON
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// 打开存储文件，文件不存在或损坏时从空表开始
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<HashMap<String, String>>(&s).ok())
            .unwrap_or_default();
        Self {
            path,
            items: Mutex::new(items),
        }
    }

    fn flush(&self, items: &HashMap<String, String>) -> Result<(), String> {
        let json = serde_json::to_string(items).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}

impl HostStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        let items = self.items.lock().map_err(|e| e.to_string())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|e| e.to_string())?;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }
}
