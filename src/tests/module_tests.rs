//! 模块桥接测试

use super::support::{FailingStorage, RecordingLog};
use crate::module::bridge::DATE_TOKENS;
use crate::module::{
    format_date, BridgeModule, CacheModule, ModuleCallback, ModuleRegistry, RenderModule,
    CODE_NOT_FOUND,
};
use crate::runtime::{HostEvent, HostEventQueue};
use crate::storage::{FileStorage, HostStorage, MemoryStorage};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn capture_callback() -> (ModuleCallback, Arc<Mutex<Vec<Value>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let callback: ModuleCallback = Box::new(move |value| {
        sink.lock().unwrap().push(value);
    });
    (callback, captured)
}

fn make_bridge() -> (BridgeModule, Arc<HostEventQueue>, Arc<RecordingLog>) {
    let events = Arc::new(HostEventQueue::new());
    let log = RecordingLog::new();
    let module = BridgeModule::new(events.clone(), log.clone());
    (module, events, log)
}

/// 测试未识别方法回调负数错误码与非空消息
#[test]
fn test_unknown_method_error_shape() {
    let (mut module, _events, _log) = make_bridge();
    let (callback, captured) = capture_callback();
    let result = module.call("noSuchMethod", None, Some(&callback));
    assert!(result.is_none());

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    let code = captured[0]["code"].as_i64().unwrap();
    assert!(code < 0);
    assert_eq!(code, CODE_NOT_FOUND);
    assert!(!captured[0]["message"].as_str().unwrap().is_empty());
}

/// 测试 toast 入队并携带自动消失时长
#[test]
fn test_toast_enqueues_host_event() {
    let (mut module, events, log) = make_bridge();
    let params = json!({ "message": "hello", "duration": 1500 }).to_string();
    module.call("toast", Some(&params), None);
    assert_eq!(
        events.drain(),
        vec![HostEvent::ShowToast {
            message: "hello".to_string(),
            duration_ms: 1500,
        }]
    );
    assert_eq!(log.error_count(), 0);

    // 未给时长时使用固定默认值
    let params = json!({ "message": "hi" }).to_string();
    module.call("toast", Some(&params), None);
    match events.drain().as_slice() {
        [HostEvent::ShowToast { duration_ms, .. }] => assert_eq!(*duration_ms, 3000),
        other => panic!("unexpected events: {:?}", other),
    }
}

/// 测试坏参数串只产生一条日志，不向外抛错
#[test]
fn test_toast_malformed_params() {
    let (mut module, events, log) = make_bridge();
    module.call("toast", Some("not a json"), None);
    assert!(events.drain().is_empty());
    assert_eq!(log.error_count(), 1);

    // 缺参数时直接忽略
    module.call("toast", None, None);
    assert_eq!(log.error_count(), 1);
}

/// 测试 currentTimestamp 返回可解析的毫秒值
#[test]
fn test_current_timestamp() {
    let (mut module, _events, _log) = make_bridge();
    let result = module.call("currentTimestamp", None, None).unwrap();
    let millis: i64 = result.parse().unwrap();
    assert!(millis > 0);
}

/// 测试固定时刻的格式化结果完全确定
#[test]
fn test_date_formatter_deterministic() {
    let (mut module, _events, _log) = make_bridge();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(7, 9, 2)
        .unwrap();
    let time_stamp = date.and_utc().timestamp_millis();
    let params = json!({ "timeStamp": time_stamp, "format": "yyyy-MM-dd HH:mm:ss" }).to_string();
    let result = module.call("dateFormatter", Some(&params), None).unwrap();
    assert_eq!(result, "2024-03-05 07:09:02");
}

/// 测试 dateFormatter 坏参数串只产生一条日志并返回空串
#[test]
fn test_date_formatter_malformed_params() {
    let (mut module, _events, log) = make_bridge();
    let result = module.call("dateFormatter", Some("{broken"), None).unwrap();
    assert_eq!(result, "");
    assert_eq!(log.error_count(), 1);
}

/// 锁定替换顺序：token 表本身与“互不为子串”的前提
#[test]
fn test_date_token_order_locked() {
    assert_eq!(DATE_TOKENS, ["yyyy", "MM", "dd", "HH", "mm", "ss"]);
    for (i, a) in DATE_TOKENS.iter().enumerate() {
        for (j, b) in DATE_TOKENS.iter().enumerate() {
            if i != j {
                assert!(
                    !b.contains(a),
                    "token {} is a substring of {}, substitution order would corrupt output",
                    a,
                    b
                );
            }
        }
    }
}

/// 测试大小写区分的 token 各取各的字段，先替换的结果不被后面的破坏
#[test]
fn test_format_date_tokens() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_opt(23, 34, 56)
        .unwrap();
    assert_eq!(format_date(&date, "yyyy/MM mm"), "2024/12 34");
    assert_eq!(format_date(&date, "dd HH"), "31 23");
    assert_eq!(format_date(&date, "ss"), "56");
    // 单位数字段补零
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    assert_eq!(format_date(&date, "yyyy-MM-dd HH:mm:ss"), "2024-01-02 03:04:05");
    // 没有 token 的文本原样保留
    assert_eq!(format_date(&date, "at MM!"), "at 01!");
}

/// 测试缓存读写回路
#[test]
fn test_cache_roundtrip() {
    let storage = Arc::new(MemoryStorage::new());
    let log = RecordingLog::new();
    let mut module = CacheModule::new(storage.clone(), log.clone());

    let params = json!({ "key": "user", "value": "alice" }).to_string();
    module.call("setItem", Some(&params), None);
    let result = module.call("getItem", Some("user"), None).unwrap();
    assert_eq!(result, "alice");

    // 未知 key 读出空串
    let result = module.call("getItem", Some("nobody"), None).unwrap();
    assert_eq!(result, "");
    assert_eq!(log.error_count(), 0);
}

/// 测试存储故障转成空读/吞掉的写，各记一条日志
#[test]
fn test_cache_storage_failures() {
    let log = RecordingLog::new();
    let mut module = CacheModule::new(Arc::new(FailingStorage), log.clone());

    let result = module.call("getItem", Some("user"), None).unwrap();
    assert_eq!(result, "");
    assert_eq!(log.error_count(), 1);

    let params = json!({ "key": "user", "value": "alice" }).to_string();
    module.call("setItem", Some(&params), None);
    assert_eq!(log.error_count(), 2);
}

/// 测试 setItem 坏参数串只产生一条日志且不落库
#[test]
fn test_cache_set_item_malformed() {
    let storage = Arc::new(MemoryStorage::new());
    let log = RecordingLog::new();
    let mut module = CacheModule::new(storage.clone(), log.clone());
    module.call("setItem", Some("][bad"), None);
    assert_eq!(log.error_count(), 1);
    assert_eq!(storage.get_item("").unwrap(), None);
}

/// 测试缓存模块未识别方法走统一应答
#[test]
fn test_cache_unknown_method() {
    let log = RecordingLog::new();
    let mut module = CacheModule::new(Arc::new(MemoryStorage::new()), log);
    let (callback, captured) = capture_callback();
    module.call("removeItem", None, Some(&callback));
    let captured = captured.lock().unwrap();
    assert_eq!(captured[0]["code"].as_i64().unwrap(), CODE_NOT_FOUND);
}

/// 测试文件存储跨实例持久化
#[test]
fn test_file_storage_persists() {
    let path = std::env::temp_dir().join("host-render-test-storage.json");
    let _ = std::fs::remove_file(&path);

    let storage = FileStorage::open(&path);
    storage.set_item("theme", "dark").unwrap();
    drop(storage);

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
}

/// 测试注册表的惰性工厂与重复创建
#[test]
fn test_module_registry() {
    let mut registry = ModuleRegistry::new();
    assert!(!registry.contains(BridgeModule::MODULE_NAME));

    let events = Arc::new(HostEventQueue::new());
    let log = RecordingLog::new();
    registry.module_export(BridgeModule::MODULE_NAME, move || {
        Box::new(BridgeModule::new(events.clone(), log.clone()))
    });
    assert!(registry.contains(BridgeModule::MODULE_NAME));
    assert!(registry.create(BridgeModule::MODULE_NAME).is_some());
    assert!(registry.create("Missing").is_none());
}
