//! 自定义视图测试

use super::support::{make_context, RecordingLog};
use crate::runtime::{HostEvent, HostEventQueue};
use crate::view::{
    EmbeddedPageView, MessageView, PropValue, ReadyGate, RenderViewExport, WebView,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 测试 message 属性直写元素文本，未知属性报告未识别
#[test]
fn test_message_view_set_prop() {
    let mut view = MessageView::new();
    assert!(view.set_prop("message", PropValue::from("hello")));
    assert_eq!(view.element().text(), "hello");

    assert!(!view.set_prop("unknown", PropValue::from("x")));
    // 类型不对同样报告未识别
    assert!(!view.set_prop("message", PropValue::from(1.0)));
}

/// 测试 web 视图 src 属性与一次性的 frame 提示
#[test]
fn test_web_view_props() {
    let events = Arc::new(HostEventQueue::new());
    let log = RecordingLog::new();
    let mut view = WebView::new(events.clone(), log.clone());

    assert!(view.set_prop("src", PropValue::from("https://example.com")));
    assert_eq!(view.element().attribute("src"), Some("https://example.com"));
    assert_eq!(view.element().tag(), "web-view");

    // frame 被识别但只提示一次
    assert!(view.set_prop("frame", PropValue::from("0 0 100 100")));
    assert!(view.set_prop("frame", PropValue::from("0 0 50 50")));
    let toasts = events.drain();
    assert_eq!(toasts.len(), 1);
    assert!(matches!(&toasts[0], HostEvent::ShowToast { .. }));
    assert_eq!(log.warns.lock().unwrap().len(), 2);

    assert!(!view.set_prop("bogus", PropValue::from(true)));
}

/// 测试就绪门开门前入队、开门时按序冲刷、开门后直通
#[test]
fn test_ready_gate_ordering() {
    let gate = ReadyGate::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for i in 0..3 {
        let seen = seen.clone();
        gate.dispatch(move || seen.lock().unwrap().push(i));
    }
    assert!(seen.lock().unwrap().is_empty());
    assert!(!gate.is_open());

    gate.open();
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);

    let seen2 = seen.clone();
    gate.dispatch(move || seen2.lock().unwrap().push(9));
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 9]);

    // 重复开门不会再冲刷
    gate.open();
    assert_eq!(seen.lock().unwrap().len(), 4);
}

/// 测试并发下每个动作恰好执行一次
#[test]
fn test_ready_gate_concurrent() {
    let gate = Arc::new(ReadyGate::new());
    let count = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let gate = gate.clone();
        let count = count.clone();
        handles.push(std::thread::spawn(move || {
            for _ in 0..100 {
                let count = count.clone();
                gate.dispatch(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                });
            }
        }));
    }
    let opener = {
        let gate = gate.clone();
        std::thread::spawn(move || gate.open())
    };
    for handle in handles {
        handle.join().unwrap();
    }
    opener.join().unwrap();
    // 开门前入队的被冲刷，开门后的直通，谁都只跑一次
    assert_eq!(count.load(Ordering::SeqCst), 800);
}

/// 测试嵌套页面：挂载前三次 sendEvent 按序缓存，挂载后一次性下发
#[test]
fn test_embedded_page_buffers_events_until_attach() {
    let context = make_context();
    let mut view = EmbeddedPageView::new(context);
    assert!(view.set_prop("pageName", PropValue::from("detail")));
    assert!(view.set_prop("pageData", PropValue::from(r#"{"appId": 7}"#)));

    for name in ["first", "second", "third"] {
        let params = json!({ "event": name, "data": { "n": name } }).to_string();
        view.call("sendEvent", Some(&params), None);
    }
    {
        let nested = view.nested_handle();
        assert!(nested.lock().unwrap().is_none());
    }

    view.on_add_to_parent();

    let nested = view.nested_handle();
    let guard = nested.lock().unwrap();
    let inner = guard.as_ref().unwrap();
    assert_eq!(inner.page_name(), "detail");
    assert_eq!(
        inner.params().get("appId").and_then(|v| v.as_i64()),
        Some(7)
    );
    let events = inner.received_events();
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    drop(guard);

    // 挂载后事件直通
    let params = json!({ "event": "fourth" }).to_string();
    view.call("sendEvent", Some(&params), None);
    assert_eq!(nested.lock().unwrap().as_ref().unwrap().received_events().len(), 4);
}

/// 测试挂载成功回调与重复挂载幂等
#[test]
fn test_embedded_page_load_success_callback() {
    let context = make_context();
    let mut view = EmbeddedPageView::new(context);
    view.set_prop("pageName", PropValue::from("home"));

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in_cb = fired.clone();
    view.set_prop(
        "loadSuccess",
        PropValue::Callback(Arc::new(move |_| {
            fired_in_cb.fetch_add(1, Ordering::SeqCst);
        })),
    );

    view.on_add_to_parent();
    view.on_add_to_parent();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

/// 测试没有 pageName 时不挂载，事件留在队列里不丢
#[test]
fn test_embedded_page_without_page_name() {
    let context = make_context();
    let mut view = EmbeddedPageView::new(context);
    let params = json!({ "event": "pending" }).to_string();
    view.call("sendEvent", Some(&params), None);
    view.on_add_to_parent();
    assert!(view.nested_handle().lock().unwrap().is_none());
}

/// 测试 sendEvent 坏参数串不向外抛错
#[test]
fn test_embedded_page_send_event_malformed() {
    let context = make_context();
    let mut view = EmbeddedPageView::new(context);
    view.set_prop("pageName", PropValue::from("home"));
    view.call("sendEvent", Some("}{"), None);
    view.on_add_to_parent();
    // 坏参数被丢弃，不产生缓存事件
    let nested = view.nested_handle();
    assert!(nested.lock().unwrap().as_ref().unwrap().received_events().is_empty());
}

/// 测试视图未识别方法走统一错误应答
#[test]
fn test_view_unknown_method() {
    use crate::module::ModuleCallback;
    let mut view = MessageView::new();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let callback: ModuleCallback = Box::new(move |value| {
        sink.lock().unwrap().push(value);
    });
    view.call("spin", None, Some(&callback));
    let captured = captured.lock().unwrap();
    assert_eq!(captured[0]["code"].as_i64().unwrap(), -1);
}
