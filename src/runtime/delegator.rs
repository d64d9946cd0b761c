//! 渲染视图委托
//! 把宿主生命周期的四个信号转发给渲染视图，并在 attach 期驱动两个注册钩子
//! 内建模块先注册，宿主注册的外部模块与视图在其后

use super::{HostEventQueue, PageParams, RenderContext, RenderView};
use crate::adapter::HostAdapters;
use crate::module::{BridgeModule, CacheModule, ModuleRegistry};
use crate::storage::HostStorage;
use crate::view::{EmbeddedPageView, MessageView, NativeElement, ViewRegistry, WebView};
use crate::SizeI;
use std::sync::Arc;

/// 委托回调：宿主在这里注册外部模块与自定义视图
pub trait RenderViewDelegatorDelegate: Send + Sync {
    fn register_external_modules(&self, registry: &mut ModuleRegistry) {
        let _ = registry;
    }

    fn register_external_views(&self, registry: &mut ViewRegistry) {
        let _ = registry;
    }
}

pub struct RenderViewDelegator {
    adapters: Arc<HostAdapters>,
    storage: Arc<dyn HostStorage>,
    delegate: Arc<dyn RenderViewDelegatorDelegate>,
    view: Option<RenderView>,
}

impl RenderViewDelegator {
    pub fn new(
        adapters: Arc<HostAdapters>,
        storage: Arc<dyn HostStorage>,
        delegate: Arc<dyn RenderViewDelegatorDelegate>,
    ) -> Self {
        Self {
            adapters,
            storage,
            delegate,
            view: None,
        }
    }

    /// 挂载：组装注册表、创建渲染视图并挂到容器
    pub fn on_attach(
        &mut self,
        container: &mut NativeElement,
        page_name: &str,
        params: PageParams,
        size: SizeI,
    ) -> Result<(), String> {
        if self.view.is_some() {
            return Err("delegator already attached".to_string());
        }

        let events = Arc::new(HostEventQueue::new());

        let mut modules = ModuleRegistry::new();
        let bridge_events = events.clone();
        let bridge_log = self.adapters.log();
        modules.module_export(BridgeModule::MODULE_NAME, move || {
            Box::new(BridgeModule::new(bridge_events.clone(), bridge_log.clone()))
        });
        let cache_storage = self.storage.clone();
        let cache_log = self.adapters.log();
        modules.module_export(CacheModule::MODULE_NAME, move || {
            Box::new(CacheModule::new(cache_storage.clone(), cache_log.clone()))
        });
        self.delegate.register_external_modules(&mut modules);

        let mut views = ViewRegistry::new();
        views.render_view_export(MessageView::VIEW_NAME, |_| Box::new(MessageView::new()));
        views.render_view_export(WebView::VIEW_NAME, |ctx| {
            Box::new(WebView::new(ctx.events.clone(), ctx.adapters.log()))
        });
        views.render_view_export(EmbeddedPageView::VIEW_NAME, |ctx| {
            Box::new(EmbeddedPageView::new(ctx.clone()))
        });
        self.delegate.register_external_views(&mut views);

        let context = RenderContext {
            adapters: self.adapters.clone(),
            modules: Arc::new(modules),
            views: Arc::new(views),
            events,
            viewport: size,
        };
        let mut view = RenderView::new(context);
        view.on_attach(page_name, params, size)?;

        let mut mount = NativeElement::new("render-view");
        mount.set_attribute("page", page_name);
        container.append_child(mount);

        self.view = Some(view);
        Ok(())
    }

    /// 页面可见
    pub fn on_resume(&mut self) {
        if let Some(view) = &mut self.view {
            view.on_resume();
        }
    }

    /// 页面不可见
    pub fn on_pause(&mut self) {
        if let Some(view) = &mut self.view {
            view.on_pause();
        }
    }

    /// 卸载，teardown 期重复调用安全
    pub fn on_detach(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.on_detach();
        }
    }

    pub fn view(&self) -> Option<&RenderView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut RenderView> {
        self.view.as_mut()
    }
}
