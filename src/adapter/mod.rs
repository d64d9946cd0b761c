//! 宿主能力适配器
//! 每个适配器实现一种宿主能力，由 HostAdapters 在启动期组装后注入使用

mod exception;
mod font;
mod image;
mod log;
mod router;
mod thread;

pub use self::exception::{describe_panic, run_guarded, DefaultExceptionAdapter};
pub use self::font::HostFontAdapter;
pub use self::image::{
    calculate_in_sample_size, DecodedImage, HostImageAdapter, ImageLoadRequest, ImageOutcome,
    ImageSource, ScaleMode, SIZE_UNSPECIFIED,
};
pub use self::log::ConsoleLogAdapter;
pub use self::router::LogRouterAdapter;
pub use self::thread::WorkerPool;

use crate::Color;
use std::any::Any;
use std::sync::Arc;

/// 图片加载完成回调
pub type ImageCallback = Box<dyn FnOnce(ImageOutcome) + Send + 'static>;

/// 图片能力：按请求取回并解码一张图片
pub trait ImageAdapter: Send + Sync {
    fn fetch(&self, request: ImageLoadRequest, callback: ImageCallback);
}

/// 字体能力：按字体族名查找字体，未知返回 None
pub trait FontAdapter: Send + Sync {
    fn typeface(&self, font_family: &str) -> Option<Arc<fontdue::Font>>;
}

/// 颜色解析能力：无法识别返回 None
pub trait ColorParserAdapter: Send + Sync {
    fn parse_color(&self, value: &str) -> Option<Color>;
}

/// 线程能力：把任务抛到子线程池执行，立即返回
pub trait ThreadAdapter: Send + Sync {
    fn execute(&self, task: Box<dyn FnOnce() + Send + 'static>);
}

/// 路由能力：打开/关闭页面，纯委托给宿主
pub trait RouterAdapter: Send + Sync {
    fn open_page(&self, page_name: &str, page_data: &serde_json::Value);
    fn close_page(&self);
}

/// 未捕获异常处理能力
pub trait UncaughtExceptionAdapter: Send + Sync {
    fn uncaught_exception(&self, payload: Box<dyn Any + Send>);
}

/// 日志能力
pub trait LogAdapter: Send + Sync {
    fn info(&self, tag: &str, msg: &str);
    fn debug(&self, tag: &str, msg: &str);
    fn warn(&self, tag: &str, msg: &str);
    fn error(&self, tag: &str, msg: &str);
}

/// 宿主适配器配置
/// 启动期构造一次，之后只读，通过 Arc 注入到需要的组件
pub struct HostAdapters {
    image: Arc<dyn ImageAdapter>,
    font: Arc<dyn FontAdapter>,
    color: Arc<dyn ColorParserAdapter>,
    thread: Arc<dyn ThreadAdapter>,
    router: Arc<dyn RouterAdapter>,
    exception: Arc<dyn UncaughtExceptionAdapter>,
    log: Arc<dyn LogAdapter>,
}

/// 默认颜色解析
struct DefaultColorParser;

impl ColorParserAdapter for DefaultColorParser {
    fn parse_color(&self, value: &str) -> Option<Color> {
        crate::color::parse_color_str(value)
    }
}

impl HostAdapters {
    pub fn new() -> Self {
        let log: Arc<dyn LogAdapter> = Arc::new(ConsoleLogAdapter);
        let thread: Arc<dyn ThreadAdapter> = Arc::new(WorkerPool::new(2));
        Self {
            image: Arc::new(HostImageAdapter::new(thread.clone(), log.clone())),
            font: Arc::new(HostFontAdapter::new()),
            color: Arc::new(DefaultColorParser),
            router: Arc::new(LogRouterAdapter::new(log.clone())),
            exception: Arc::new(DefaultExceptionAdapter::new(log.clone())),
            thread,
            log,
        }
    }

    pub fn with_image(mut self, image: Arc<dyn ImageAdapter>) -> Self {
        self.image = image;
        self
    }

    pub fn with_font(mut self, font: Arc<dyn FontAdapter>) -> Self {
        self.font = font;
        self
    }

    pub fn with_color(mut self, color: Arc<dyn ColorParserAdapter>) -> Self {
        self.color = color;
        self
    }

    pub fn with_thread(mut self, thread: Arc<dyn ThreadAdapter>) -> Self {
        self.thread = thread;
        self
    }

    pub fn with_router(mut self, router: Arc<dyn RouterAdapter>) -> Self {
        self.router = router;
        self
    }

    pub fn with_exception(mut self, exception: Arc<dyn UncaughtExceptionAdapter>) -> Self {
        self.exception = exception;
        self
    }

    pub fn with_log(mut self, log: Arc<dyn LogAdapter>) -> Self {
        self.log = log;
        self
    }

    pub fn image(&self) -> Arc<dyn ImageAdapter> {
        self.image.clone()
    }

    pub fn font(&self) -> Arc<dyn FontAdapter> {
        self.font.clone()
    }

    pub fn color(&self) -> Arc<dyn ColorParserAdapter> {
        self.color.clone()
    }

    pub fn thread(&self) -> Arc<dyn ThreadAdapter> {
        self.thread.clone()
    }

    pub fn router(&self) -> Arc<dyn RouterAdapter> {
        self.router.clone()
    }

    pub fn exception(&self) -> Arc<dyn UncaughtExceptionAdapter> {
        self.exception.clone()
    }

    pub fn log(&self) -> Arc<dyn LogAdapter> {
        self.log.clone()
    }
}

impl Default for HostAdapters {
    fn default() -> Self {
        Self::new()
    }
}
