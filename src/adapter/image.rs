//! 图片适配器
//! 按源引用形态分类取图：内联 base64 / 打包资源 / 本地文件 / 远程 URL
//! base64 在子线程解码并按 2 的幂次降采样控制内存，其余来源走取回后解码

use super::{ImageCallback, LogAdapter, ThreadAdapter};
use base64::Engine;
use image::imageops::FilterType;
use image::AnimationDecoder;
use image::GenericImageView;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TAG: &str = "HostImageAdapter";

/// 请求尺寸的“未指定”哨兵值
pub const SIZE_UNSPECIFIED: i32 = -1;

const SCHEME_DATA: &str = "data:";
const SCHEME_ASSETS: &str = "assets://";
const SCHEME_FILE: &str = "file://";
const MAX_REMOTE_BYTES: u64 = 10 * 1024 * 1024;

/// 缩放策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// 拉伸填满请求尺寸
    #[default]
    Stretch,
    /// 保持纵横比铺满并裁剪
    CenterCrop,
    /// 保持纵横比完整显示
    FitCenter,
}

/// 图片加载请求，由引擎产出、适配器消费
#[derive(Debug, Clone)]
pub struct ImageLoadRequest {
    pub src: String,
    pub request_width: i32,
    pub request_height: i32,
    pub need_resize: bool,
    pub scale_mode: ScaleMode,
}

impl ImageLoadRequest {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            request_width: SIZE_UNSPECIFIED,
            request_height: SIZE_UNSPECIFIED,
            need_resize: false,
            scale_mode: ScaleMode::default(),
        }
    }

    pub fn with_size(mut self, width: i32, height: i32, scale_mode: ScaleMode) -> Self {
        self.request_width = width;
        self.request_height = height;
        self.need_resize = true;
        self.scale_mode = scale_mode;
        self
    }

    pub fn is_base64(&self) -> bool {
        self.src.starts_with(SCHEME_DATA)
    }

    pub fn is_assets(&self) -> bool {
        self.src.starts_with(SCHEME_ASSETS)
    }

    pub fn is_file(&self) -> bool {
        self.src.starts_with(SCHEME_FILE)
    }

    pub fn is_web_url(&self) -> bool {
        self.src.starts_with("http://") || self.src.starts_with("https://")
    }

    /// 按前缀分类源引用
    pub fn source(&self) -> ImageSource<'_> {
        if self.is_base64() {
            ImageSource::Base64(&self.src)
        } else if self.is_assets() {
            ImageSource::Assets(&self.src[SCHEME_ASSETS.len()..])
        } else if self.is_file() {
            ImageSource::File(&self.src[SCHEME_FILE.len()..])
        } else {
            ImageSource::Remote(&self.src)
        }
    }
}

/// 源引用分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Base64(&'a str),
    Assets(&'a str),
    File(&'a str),
    Remote(&'a str),
}

/// 解码完成的图片
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// RGBA 像素
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// GIF 为帧数，静态图为 1
    pub frame_count: usize,
}

/// 加载结局：成功 / 结果被废弃 / 失败
#[derive(Debug)]
pub enum ImageOutcome {
    Ready(DecodedImage),
    Cleared,
    Failed,
}

/// 进程级已定位图片缓存，key 为源地址
static IMAGE_CACHE: Lazy<Mutex<HashMap<String, Option<DecodedImage>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

pub struct HostImageAdapter {
    thread: Arc<dyn ThreadAdapter>,
    log: Arc<dyn LogAdapter>,
    assets_dir: Option<PathBuf>,
    timeout: Duration,
}

impl HostImageAdapter {
    pub fn new(thread: Arc<dyn ThreadAdapter>, log: Arc<dyn LogAdapter>) -> Self {
        Self {
            thread,
            log,
            assets_dir: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// 指定打包资源根目录，assets:// 引用相对它解析
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn fetch_base64(&self, request: ImageLoadRequest, callback: ImageCallback) {
        let log = self.log.clone();
        // 解码移出调用线程
        self.thread.execute(Box::new(move || {
            callback(decode_base64_request(&request, log.as_ref()));
        }));
    }

    fn fetch_located(&self, request: ImageLoadRequest, callback: ImageCallback) {
        let log = self.log.clone();
        let assets_dir = self.assets_dir.clone();
        let timeout = self.timeout;
        self.thread.execute(Box::new(move || {
            callback(load_located_request(
                &request,
                assets_dir.as_deref(),
                timeout,
                log.as_ref(),
            ));
        }));
    }
}

impl super::ImageAdapter for HostImageAdapter {
    fn fetch(&self, request: ImageLoadRequest, callback: ImageCallback) {
        if request.is_base64() {
            self.fetch_base64(request, callback);
        } else {
            self.fetch_located(request, callback);
        }
    }
}

/// 计算降采样率
/// 宽高都超出请求约 2 倍时不断减半，结果恒为 2 的幂；请求为 0 或未指定时为 1
pub fn calculate_in_sample_size(
    native_width: u32,
    native_height: u32,
    req_width: i32,
    req_height: i32,
) -> u32 {
    if req_width <= 0 || req_height <= 0 {
        return 1;
    }
    let mut width = native_width;
    let mut height = native_height;
    let mut in_sample_size = 1u32;
    while height > req_height as u32 && width > req_width as u32 {
        let height_ratio = (height as f32 / req_height as f32).round() as u32;
        let width_ratio = (width as f32 / req_width as f32).round() as u32;
        let ratio = height_ratio.max(width_ratio);
        if ratio < 2 {
            break;
        }
        width >>= 1;
        height >>= 1;
        in_sample_size <<= 1;
    }
    in_sample_size
}

fn decode_base64_request(request: &ImageLoadRequest, log: &dyn LogAdapter) -> ImageOutcome {
    let payload = match request.src.splitn(2, ',').nth(1) {
        Some(payload) => payload,
        None => {
            log.debug(TAG, "base64 src without payload");
            return ImageOutcome::Failed;
        }
    };
    let bytes = match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            log.debug(TAG, &format!("base64 decode error: {}", e));
            return ImageOutcome::Failed;
        }
    };
    // 先只探测边界尺寸，再决定降采样率
    let dimensions = image::io::Reader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());
    let (native_width, native_height) = match dimensions {
        Some(d) => d,
        None => {
            log.debug(TAG, "base64 bounds probe failed");
            return ImageOutcome::Failed;
        }
    };
    let sample = calculate_in_sample_size(
        native_width,
        native_height,
        request.request_width,
        request.request_height,
    );
    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            log.debug(TAG, &format!("base64 image decode error: {}", e));
            return ImageOutcome::Failed;
        }
    };
    let img = if sample > 1 {
        img.thumbnail((native_width / sample).max(1), (native_height / sample).max(1))
    } else {
        img
    };
    let (width, height) = img.dimensions();
    ImageOutcome::Ready(DecodedImage {
        pixels: img.to_rgba8().into_raw(),
        width,
        height,
        frame_count: 1,
    })
}

fn load_located_request(
    request: &ImageLoadRequest,
    assets_dir: Option<&std::path::Path>,
    timeout: Duration,
    log: &dyn LogAdapter,
) -> ImageOutcome {
    if let Some(cached) = cache_lookup(&request.src) {
        return match cached {
            Some(image) => ImageOutcome::Ready(image),
            None => ImageOutcome::Failed,
        };
    }

    let bytes = match request.source() {
        ImageSource::Remote(url) => load_remote_bytes(url, timeout, log),
        ImageSource::File(path) => std::fs::read(path).ok(),
        ImageSource::Assets(rel) => assets_dir.and_then(|dir| std::fs::read(dir.join(rel)).ok()),
        // base64 不走定位路径
        ImageSource::Base64(_) => None,
    };
    let decoded = bytes.and_then(|bytes| decode_located_bytes(&bytes, &request.src, request, log));

    cache_store(&request.src, decoded.clone());
    match decoded {
        Some(image) => ImageOutcome::Ready(image),
        None => {
            log.debug(TAG, &format!("image load failed: {}", request.src));
            ImageOutcome::Failed
        }
    }
}

fn cache_lookup(src: &str) -> Option<Option<DecodedImage>> {
    let cache = IMAGE_CACHE.lock().ok()?;
    cache.get(src).cloned()
}

fn cache_store(src: &str, decoded: Option<DecodedImage>) {
    if let Ok(mut cache) = IMAGE_CACHE.lock() {
        cache.insert(src.to_string(), decoded);
    }
}

fn load_remote_bytes(url: &str, timeout: Duration, log: &dyn LogAdapter) -> Option<Vec<u8>> {
    let response = match ureq::get(url).timeout(timeout).call() {
        Ok(response) => response,
        Err(e) => {
            log.debug(TAG, &format!("http fetch error: {}", e));
            return None;
        }
    };
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_REMOTE_BYTES)
        .read_to_end(&mut bytes)
        .ok()?;
    Some(bytes)
}

fn decode_located_bytes(
    bytes: &[u8],
    src: &str,
    request: &ImageLoadRequest,
    log: &dyn LogAdapter,
) -> Option<DecodedImage> {
    if src.ends_with(".gif") {
        return decode_gif_bytes(bytes, log);
    }
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            log.debug(TAG, &format!("image decode error: {}", e));
            return None;
        }
    };
    let img = apply_resize(img, request);
    let (width, height) = img.dimensions();
    Some(DecodedImage {
        pixels: img.to_rgba8().into_raw(),
        width,
        height,
        frame_count: 1,
    })
}

fn apply_resize(img: image::DynamicImage, request: &ImageLoadRequest) -> image::DynamicImage {
    if !request.need_resize || request.request_width <= 0 || request.request_height <= 0 {
        return img;
    }
    let w = request.request_width as u32;
    let h = request.request_height as u32;
    match request.scale_mode {
        ScaleMode::CenterCrop => img.resize_to_fill(w, h, FilterType::Triangle),
        ScaleMode::FitCenter => img.resize(w, h, FilterType::Triangle),
        ScaleMode::Stretch => img.resize_exact(w, h, FilterType::Triangle),
    }
}

fn decode_gif_bytes(bytes: &[u8], log: &dyn LogAdapter) -> Option<DecodedImage> {
    let decoder = match image::codecs::gif::GifDecoder::new(Cursor::new(bytes)) {
        Ok(decoder) => decoder,
        Err(e) => {
            log.debug(TAG, &format!("gif decode error: {}", e));
            return None;
        }
    };
    let frames = match decoder.into_frames().collect_frames() {
        Ok(frames) => frames,
        Err(e) => {
            log.debug(TAG, &format!("gif frames error: {}", e));
            return None;
        }
    };
    let first = frames.first()?;
    let buffer = first.buffer();
    let (width, height) = buffer.dimensions();
    Some(DecodedImage {
        pixels: buffer.as_raw().clone(),
        width,
        height,
        frame_count: frames.len(),
    })
}
