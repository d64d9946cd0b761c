//! 图片加载路径自检
//! 依次走 base64 / 本地文件 / http / gif 四条取图路径，核对解码分辨率

use base64::Engine;
use host_render::adapter::{HostAdapters, ImageAdapter, ImageLoadRequest, ImageOutcome};
use std::sync::mpsc;
use std::time::Duration;

/// 132x132 的基准 PNG
const REFERENCE_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAIQAAACEAQMAAABrihHkAAAABlBMVEUAAAD///+l2Z/dAAAAL0lEQVRIx2MAgf9Q8AHEGRUZFSFOBM6DyfCDREdFRkVGRUZFhpjIYCtXR0WGlAgAIh9YHRjOdfwAAAAASUVORK5CYII=";
const STANDARD_WIDTH: u32 = 132;
const STANDARD_HEIGHT: u32 = 132;

const HTTP_SRC: &str = "https://vfiles.gtimg.cn/wuji_dashboard/wupload/xy/starter/21e7b9c2.png";
const GIF_SRC: &str = "https://vfiles.gtimg.cn/wuji_dashboard/wupload/xy/starter/2963d536.gif";

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

fn fetch_outcome(adapters: &HostAdapters, request: ImageLoadRequest) -> Option<ImageOutcome> {
    let (tx, rx) = mpsc::channel();
    adapters.image().fetch(
        request,
        Box::new(move |outcome| {
            let _ = tx.send(outcome);
        }),
    );
    rx.recv_timeout(FETCH_TIMEOUT).ok()
}

fn check_resolution(label: &str, outcome: Option<ImageOutcome>) -> bool {
    let passed = match &outcome {
        Some(ImageOutcome::Ready(image)) => {
            println!("   resolution: {}x{}", image.width, image.height);
            image.width == STANDARD_WIDTH && image.height == STANDARD_HEIGHT
        }
        Some(ImageOutcome::Cleared) => {
            println!("   cleared before completion");
            false
        }
        Some(ImageOutcome::Failed) | None => {
            println!("   load failed");
            false
        }
    };
    println!("{} ... {}", label, if passed { "PASS" } else { "FAIL" });
    passed
}

fn main() {
    let adapters = HostAdapters::new();
    let mut failures = 0;

    // 1. base64
    println!("1. base64");
    let src = format!("data:image/png;base64,{}", REFERENCE_BASE64);
    if !check_resolution("   base64", fetch_outcome(&adapters, ImageLoadRequest::new(src))) {
        failures += 1;
    }

    // 2. 本地文件：把基准图落盘后走 file:// 路径
    println!("2. file");
    let path = std::env::temp_dir().join("host-render-image-check.png");
    let written = base64::engine::general_purpose::STANDARD
        .decode(REFERENCE_BASE64)
        .ok()
        .and_then(|bytes| std::fs::write(&path, bytes).ok());
    if written.is_none() {
        println!("   write reference file failed");
        failures += 1;
    } else {
        let src = format!("file://{}", path.display());
        if !check_resolution("   file", fetch_outcome(&adapters, ImageLoadRequest::new(src))) {
            failures += 1;
        }
    }

    // 3. http/https
    println!("3. http/https");
    if !check_resolution(
        "   http",
        fetch_outcome(&adapters, ImageLoadRequest::new(HTTP_SRC)),
    ) {
        failures += 1;
    }

    // 4. gif
    println!("4. gif");
    let outcome = fetch_outcome(&adapters, ImageLoadRequest::new(GIF_SRC));
    let passed = match &outcome {
        Some(ImageOutcome::Ready(image)) => {
            println!(
                "   resolution: {}x{}, frames: {}",
                image.width, image.height, image.frame_count
            );
            image.frame_count >= 1
        }
        _ => {
            println!("   load failed");
            false
        }
    };
    println!("   gif ... {}", if passed { "PASS" } else { "FAIL" });
    if !passed {
        failures += 1;
    }

    println!();
    if failures == 0 {
        println!("all checks passed");
    } else {
        println!("{} check(s) failed", failures);
        std::process::exit(1);
    }
}
