//! 渲染视图运行时
//! 渲染视图实例、生命周期委托与页面参数组装

mod delegator;
mod params;
mod render_view;

pub use delegator::{RenderViewDelegator, RenderViewDelegatorDelegate};
pub use params::{assemble_page_params, parse_query_params, PageParams};
pub use render_view::{HostEvent, HostEventQueue, Lifecycle, RenderContext, RenderView};
