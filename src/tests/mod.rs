//! 单元测试模块
//! 覆盖能力适配器、模块桥接、自定义视图与运行时生命周期

pub mod module_tests;
pub mod support;
pub mod view_tests;
