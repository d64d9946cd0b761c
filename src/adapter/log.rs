//! 控制台日志适配器

use super::LogAdapter;

pub struct ConsoleLogAdapter;

impl LogAdapter for ConsoleLogAdapter {
    fn info(&self, tag: &str, msg: &str) {
        println!("[I][{}] {}", tag, msg);
    }

    fn debug(&self, tag: &str, msg: &str) {
        println!("[D][{}] {}", tag, msg);
    }

    fn warn(&self, tag: &str, msg: &str) {
        println!("[W][{}] {}", tag, msg);
    }

    fn error(&self, tag: &str, msg: &str) {
        eprintln!("[E][{}] {}", tag, msg);
    }
}
