//! 子线程池
//! 固定 2 个工作线程，按提交顺序取任务，只用于把解码等耗时工作移出调用线程

use super::ThreadAdapter;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// 固定大小的工作线程池
pub struct WorkerPool {
    sender: mpsc::Sender<Job>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));
        for index in 0..size.max(1) {
            let receiver = receiver.clone();
            let spawned = thread::Builder::new()
                .name(format!("host-render-worker-{}", index))
                .spawn(move || loop {
                    // 只在取任务时持锁，执行时释放
                    let job = match receiver.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                });
            if let Err(e) = spawned {
                eprintln!("[E][WorkerPool] spawn worker failed: {}", e);
            }
        }
        Self { sender }
    }

    /// 提交任务，发送端关闭前 FIFO 入队
    pub fn execute(&self, job: Job) {
        // 所有工作线程都退出时任务被丢弃
        let _ = self.sender.send(job);
    }
}

impl ThreadAdapter for WorkerPool {
    fn execute(&self, task: Job) {
        WorkerPool::execute(self, task);
    }
}
