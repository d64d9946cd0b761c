//! 就绪门
//! 依赖就绪前把动作按到达顺序入队，就绪时一次性按序冲刷，之后直接执行
//! 检查与入队 / 冲刷在同一把锁内完成，动作本身在锁外执行

use std::sync::Mutex;

type GateAction = Box<dyn FnOnce() + Send>;

struct GateState {
    open: bool,
    pending: Vec<GateAction>,
}

pub struct ReadyGate {
    state: Mutex<GateState>,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                open: false,
                pending: Vec::new(),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().map(|state| state.open).unwrap_or(false)
    }

    /// 门开着直接执行，否则入队等待冲刷
    pub fn dispatch(&self, action: impl FnOnce() + Send + 'static) {
        let action: GateAction = Box::new(action);
        let run_now = {
            let mut state = match self.state.lock() {
                Ok(state) => state,
                Err(_) => return,
            };
            if state.open {
                Some(action)
            } else {
                state.pending.push(action);
                None
            }
        };
        if let Some(action) = run_now {
            action();
        }
    }

    /// 打开门并按序冲刷挂起动作，冲刷恰好发生一次
    pub fn open(&self) {
        let pending = {
            let mut state = match self.state.lock() {
                Ok(state) => state,
                Err(_) => return,
            };
            if state.open {
                return;
            }
            state.open = true;
            std::mem::take(&mut state.pending)
        };
        for action in pending {
            action();
        }
    }
}

impl Default for ReadyGate {
    fn default() -> Self {
        Self::new()
    }
}
