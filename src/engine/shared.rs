//! 多生产者场景下的共享引擎
//!
//! 分配与离场因果耦合（释放槽位必须立即触发再分配），所以一次外部事件的
//! 到达 + 离场处理整体在同一把锁内完成，不拆分成更细的锁。

use std::sync::{Arc, Mutex, MutexGuard};

use super::{Engine, EngineError, Person, PersonId};
use crate::sim::SimTime;

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().expect("engine lock poisoned")
    }

    /// 到达并处理到期离场，返回本次离场的人
    pub fn arrive(&self, id: PersonId, arrival: SimTime) -> Result<Vec<Person>, EngineError> {
        let mut engine = self.lock();
        engine.on_arrival(id, arrival)?;
        Ok(engine.process_departures())
    }

    pub fn drain(&self) -> Vec<Person> {
        self.lock().drain()
    }

    /// 在锁内访问引擎
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        f(&mut *self.lock())
    }
}
