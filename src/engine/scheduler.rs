//! 调度引擎
//!
//! 持有等待区、空闲槽位池、离场日程和仿真时钟，按固定协议推进：
//! 到达 -> 尝试批量分配 -> 处理到期离场（离场释放槽位后立即再次尝试分配）。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::observer::{EngineObserver, NoopObserver};
use super::{EngineError, Person, PersonId, SlotId};
use crate::queue::{DepartureSchedule, RingQueue, SlotPool};
use crate::sim::SimTime;

pub const DEFAULT_BATCH_CAP: usize = 10;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1_000_000;

/// 等待者与空闲槽位的配对策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// 必须同时凑齐 batch_size 个等待者和 batch_size 个空闲槽位才分配
    #[default]
    Batched,
    /// 有空闲槽位和等待者就分配，每批至多 batch_size 个
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub slots: usize,
    pub service_time: SimTime,
    pub batch_cap: usize,
    pub queue_capacity: usize,
    pub policy: AdmissionPolicy,
}

impl EngineConfig {
    pub fn new(slots: usize, service_time: SimTime) -> Self {
        Self {
            slots,
            service_time,
            batch_cap: DEFAULT_BATCH_CAP,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            policy: AdmissionPolicy::Batched,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.slots.min(self.batch_cap)
    }
}

/// 计数器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub arrived: u64,
    pub rejected: u64,
    pub assigned: u64,
    pub departed: u64,
    pub peak_waiting: usize,
}

pub struct Engine {
    cfg: EngineConfig,
    now: SimTime,
    waiting: RingQueue<Person>,
    pool: SlotPool,
    departures: DepartureSchedule,
    /// 正在排空：不会再有人来补齐批次
    closed: bool,
    /// 到达时补处理的离场者，交给下一次 process_departures 返回
    released: Vec<Person>,
    stats: Stats,
    observer: Box<dyn EngineObserver>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("cfg", &self.cfg)
            .field("now", &self.now)
            .field("waiting", &self.waiting.len())
            .field("free_slots", &self.pool.len())
            .field("in_service", &self.departures.len())
            .field("closed", &self.closed)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Result<Self, EngineError> {
        if cfg.slots == 0 {
            return Err(EngineError::NoSlots);
        }
        if cfg.batch_cap == 0 {
            return Err(EngineError::ZeroBatchCap);
        }
        if cfg.queue_capacity == 0 {
            return Err(EngineError::ZeroQueueCapacity);
        }
        Ok(Self {
            now: SimTime::ZERO,
            waiting: RingQueue::new(cfg.queue_capacity),
            pool: SlotPool::new(cfg.slots),
            departures: DepartureSchedule::default(),
            closed: false,
            released: Vec::new(),
            stats: Stats::default(),
            observer: Box::new(NoopObserver),
            cfg,
        })
    }

    pub fn with_observer(mut self, observer: impl EngineObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observer = observer;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// 当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn batch_size(&self) -> usize {
        self.cfg.batch_size()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    pub fn free_slots(&self) -> usize {
        self.pool.len()
    }

    pub fn in_service(&self) -> usize {
        self.departures.len()
    }

    /// 下一次离场时间
    pub fn next_departure(&self) -> Option<SimTime> {
        self.departures.peek_min()
    }

    /// 没有等待者，也没有人在槽位中
    pub fn is_idle(&self) -> bool {
        self.waiting.is_empty() && self.departures.is_empty()
    }

    /// 人员到达：进入等待区后尝试分配。
    ///
    /// 到达时间之前到期的离场先按各自的离场时间处理，再把时钟推进到到达时间。
    /// 等待区已满时返回 `QueueFull`，该人员不进入等待区，时钟不会推进到到达时间。
    pub fn on_arrival(&mut self, id: PersonId, arrival: SimTime) -> Result<(), EngineError> {
        self.closed = false;
        while self.departures.peek_min().is_some_and(|at| at <= arrival) {
            let freed = self.advance();
            self.released.extend(freed);
        }

        let person = Person::new(id, arrival);
        if self.waiting.admit(person).is_err() {
            self.stats.rejected += 1;
            self.observer.on_rejected(self.now, id);
            return Err(EngineError::QueueFull {
                person: id,
                capacity: self.waiting.capacity(),
            });
        }
        self.now = self.now.max(arrival);
        self.stats.arrived += 1;
        self.stats.peak_waiting = self.stats.peak_waiting.max(self.waiting.len());
        if let Some(p) = self.waiting.back() {
            self.observer.on_arrival(self.now, p);
        }
        self.try_assign_batch();
        Ok(())
    }

    /// 处理所有离场时间不晚于当前时间的离场事件，按处理顺序返回离场者
    pub fn process_departures(&mut self) -> Vec<Person> {
        let mut out = std::mem::take(&mut self.released);
        while let Some(due) = self.departures.pop_due(self.now) {
            out.push(self.free_slot(due.person));
        }
        out
    }

    /// 把时钟推进到最早的离场时间并处理到期离场；没有在场的人时不做任何事
    pub fn advance(&mut self) -> Vec<Person> {
        let Some(at) = self.departures.peek_min() else {
            return Vec::new();
        };
        if at > self.now {
            trace!(from = self.now.0, to = at.0, "时钟推进到下一次离场");
            self.now = at;
        }
        self.process_departures()
    }

    /// 关闭到达流并运行到没有等待者、没有在场者为止
    pub fn drain(&mut self) -> Vec<Person> {
        self.closed = true;
        // 关闭后不足一批的等待者也可以分配
        self.try_assign_batch();
        let mut out = self.process_departures();
        while !self.departures.is_empty() {
            out.extend(self.advance());
        }
        debug!(now = self.now.0, departed = self.stats.departed, "排空完成");
        out
    }

    /// 本轮可以成对弹出的数量；None 表示门槛未满足
    fn next_batch_len(&self) -> Option<usize> {
        let bs = self.batch_size();
        let waiting = self.waiting.len();
        if waiting == 0 {
            return None;
        }
        match self.cfg.policy {
            AdmissionPolicy::Batched => {
                if self.pool.len() < bs {
                    None
                } else if waiting >= bs {
                    Some(bs)
                } else if self.closed {
                    Some(waiting)
                } else {
                    None
                }
            }
            AdmissionPolicy::Greedy => {
                let k = bs.min(waiting).min(self.pool.len());
                (k > 0).then_some(k)
            }
        }
    }

    fn try_assign_batch(&mut self) {
        while let Some(k) = self.next_batch_len() {
            trace!(now = self.now.0, batch = k, "批量分配");
            for _ in 0..k {
                let free = self
                    .pool
                    .pop_min()
                    .expect("slot pool holds at least one batch");
                let person = self
                    .waiting
                    .remove()
                    .expect("waiting queue holds at least one batch");
                self.assign(person, free.slot, free.available_at);
            }
        }
    }

    fn assign(&mut self, mut person: Person, slot: SlotId, available_at: SimTime) {
        self.now = self.now.max(available_at);
        let departure = person.start_dipping(slot, self.now, self.cfg.service_time);
        self.stats.assigned += 1;
        self.observer.on_assign(self.now, &person);
        self.departures.push(departure, person);
    }

    fn free_slot(&mut self, mut person: Person) -> Person {
        person.exit();
        let slot = person
            .slot
            .expect("person in the departure schedule has a slot");
        self.pool.push_back(self.now, slot);
        self.stats.departed += 1;
        self.observer.on_departure(self.now, &person);
        self.try_assign_batch();
        person
    }
}
