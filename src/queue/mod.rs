//! 调度核心使用的三种队列结构
//!
//! - `RingQueue`：等待区，固定容量的 FIFO
//! - `SlotPool`：空闲槽位，按可用时间/槽位 id 排序
//! - `DepartureSchedule`：在槽位中的人，按离场时间/人员 id 排序

mod departures;
mod ring;
mod slot_pool;

pub use departures::{DepartureSchedule, ScheduledDeparture};
pub use ring::RingQueue;
pub use slot_pool::{FreeSlot, SlotPool};
