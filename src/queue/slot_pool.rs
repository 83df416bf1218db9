//! 空闲槽位池
//!
//! 以 (可用时间, 槽位 id) 排序的最小堆；同一时间可用的槽位按 id 升序分配，
//! 保证分配顺序可复现。

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::engine::SlotId;
use crate::sim::SimTime;

/// 池中的一项：槽位 `slot` 自 `available_at` 起空闲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlot {
    pub available_at: SimTime,
    pub slot: SlotId,
}

// BinaryHeap 是 max-heap；最早可用的槽位优先，因此反向比较。
impl Ord for FreeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.available_at.cmp(&other.available_at) {
            Ordering::Equal => self.slot.cmp(&other.slot),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for FreeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct SlotPool {
    heap: BinaryHeap<FreeSlot>,
}

impl SlotPool {
    /// 初始化 `n` 个槽位，全部在时间 0 可用：(0, 0), (0, 1), ..., (0, n-1)
    pub fn new(n: usize) -> Self {
        Self {
            heap: (0..n)
                .map(|i| FreeSlot {
                    available_at: SimTime::ZERO,
                    slot: SlotId(i),
                })
                .collect(),
        }
    }

    pub fn peek_min(&self) -> Option<FreeSlot> {
        self.heap.peek().copied()
    }

    pub fn pop_min(&mut self) -> Option<FreeSlot> {
        self.heap.pop()
    }

    pub fn push_back(&mut self, available_at: SimTime, slot: SlotId) {
        self.heap.push(FreeSlot { available_at, slot });
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
