//! 到达源
//!
//! 驱动器每次向到达源索取下一个到达时间；到达源可以参考引擎当前时钟。

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::SimTime;

pub trait ArrivalSource {
    /// 下一个到达时间；None 表示到达流结束
    fn next_arrival(&mut self, now: SimTime) -> Option<SimTime>;
}

/// 预先给定的到达时间序列
#[derive(Debug, Clone)]
pub struct FixedArrivals {
    times: std::vec::IntoIter<SimTime>,
}

impl FixedArrivals {
    pub fn new(times: impl IntoIterator<Item = SimTime>) -> Self {
        Self {
            times: times.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl ArrivalSource for FixedArrivals {
    fn next_arrival(&mut self, _now: SimTime) -> Option<SimTime> {
        self.times.next()
    }
}

/// 在当前时钟基础上错开 [0, max_gap] 的随机到达
#[derive(Debug, Clone)]
pub struct StaggeredArrivals {
    remaining: u64,
    max_gap: u64,
    rng: SmallRng,
}

impl StaggeredArrivals {
    pub fn new(count: u64, max_gap: u64, seed: u64) -> Self {
        Self {
            remaining: count,
            max_gap,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl ArrivalSource for StaggeredArrivals {
    fn next_arrival(&mut self, now: SimTime) -> Option<SimTime> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let gap = self.rng.gen_range(0..=self.max_gap);
        Some(now.saturating_add(SimTime(gap)))
    }
}
