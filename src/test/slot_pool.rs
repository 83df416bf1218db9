use crate::engine::SlotId;
use crate::queue::{FreeSlot, SlotPool};
use crate::sim::SimTime;

fn free(at: u64, slot: usize) -> FreeSlot {
    FreeSlot {
        available_at: SimTime(at),
        slot: SlotId(slot),
    }
}

#[test]
fn slot_pool_starts_with_every_slot_free_at_zero() {
    let mut pool = SlotPool::new(3);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.peek_min(), Some(free(0, 0)));
    assert_eq!(pool.pop_min(), Some(free(0, 0)));
    assert_eq!(pool.pop_min(), Some(free(0, 1)));
    assert_eq!(pool.pop_min(), Some(free(0, 2)));
    assert_eq!(pool.pop_min(), None);
    assert!(pool.is_empty());
}

#[test]
fn slot_pool_orders_by_time_then_slot_id() {
    let mut pool = SlotPool::new(0);
    pool.push_back(SimTime(5), SlotId(2));
    pool.push_back(SimTime(5), SlotId(0));
    pool.push_back(SimTime(3), SlotId(1));

    assert_eq!(pool.peek_min(), Some(free(3, 1)));
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.pop_min(), Some(free(3, 1)));
    assert_eq!(pool.pop_min(), Some(free(5, 0)));
    assert_eq!(pool.pop_min(), Some(free(5, 2)));
}
