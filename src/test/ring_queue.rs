use crate::queue::RingQueue;

#[test]
fn ring_queue_preserves_fifo_order() {
    let mut q = RingQueue::new(4);
    assert!(q.is_empty());
    assert_eq!(q.capacity(), 4);

    for i in 1..=3 {
        assert!(q.admit(i).is_ok());
    }
    assert_eq!(q.len(), 3);
    assert_eq!(q.peek(), Some(&1));
    assert_eq!(q.back(), Some(&3));

    assert_eq!(q.remove(), Some(1));
    assert_eq!(q.remove(), Some(2));
    assert_eq!(q.remove(), Some(3));
    assert_eq!(q.remove(), None);
    assert!(q.is_empty());
}

#[test]
fn ring_queue_rejects_when_full_without_mutation() {
    let mut q = RingQueue::new(2);
    assert!(q.admit(1).is_ok());
    assert!(q.admit(2).is_ok());
    assert!(q.is_full());

    let rejected = q.admit(3).expect_err("should be full");
    assert_eq!(rejected, 3);
    assert_eq!(q.len(), 2);
    assert_eq!(q.peek(), Some(&1));
    assert_eq!(q.back(), Some(&2));
}

#[test]
fn ring_queue_wraps_around() {
    let mut q = RingQueue::new(3);
    for i in 1..=3 {
        assert!(q.admit(i).is_ok());
    }
    assert!(q.admit(4).is_err());

    assert_eq!(q.remove(), Some(1));
    assert!(q.admit(4).is_ok());
    assert_eq!(q.len(), 3);
    assert!(q.is_full());

    assert_eq!(q.remove(), Some(2));
    assert_eq!(q.remove(), Some(3));
    assert_eq!(q.len(), 1);
    assert_eq!(q.remove(), Some(4));
    assert!(q.is_empty());
    assert!(!q.is_full());

    // 清空后重新从头开始
    assert!(q.admit(5).is_ok());
    assert_eq!(q.len(), 1);
    assert_eq!(q.remove(), Some(5));
}

#[test]
fn ring_queue_single_slot_distinguishes_empty_and_full() {
    let mut q = RingQueue::new(1);
    assert!(q.is_empty());
    assert!(!q.is_full());

    assert!(q.admit('a').is_ok());
    assert!(!q.is_empty());
    assert!(q.is_full());
    assert_eq!(q.len(), 1);
    assert_eq!(q.admit('b'), Err('b'));

    assert_eq!(q.remove(), Some('a'));
    assert!(q.is_empty());
    assert!(q.admit('b').is_ok());
}

#[test]
fn ring_queue_zero_capacity_rejects_everything() {
    let mut q = RingQueue::new(0);
    assert!(q.is_full());
    assert_eq!(q.admit(1), Err(1));
    assert_eq!(q.len(), 0);
    assert_eq!(q.remove(), None);
}
