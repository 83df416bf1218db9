//! 环形有界队列（Bounded FIFO）
//!
//! 固定容量的环形缓冲区，入队/出队均为 O(1)。空/满通过 front/rear 哨兵区分，
//! 而不是比较元素个数：队列为空时两者都不存在。

#[derive(Debug)]
pub struct RingQueue<T> {
    buf: Box<[Option<T>]>,
    /// (front, rear)，队列为空时为 None
    ends: Option<(usize, usize)>,
}

impl<T> RingQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: (0..capacity).map(|_| None).collect(),
            ends: None,
        }
    }

    /// 入队：成功返回 Ok；队列已满则原样返回 Err(item)，队列状态不变
    pub fn admit(&mut self, item: T) -> Result<(), T> {
        let cap = self.buf.len();
        if cap == 0 {
            return Err(item);
        }
        let slot = match self.ends {
            None => {
                self.ends = Some((0, 0));
                0
            }
            Some((front, rear)) => {
                let next = (rear + 1) % cap;
                if next == front {
                    return Err(item);
                }
                self.ends = Some((front, next));
                next
            }
        };
        self.buf[slot] = Some(item);
        Ok(())
    }

    /// 出队：返回最早入队的元素
    pub fn remove(&mut self) -> Option<T> {
        let (front, rear) = self.ends?;
        let item = self.buf[front].take();
        self.ends = if front == rear {
            None
        } else {
            Some(((front + 1) % self.buf.len(), rear))
        };
        item
    }

    pub fn peek(&self) -> Option<&T> {
        let (front, _) = self.ends?;
        self.buf[front].as_ref()
    }

    /// 最近一次入队的元素
    pub fn back(&self) -> Option<&T> {
        let (_, rear) = self.ends?;
        self.buf[rear].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_none()
    }

    pub fn is_full(&self) -> bool {
        match self.ends {
            None => self.buf.is_empty(),
            Some((front, rear)) => (rear + 1) % self.buf.len() == front,
        }
    }

    pub fn len(&self) -> usize {
        match self.ends {
            None => 0,
            Some((front, rear)) if rear >= front => rear - front + 1,
            Some((front, rear)) => self.buf.len() - front + rear + 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
