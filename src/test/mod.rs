mod observer;
mod ring_queue;
mod slot_pool;
