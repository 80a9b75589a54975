//! Sliding window: a FIFO of the last `win_size` emitted symbols. Aging a
//! symbol out of the window is the trigger for decrementing its count in
//! the owning symbol table (§4.C).

use super::ring_buffer::RingBuffer;

const DEFAULT_WIN_SIZE: usize = 2048;

pub struct Window {
    buf: RingBuffer<u16>,
    capacity: usize,
    filled: bool,
    stored: usize,
}

impl Window {
    /// `win_size < 0` disables the window (monotonic counts). `win_size
    /// == 0` selects the default capacity. `win_size > 0` is used as-is.
    pub fn new(win_size: i64) -> Option<Self> {
        if win_size < 0 {
            return None;
        }
        let capacity = if win_size == 0 { DEFAULT_WIN_SIZE } else { win_size as usize };
        Some(Self { buf: RingBuffer::create(0, capacity), capacity, filled: false, stored: 0 })
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// The value currently at the cursor: the symbol about to be evicted
    /// by the next `store`, meaningful only once `is_filled()`.
    pub fn peek(&self) -> u16 {
        self.buf.get(0)
    }

    pub fn store(&mut self, value: u16) {
        self.buf.set(0, value);
        self.buf.advance();
        self.stored += 1;
        if self.stored >= self.capacity {
            self.filled = true;
        }
    }
}
