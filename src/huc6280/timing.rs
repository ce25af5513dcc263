//! Deferred register writes and frame timing
//!
//! Writes made during a frame are logged with their cycle offset from the
//! frame origin and replayed while the frame's audio is synthesized.

use std::collections::VecDeque;

/// Typical upper bound on writes per frame; the queue grows past it if needed
const QUEUE_CAPACITY: usize = 256;

/// A register write waiting to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedCommand {
    /// Register index (only the low nibble is decoded)
    pub register: u8,
    /// Value written
    pub value: u8,
    /// Cycles since the frame origin
    pub time: u64,
}

/// FIFO of writes recorded during the current frame
#[derive(Debug, Clone)]
pub struct CommandQueue {
    commands: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            commands: VecDeque::with_capacity(QUEUE_CAPACITY),
        }
    }

    /// Append a write
    pub fn push(&mut self, command: QueuedCommand) {
        self.commands.push_back(command);
    }

    /// Take the oldest write
    pub fn pop(&mut self) -> Option<QueuedCommand> {
        self.commands.pop_front()
    }

    /// Number of writes still pending
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no writes are pending
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every pending write
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Pending writes in issue order
    pub fn iter(&self) -> impl Iterator<Item = &QueuedCommand> {
        self.commands.iter()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycle bounds of the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameWindow {
    /// Cycle recorded by `begin_frame`
    pub start: u64,
    /// Cycle recorded by `end_frame`
    pub stop: u64,
}

impl FrameWindow {
    /// Offset of `cycle` from the frame origin
    pub fn offset_of(&self, cycle: u64) -> u64 {
        cycle.saturating_sub(self.start)
    }

    /// Frame length in cycles, never less than 1
    pub fn elapsed(&self) -> u64 {
        if self.stop <= self.start {
            log::warn!(
                "PSG frame length is not positive (start {}, stop {}); using 1 cycle",
                self.start,
                self.stop
            );
            1
        } else {
            self.stop - self.start
        }
    }

    /// Buffer index at which a write made `time` cycles into the frame takes effect
    ///
    /// Proportional position rounded down to a stereo pair boundary, never
    /// before `floor` and never past `len`.
    pub fn sample_position(&self, time: u64, len: usize, floor: usize) -> usize {
        let elapsed = u128::from(self.elapsed());
        let raw = (u128::from(time) * len as u128 / elapsed) as usize & !1;
        let limit = len & !1;
        if raw > limit {
            log::warn!("PSG write at cycle offset {time} lands past frame end; applied at end");
        }
        raw.clamp(floor, limit.max(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = CommandQueue::new();
        queue.push(QueuedCommand { register: 0, value: 1, time: 5 });
        queue.push(QueuedCommand { register: 2, value: 3, time: 9 });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|c| c.value), Some(1));
        assert_eq!(queue.pop().map(|c| c.value), Some(3));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sample_position_rounds_to_pair() {
        let window = FrameWindow { start: 1000, stop: 2000 };
        // 333 / 1000 * 100 = 33.3 -> 33 -> 32
        assert_eq!(window.sample_position(333, 100, 0), 32);
        assert_eq!(window.sample_position(500, 100, 0), 50);
        assert_eq!(window.sample_position(0, 100, 0), 0);
        assert_eq!(window.sample_position(1000, 100, 0), 100);
    }

    #[test]
    fn test_sample_position_clamped() {
        let window = FrameWindow { start: 0, stop: 100 };
        assert_eq!(window.sample_position(250, 100, 0), 100);
        assert_eq!(window.sample_position(10, 100, 40), 40);
    }

    #[test]
    fn test_zero_length_frame_guarded() {
        let window = FrameWindow { start: 500, stop: 500 };
        assert_eq!(window.elapsed(), 1);
        assert_eq!(window.sample_position(0, 64, 0), 0);
        assert_eq!(window.sample_position(1, 64, 0), 64);
    }

    #[test]
    fn test_offset_of() {
        let window = FrameWindow { start: 100, stop: 0 };
        assert_eq!(window.offset_of(150), 50);
        assert_eq!(window.offset_of(50), 0);
    }
}
