// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use super::fence::DeviceFence;
use super::resource::FrameResource;
use super::FRAMES_IN_FLIGHT;
use crate::error::FenceError;

/// The rotation of [`FrameResource`]s the renderer cycles through.
///
/// Frame loop contract:
///
/// 1. [`acquire_next`](FrameRing::acquire_next) at the top of the frame. It
///    advances the ring index and, if the GPU is still consuming the new
///    slot, blocks until the slot's recorded fence value completes. This is
///    the only blocking point in the system.
/// 2. Fill the returned resource and record/submit GPU work from it.
/// 3. [`record_completion`](FrameRing::record_completion) with the fence
///    value tagged onto that submission.
#[derive(Debug)]
pub struct FrameRing {
    frames: Vec<FrameResource>,
    current: usize,
}

impl FrameRing {
    /// Builds a ring of [`FRAMES_IN_FLIGHT`] resources.
    pub fn new(object_capacity: usize, material_capacity: usize) -> Self {
        Self::with_depth(FRAMES_IN_FLIGHT, object_capacity, material_capacity)
    }

    /// Builds a ring of `depth` resources. Any depth >= 1 works; deeper
    /// rings trade memory for CPU/GPU slack.
    pub fn with_depth(depth: usize, object_capacity: usize, material_capacity: usize) -> Self {
        assert!(depth >= 1, "frame ring needs at least one resource");
        let frames = (0..depth)
            .map(|_| FrameResource::new(object_capacity, material_capacity))
            .collect();
        Self { frames, current: 0 }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Rotates to the next slot and ensures the GPU is done with it.
    ///
    /// A fence value of 0 means the slot was never submitted, so it is free
    /// by definition. Otherwise the wait is skipped when the completed
    /// counter has already passed the recorded value.
    ///
    /// # Errors
    ///
    /// Propagates [`FenceError::Timeout`] when the device fails to reach the
    /// slot's fence value within `timeout`.
    pub fn acquire_next(
        &mut self,
        fence: &dyn DeviceFence,
        timeout: Duration,
    ) -> Result<&mut FrameResource, FenceError> {
        self.current = (self.current + 1) % self.frames.len();
        let frame = &mut self.frames[self.current];

        if frame.fence_value != 0 && fence.completed_value() < frame.fence_value {
            log::trace!(
                "Frame ring: slot {} still in flight (fence {}), waiting",
                self.current,
                frame.fence_value
            );
            fence.wait(frame.fence_value, timeout)?;
        }

        Ok(frame)
    }

    /// The resource selected by the last [`acquire_next`](Self::acquire_next).
    pub fn current_frame(&mut self) -> &mut FrameResource {
        &mut self.frames[self.current]
    }

    /// Tags the current slot with the fence value of the submission that
    /// just consumed it.
    pub fn record_completion(&mut self, fence_value: u64) {
        debug_assert!(
            fence_value > self.frames[self.current].fence_value,
            "fence values must increase monotonically"
        );
        self.frames[self.current].fence_value = fence_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// A fence whose completed value only moves when the test says so. Waits
    /// are recorded, then satisfied by jumping the counter to the awaited
    /// value, mimicking a GPU that finishes on demand.
    struct ScriptedFence {
        completed: Cell<u64>,
        waits: RefCell<Vec<u64>>,
    }

    impl ScriptedFence {
        fn new() -> Self {
            Self {
                completed: Cell::new(0),
                waits: RefCell::new(Vec::new()),
            }
        }
    }

    impl DeviceFence for ScriptedFence {
        fn completed_value(&self) -> u64 {
            self.completed.get()
        }

        fn wait(&self, value: u64, _timeout: Duration) -> Result<(), FenceError> {
            self.waits.borrow_mut().push(value);
            self.completed.set(self.completed.get().max(value));
            Ok(())
        }
    }

    /// A fence that never advances.
    struct StuckFence;

    impl DeviceFence for StuckFence {
        fn completed_value(&self) -> u64 {
            0
        }

        fn wait(&self, value: u64, timeout: Duration) -> Result<(), FenceError> {
            Err(FenceError::Timeout { value, timeout })
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_ring_index_is_periodic() {
        for depth in 1..=4 {
            let mut ring = FrameRing::with_depth(depth, 1, 1);
            let fence = ScriptedFence::new();
            let mut indices = Vec::new();
            for _ in 0..2 * depth {
                ring.acquire_next(&fence, TIMEOUT).unwrap();
                indices.push(ring.current_index());
            }
            // The sequence repeats with period `depth`.
            for i in 0..depth {
                assert_eq!(indices[i], indices[i + depth]);
            }
            assert!(fence.waits.borrow().is_empty(), "no submissions, no waits");
        }
    }

    #[test]
    fn test_never_submitted_slot_is_free() {
        let mut ring = FrameRing::new(1, 1);
        let fence = ScriptedFence::new();
        for _ in 0..10 {
            let frame = ring.acquire_next(&fence, TIMEOUT).unwrap();
            assert_eq!(frame.fence_value, 0);
        }
        assert!(fence.waits.borrow().is_empty());
    }

    #[test]
    fn test_frame_four_blocks_on_frame_one() {
        // Fence counter starts at 0; with a depth-3 ring, submitting frames
        // 1..5 forces frame 4 to wait on frame 1's slot (fence value 1) and
        // frame 5 on frame 2's slot (value 2).
        let mut ring = FrameRing::new(1, 1);
        let fence = ScriptedFence::new();

        for frame_number in 1u64..=5 {
            ring.acquire_next(&fence, TIMEOUT).unwrap();
            ring.record_completion(frame_number);
        }

        assert_eq!(*fence.waits.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_no_wait_when_gpu_keeps_up() {
        let mut ring = FrameRing::new(1, 1);
        let fence = ScriptedFence::new();

        for frame_number in 1u64..=10 {
            // GPU finishes each frame before the ring wraps back to it.
            fence.completed.set(frame_number.saturating_sub(1));
            ring.acquire_next(&fence, TIMEOUT).unwrap();
            ring.record_completion(frame_number);
        }

        assert!(fence.waits.borrow().is_empty());
    }

    #[test]
    fn test_timeout_propagates() {
        let mut ring = FrameRing::new(1, 1);

        // Wrap the ring once with recorded submissions against a dead device.
        for frame_number in 1u64..=3 {
            ring.acquire_next(&ScriptedFence::new(), TIMEOUT).unwrap();
            ring.record_completion(frame_number);
        }

        let err = ring.acquire_next(&StuckFence, TIMEOUT).unwrap_err();
        assert!(matches!(err, FenceError::Timeout { value: 1, .. }));
    }

    #[test]
    fn test_acquired_frame_keeps_slot_contents() {
        let mut ring = FrameRing::new(2, 1);
        let fence = ScriptedFence::new();

        {
            let frame = ring.acquire_next(&fence, TIMEOUT).unwrap();
            frame.pass.total_time = 1.5;
            ring.record_completion(1);
        }
        // Cycle all the way around; slot contents persist across reuse.
        for n in 2u64..=3 {
            ring.acquire_next(&fence, TIMEOUT).unwrap();
            ring.record_completion(n);
        }
        let frame = ring.acquire_next(&fence, TIMEOUT).unwrap();
        assert_eq!(frame.pass.total_time, 1.5);
        assert_eq!(frame.fence_value, 1);
    }
}
