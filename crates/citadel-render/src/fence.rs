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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use citadel_core::error::FenceError;
use citadel_core::frame::DeviceFence;

/// A monotonic completion counter over `wgpu` submissions.
///
/// `wgpu` has no user-visible fence object, but
/// [`Queue::on_submitted_work_done`](wgpu::Queue::on_submitted_work_done)
/// fires its callback once everything submitted before the call has drained
/// on the GPU. [`signal`](SubmissionFence::signal) registers a callback that
/// publishes the tagged value into a shared atomic; waiting is a poll loop
/// against that atomic with a hard deadline.
#[derive(Debug)]
pub struct SubmissionFence {
    device: wgpu::Device,
    completed: Arc<AtomicU64>,
    next_value: u64,
}

impl SubmissionFence {
    pub fn new(device: wgpu::Device) -> Self {
        Self {
            device,
            completed: Arc::new(AtomicU64::new(0)),
            next_value: 0,
        }
    }

    /// Tags all work submitted so far with the next fence value and returns
    /// it. Call immediately after `queue.submit`.
    pub fn signal(&mut self, queue: &wgpu::Queue) -> u64 {
        self.next_value += 1;
        let value = self.next_value;
        let completed = Arc::clone(&self.completed);
        queue.on_submitted_work_done(move || {
            // Callbacks complete in submission order, but fetch_max keeps the
            // counter monotonic even if the backend reorders delivery.
            completed.fetch_max(value, Ordering::Release);
        });
        value
    }

    /// The most recently signaled value.
    pub fn last_signaled(&self) -> u64 {
        self.next_value
    }
}

impl DeviceFence for SubmissionFence {
    fn completed_value(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    fn wait(&self, value: u64, timeout: Duration) -> Result<(), FenceError> {
        let deadline = Instant::now() + timeout;
        while self.completed_value() < value {
            // Drive the device so queued callbacks can fire.
            if let Err(e) = self.device.poll(wgpu::PollType::Poll) {
                return Err(FenceError::Device(format!("device poll failed: {e}")));
            }
            if self.completed_value() >= value {
                break;
            }
            if Instant::now() >= deadline {
                return Err(FenceError::Timeout { value, timeout });
            }
            std::thread::yield_now();
        }
        Ok(())
    }
}
