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

use crate::error::FenceError;

/// A monotonic GPU completion counter.
///
/// Each submission is tagged with the next value of a process-wide counter;
/// the device publishes a value once all work tagged with it (and everything
/// before it) has finished. The frame ring only needs two questions answered:
/// "how far has the GPU gotten" and "block until it reaches this value".
///
/// Waits are bounded. A device that stops signaling would otherwise stall the
/// application forever, so implementations must give up after `timeout` and
/// return [`FenceError::Timeout`].
pub trait DeviceFence {
    /// The highest fence value the device has confirmed complete.
    fn completed_value(&self) -> u64;

    /// Blocks until the fence reaches `value`, or until `timeout` elapses.
    fn wait(&self, value: u64, timeout: Duration) -> Result<(), FenceError>;
}
