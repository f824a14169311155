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

use bytemuck::Pod;

use crate::error::UploadError;

/// A fixed-capacity staging array of GPU-bound elements.
///
/// Each [`FrameResource`](super::FrameResource) owns one of these per
/// constant family (objects, materials). The CPU writes individual slots as
/// items go dirty; the renderer then ships the whole array to the slot's GPU
/// buffer in one `write_buffer` call.
///
/// Slot writes are bounds-checked. A scene handing out more slots than the
/// buffer holds is a construction bug and surfaces as
/// [`UploadError::SlotOutOfRange`] instead of silent corruption.
#[derive(Debug)]
pub struct UploadBuffer<T: Pod> {
    label: &'static str,
    elements: Vec<T>,
}

impl<T: Pod> UploadBuffer<T> {
    /// Allocates `capacity` zeroed slots.
    pub fn new(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            elements: vec![T::zeroed(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Overwrites one slot.
    pub fn write(&mut self, slot: usize, value: T) -> Result<(), UploadError> {
        match self.elements.get_mut(slot) {
            Some(element) => {
                *element = value;
                Ok(())
            }
            None => Err(UploadError::SlotOutOfRange {
                label: self.label,
                slot,
                capacity: self.elements.len(),
            }),
        }
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.elements.get(slot)
    }

    /// The whole staging array, ready for a single GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.elements)
    }

    /// Byte size of one element, which is also the stride between slots.
    pub fn element_size() -> usize {
        std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let mut buffer: UploadBuffer<[f32; 4]> = UploadBuffer::new("test", 4);
        buffer.write(2, [1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(buffer.get(2), Some(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(buffer.get(0), Some(&[0.0; 4]));
    }

    #[test]
    fn test_out_of_range_slot_is_rejected() {
        let mut buffer: UploadBuffer<u32> = UploadBuffer::new("test", 3);
        let err = buffer.write(3, 7).unwrap_err();
        assert_eq!(
            err,
            UploadError::SlotOutOfRange {
                label: "test",
                slot: 3,
                capacity: 3,
            }
        );
    }

    #[test]
    fn test_bytes_cover_every_slot() {
        let buffer: UploadBuffer<[u32; 2]> = UploadBuffer::new("test", 5);
        assert_eq!(buffer.as_bytes().len(), 5 * UploadBuffer::<[u32; 2]>::element_size());
    }
}
