/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::collections::VecDeque;

/// make sure a VecDeque used as a ringbuffer with at most `max_len` elements has space for an additional element.
/// Returns the evicted (oldest) element, if any.
/// Note we can't use `VecDeque::capacity()` as the bound since the allocator is free to give us more
#[inline]
pub fn ensure_ringbuffer_space<T> (v: &mut VecDeque<T>, max_len: usize) -> Option<T> {
    if max_len > 0 && v.len() >= max_len {
        v.pop_front()
    } else {
        None
    }
}

/// push a new element to the end of a VecDeque used as a ringbuffer (i.e. in bounded space)
#[inline]
pub fn push_to_ringbuffer<T> (v: &mut VecDeque<T>, max_len: usize, t: T) -> Option<T> {
    let evicted = ensure_ringbuffer_space(v, max_len);
    v.push_back(t);
    evicted
}

/// a FIFO with a fixed upper bound - once full, each push evicts the oldest element
#[derive(Debug,Clone)]
pub struct RingBuffer<T> {
    max_len: usize,
    items: VecDeque<T>
}

impl<T> RingBuffer<T> {
    /// a `max_len` of 0 is treated as 1 - an empty bound would make every push a no-op
    pub fn new (max_len: usize) -> Self {
        let max_len = max_len.max(1);
        RingBuffer { max_len, items: VecDeque::with_capacity(max_len) }
    }

    pub fn push (&mut self, t: T) -> Option<T> {
        push_to_ringbuffer( &mut self.items, self.max_len, t)
    }

    #[inline] pub fn len (&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty (&self) -> bool { self.items.is_empty() }
    #[inline] pub fn max_len (&self) -> usize { self.max_len }
    #[inline] pub fn is_full (&self) -> bool { self.items.len() == self.max_len }

    pub fn clear (&mut self) { self.items.clear() }

    pub fn iter (&self) -> impl Iterator<Item=&T> { self.items.iter() }

    pub fn back (&self) -> Option<&T> { self.items.back() }
    pub fn front (&self) -> Option<&T> { self.items.front() }
}

impl<T: Clone> RingBuffer<T> {
    /// oldest first
    pub fn to_vec (&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
