//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Session admission
//!
//! A fixed pool of slots gates how many sessions run at once. A connection
//! either takes a slot immediately or is turned away; nothing ever queues.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Non-blocking admission controller backed by a semaphore
#[derive(Debug, Clone)]
pub struct SessionAdmission {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl SessionAdmission {
    /// Create a controller with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Take a slot if one is free right now
    pub fn try_acquire(&self) -> Option<SessionSlot> {
        self.semaphore
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| SessionSlot { _permit: permit })
    }

    /// Number of free slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// An admitted session's slot, returned to the pool when dropped
///
/// Dropping is the only way to release a slot, so every exit path of a
/// connection task releases it exactly once.
#[derive(Debug)]
pub struct SessionSlot {
    _permit: OwnedSemaphorePermit,
}
