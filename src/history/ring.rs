// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Fixed-capacity circular buffer over logical indices `0..len`.
///
/// Logical index 0 is the oldest entry. All wrap-around arithmetic lives
/// here; callers only ever see logical positions. Capacity must be non-zero.
#[derive(Debug)]
pub(crate) struct Ring<T> {
    slots: Vec<Option<T>>,
    start: usize,
    len: usize,
}

impl<T> Ring<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            start: 0,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    fn slot_index(&self, logical: usize) -> usize {
        (self.start + logical) % self.slots.len()
    }

    pub(crate) fn get(&self, logical: usize) -> Option<&T> {
        if logical >= self.len {
            return None;
        }
        self.slots[self.slot_index(logical)].as_ref()
    }

    /// Appends at the logical tail. When full, the oldest entry is evicted
    /// and returned; every surviving entry shifts down one logical index.
    pub(crate) fn push_back(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            let evicted = self.slots[self.start].replace(value);
            self.start = (self.start + 1) % self.slots.len();
            return evicted;
        }
        let index = self.slot_index(self.len);
        self.slots[index] = Some(value);
        self.len += 1;
        None
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = self.slot_index(self.len - 1);
        self.len -= 1;
        self.slots[index].take()
    }

    /// Drops the logical tail `[new_len, len)`. Never grows.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        for logical in new_len..self.len {
            let index = self.slot_index(logical);
            self.slots[index] = None;
        }
        self.len = self.len.min(new_len);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(move |logical| self.get(logical))
    }
}
