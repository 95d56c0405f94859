//! Handle table and consumption tracking.
//!
//! [`ObjectMap`] is the handle → file offset index handed to the decoder,
//! already parsed from the file's object map section. It is never mutated
//! during a decode.
//!
//! [`ObjectTracker`] pairs the map with the set of handles a session has
//! already decoded. `take` hands out each location once; later calls for
//! the same handle see `None`.

use std::collections::BTreeMap;

use ahash::AHashSet;

use crate::types::Handle;

/// Where one record lives in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLocation {
    pub handle: Handle,
    /// Byte offset of the record's MS size prefix.
    pub offset: u64,
}

/// Ordered handle → location index.
#[derive(Debug, Clone, Default)]
pub struct ObjectMap {
    entries: BTreeMap<Handle, ObjectLocation>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `handle` at `offset`, replacing any previous location.
    pub fn insert(&mut self, handle: Handle, offset: u64) {
        self.entries.insert(handle, ObjectLocation { handle, offset });
    }

    pub fn get(&self, handle: Handle) -> Option<ObjectLocation> {
        self.entries.get(&handle).copied()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locations in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectLocation> {
        self.entries.values()
    }
}

impl FromIterator<(Handle, u64)> for ObjectMap {
    fn from_iter<T: IntoIterator<Item = (Handle, u64)>>(iter: T) -> Self {
        let mut map = ObjectMap::new();
        for (handle, offset) in iter {
            map.insert(handle, offset);
        }
        map
    }
}

/// Take-once view over an [`ObjectMap`].
#[derive(Debug)]
pub struct ObjectTracker<'a> {
    map: &'a ObjectMap,
    consumed: AHashSet<Handle>,
}

impl<'a> ObjectTracker<'a> {
    pub fn new(map: &'a ObjectMap) -> Self {
        Self {
            map,
            consumed: AHashSet::with_capacity(map.len()),
        }
    }

    /// Location of `handle`, marking it consumed.
    ///
    /// Returns `None` when the handle is unknown or was already taken.
    pub fn take(&mut self, handle: Handle) -> Option<ObjectLocation> {
        let location = self.map.get(handle)?;
        if self.consumed.insert(handle) {
            Some(location)
        } else {
            None
        }
    }

    /// Location of `handle` without consuming it.
    pub fn peek(&self, handle: Handle) -> Option<ObjectLocation> {
        if self.consumed.contains(&handle) {
            return None;
        }
        self.map.get(handle)
    }

    pub fn is_consumed(&self, handle: Handle) -> bool {
        self.consumed.contains(&handle)
    }

    /// Mark `handle` consumed without decoding it. Returns `true` if it was
    /// present and not yet consumed.
    pub fn mark_consumed(&mut self, handle: Handle) -> bool {
        self.map.contains(handle) && self.consumed.insert(handle)
    }

    /// Snapshot of the handles not yet consumed, ascending.
    pub fn remaining(&self) -> Vec<Handle> {
        self.map
            .iter()
            .map(|loc| loc.handle)
            .filter(|h| !self.consumed.contains(h))
            .collect()
    }

    pub fn remaining_count(&self) -> usize {
        self.map.len() - self.consumed.len()
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> ObjectMap {
        [(Handle::new(0x10), 100), (Handle::new(0x2), 20), (Handle::new(0x7), 70)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_take_once() {
        let map = sample_map();
        let mut tracker = ObjectTracker::new(&map);
        let loc = tracker.take(Handle::new(0x7));
        assert_eq!(
            loc,
            Some(ObjectLocation {
                handle: Handle::new(0x7),
                offset: 70
            })
        );
        assert_eq!(tracker.take(Handle::new(0x7)), None);
        assert!(tracker.is_consumed(Handle::new(0x7)));
        // The map itself is unchanged
        assert!(map.contains(Handle::new(0x7)));
    }

    #[test]
    fn test_take_unknown() {
        let map = sample_map();
        let mut tracker = ObjectTracker::new(&map);
        assert_eq!(tracker.take(Handle::new(0x99)), None);
        assert!(!tracker.mark_consumed(Handle::new(0x99)));
        assert_eq!(tracker.consumed_count(), 0);
    }

    #[test]
    fn test_remaining_is_ascending_snapshot() {
        let map = sample_map();
        let mut tracker = ObjectTracker::new(&map);
        assert!(tracker.mark_consumed(Handle::new(0x2)));
        assert!(!tracker.mark_consumed(Handle::new(0x2)));
        assert_eq!(tracker.remaining(), vec![Handle::new(0x7), Handle::new(0x10)]);
        assert_eq!(tracker.remaining_count(), 2);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let map = sample_map();
        let mut tracker = ObjectTracker::new(&map);
        assert!(tracker.peek(Handle::new(0x10)).is_some());
        assert!(tracker.take(Handle::new(0x10)).is_some());
        assert!(tracker.peek(Handle::new(0x10)).is_none());
    }
}
