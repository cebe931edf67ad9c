//! Live range markers that follow the text they were created over.
//!
//! A [`MarkerTable`] is owned by the buffer and updated on every structural edit, so a
//! [`MarkerId`] held elsewhere always resolves to the current position of its text. When the
//! text under a marker is deleted out from under it the marker becomes permanently invalid.
//!
//! # Update rule
//!
//! For an edit replacing `[ds, de)` with `n` chars:
//!
//! ```text
//! p < ds           -> p
//! p > de           -> p - (de - ds) + n
//! p == de, ds < de -> ds + n
//! p == ds, ds < de -> ds
//! ds < p < de      -> start: ds + n, end: ds
//! ```
//!
//! Pure insertions at a marker endpoint consult [`MarkerOptions`] to decide whether the new
//! text is absorbed. Replacing exactly a marker's range keeps it valid and makes it span the
//! replacement.
//!
//! An insertion can also name an owner with [`MarkerTable::apply_owned`]. The owner absorbs the
//! text and every other marker treats it as outside, so markers that touch at the insertion
//! point never both grow over it.

use std::ops::Range;

/// Handle to an entry in a [`MarkerTable`].
///
/// Ids are generational: once a marker is released its slot may be reused, but the stale id
/// never resolves to the new marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId {
    index: u32,
    generation: u32,
}

/// How a marker reacts to insertions exactly at its endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkerOptions {
    /// Text inserted at the marker start becomes part of the marker.
    pub greedy_left: bool,
    /// Text inserted at the marker end becomes part of the marker.
    pub greedy_right: bool,
}

impl MarkerOptions {
    /// Absorbs insertions on both sides. Used for injected fragments so typing at a fragment
    /// edge lands inside it.
    pub const GREEDY: Self = Self {
        greedy_left: true,
        greedy_right: true,
    };

    /// Never grows on boundary insertions.
    pub const FIXED: Self = Self {
        greedy_left: false,
        greedy_right: false,
    };
}

/// A single structural edit: `old_range` was replaced by `new_len` chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEdit {
    pub old_range: Range<usize>,
    pub new_len: usize,
}

impl BufferEdit {
    pub fn insert(offset: usize, new_len: usize) -> Self {
        Self {
            old_range: offset..offset,
            new_len,
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            old_range: range,
            new_len: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct MarkerEntry {
    range: Range<usize>,
    options: MarkerOptions,
    valid: bool,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entry: Option<MarkerEntry>,
}

/// Table of live markers owned by a buffer.
#[derive(Debug, Clone, Default)]
pub struct MarkerTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marker over `range`. The caller is responsible for bounds checking.
    pub fn create(&mut self, range: Range<usize>, options: MarkerOptions) -> MarkerId {
        let entry = MarkerEntry {
            range,
            options,
            valid: true,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return MarkerId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        MarkerId {
            index,
            generation: 0,
        }
    }

    /// Current range of `id`, or `None` if it was invalidated or released.
    pub fn range(&self, id: MarkerId) -> Option<Range<usize>> {
        let entry = self.entry(id)?;
        entry.valid.then(|| entry.range.clone())
    }

    pub fn is_valid(&self, id: MarkerId) -> bool {
        self.entry(id).is_some_and(|entry| entry.valid)
    }

    /// Drop the marker. Releasing an unknown or stale id is a no-op.
    pub fn release(&mut self, id: MarkerId) {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return;
        };
        if slot.generation != id.generation || slot.entry.is_none() {
            return;
        }
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    /// Number of markers that have not been released, valid or not.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move every live marker across `edit`.
    pub fn apply(&mut self, edit: &BufferEdit) {
        self.apply_inner(edit, None);
    }

    /// Move every live marker across `edit`, attributing a pure insertion to `owner` alone.
    ///
    /// Edits that remove text follow the usual rule. An unknown owner leaves every marker
    /// fixed at the insertion point.
    pub fn apply_owned(&mut self, edit: &BufferEdit, owner: MarkerId) {
        self.apply_inner(edit, Some(owner));
    }

    fn apply_inner(&mut self, edit: &BufferEdit, owner: Option<MarkerId>) {
        let insertion = edit.old_range.is_empty();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let id = MarkerId {
                index: index as u32,
                generation: slot.generation,
            };
            let Some(entry) = slot.entry.as_mut() else {
                continue;
            };
            if !entry.valid {
                continue;
            }
            let options = match owner {
                Some(owner) if insertion && owner == id => MarkerOptions::GREEDY,
                Some(_) if insertion => MarkerOptions::FIXED,
                _ => entry.options,
            };
            match adjust(&entry.range, options, edit) {
                Some(range) => entry.range = range,
                None => {
                    tracing::trace!(range = ?entry.range, edit = ?edit, "marker invalidated");
                    entry.valid = false;
                },
            }
        }
    }

    fn entry(&self, id: MarkerId) -> Option<&MarkerEntry> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }
}

fn adjust(range: &Range<usize>, options: MarkerOptions, edit: &BufferEdit) -> Option<Range<usize>> {
    let (ds, de, n) = (edit.old_range.start, edit.old_range.end, edit.new_len);
    let (s, e) = (range.start, range.end);

    let swallowed = if s < e {
        ds <= s && e <= de && (s, e) != (ds, de)
    } else {
        ds < s && s < de
    };
    if swallowed {
        return None;
    }

    let shift = |p: usize| p - de + ds + n;

    let start = if ds == de {
        match s.cmp(&ds) {
            std::cmp::Ordering::Less => s,
            std::cmp::Ordering::Greater => s + n,
            std::cmp::Ordering::Equal if options.greedy_left => s,
            std::cmp::Ordering::Equal => s + n,
        }
    } else if s <= ds {
        s
    } else if s >= de {
        shift(s)
    } else {
        ds + n
    };

    let end = if ds == de {
        match e.cmp(&ds) {
            std::cmp::Ordering::Less => e,
            std::cmp::Ordering::Greater => e + n,
            std::cmp::Ordering::Equal if options.greedy_right => e + n,
            std::cmp::Ordering::Equal => e,
        }
    } else if e <= ds {
        e
    } else if e >= de {
        shift(e)
    } else {
        ds
    };

    Some(start..end.max(start))
}
