/// A per-phase list whose entries are allocated on first access.
///
/// Phases that never receive a contribution cost nothing until the list is
/// converted with [`into_fields`](Self::into_fields), which fills them with
/// zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyFieldList<T> {
    slots: Vec<Option<T>>,
}

impl<T> LazyFieldList<T> {
    /// Creates a list of `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the entry at `index` if it has been allocated.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the entry at `index`, allocating it with `init` if absent.
    ///
    /// Once allocated, the same entry is returned on every later call.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get_or_insert_with(&mut self, index: usize, init: impl FnOnce() -> T) -> &mut T {
        self.slots[index].get_or_insert_with(init)
    }

    /// Converts the list into one entry per slot, filling empty slots with `zero`.
    pub fn into_fields(self, zero: impl Fn() -> T) -> Vec<T> {
        self.slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(&zero))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_each_slot_once() {
        let mut list = LazyFieldList::new(3);
        let mut allocations = 0;

        let first: *const Vec<f64> = list.get_or_insert_with(1, || {
            allocations += 1;
            vec![0.0; 4]
        });
        let second: *const Vec<f64> = list.get_or_insert_with(1, || {
            allocations += 1;
            vec![1.0; 4]
        });

        assert_eq!(allocations, 1);
        assert!(std::ptr::eq(first, second));
        assert!(list.get(0).is_none());
        assert_eq!(list.get(1), Some(&vec![0.0; 4]));
    }

    #[test]
    fn fills_untouched_slots() {
        let mut list = LazyFieldList::new(3);
        list.get_or_insert_with(2, || vec![5.0]).push(6.0);

        assert_eq!(list.into_fields(Vec::new), [vec![], vec![], vec![5.0, 6.0]]);
    }
}
