use std::cmp::min;
use std::ops::{Index, IndexMut};

/// Slot arena for diagram nodes.
///
/// Values are addressed by the index returned from [`Storage::add`]. A dropped
/// slot is vacant until the next allocation reuses it; indices of live values
/// never move.
#[derive(Debug, Clone)]
pub struct Storage<T> {
    data: Vec<Option<T>>,

    /// Index of the first *possibly* free (non-occupied) cell.
    min_free: usize,
    /// Number of occupied cells.
    real_size: usize,
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Storage<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            min_free: 0,
            real_size: 0,
        }
    }

    /// Number of cells ever allocated, occupied or not.
    pub fn size(&self) -> usize {
        self.data.len()
    }
    /// Number of occupied cells.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    /// Check if the cell at the given index is occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.data.get(index), Some(Some(_)))
    }

    /// Get the reference to the value at the given index, if occupied.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index).and_then(Option::as_ref)
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("Index {} is not occupied", index),
        }
    }
    /// Get the mutable reference to the value at the given index.
    pub fn value_mut(&mut self, index: usize) -> &mut T {
        match self.data.get_mut(index).and_then(Option::as_mut) {
            Some(value) => value,
            None => panic!("Index {} is not occupied", index),
        }
    }

    /// Add a new value and return its index.
    pub fn add(&mut self, value: T) -> usize {
        let index = (self.min_free..self.data.len())
            .find(|&i| self.data[i].is_none())
            .unwrap_or(self.data.len());

        if index == self.data.len() {
            self.data.push(Some(value));
        } else {
            self.data[index] = Some(value);
        }
        self.min_free = index + 1;
        self.real_size += 1;

        index
    }

    /// Drop the value at the given index, returning it.
    pub fn drop(&mut self, index: usize) -> Option<T> {
        let value = self.data.get_mut(index)?.take()?;
        self.min_free = min(self.min_free, index);
        self.real_size -= 1;
        Some(value)
    }
}

impl<T> Index<usize> for Storage<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

impl<T> IndexMut<usize> for Storage<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.value_mut(index)
    }
}
