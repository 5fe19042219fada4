use crate::handles::Handle;

/// Append-only arena. Handles stay valid for the lifetime of the arena and
/// iterate in allocation order.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena { items: Vec::new() }
    }

    pub fn alloc(&mut self, v: T) -> Handle {
        self.items.push(v);
        Handle::new((self.items.len() - 1) as u32)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.items.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.items.get_mut(handle.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + use<T> {
        (0..self.items.len() as u32).map(Handle::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, v)| (Handle::new(i as u32), v))
    }
}
