use std::rc::Rc;

/// Registration-ordered callback list.
///
/// Callbacks are identified by allocation (`Rc::ptr_eq`), so adding the same
/// `Rc` twice is a no-op. Delivery runs from the newest registration to the
/// oldest.
pub struct ListenerList<F: ?Sized> {
    entries: Vec<Rc<F>>,
}

impl<F: ?Sized> Default for ListenerList<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: ?Sized> std::fmt::Debug for ListenerList<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<F: ?Sized> ListenerList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the listener was already registered.
    pub fn add(&mut self, listener: Rc<F>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.entries.push(listener);
        true
    }

    /// Returns false when the listener was not registered.
    pub fn remove(&mut self, listener: &Rc<F>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| !Rc::ptr_eq(l, listener));
        self.entries.len() != before
    }

    pub fn contains(&self, listener: &Rc<F>) -> bool {
        self.entries.iter().any(|l| Rc::ptr_eq(l, listener))
    }

    /// Snapshot in delivery order, newest first.
    pub fn delivery_order(&self) -> Vec<Rc<F>> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ListenerList;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Callback = dyn Fn(&mut Vec<&'static str>);

    #[test]
    fn delivers_newest_first() {
        let mut list: ListenerList<Callback> = ListenerList::new();
        list.add(Rc::new(|log: &mut Vec<&'static str>| log.push("first")));
        list.add(Rc::new(|log: &mut Vec<&'static str>| log.push("second")));

        let mut log = Vec::new();
        for l in list.delivery_order() {
            l(&mut log);
        }
        assert_eq!(log, vec!["second", "first"]);
    }

    #[test]
    fn duplicate_add_and_remove_use_identity() {
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let listener: Rc<dyn Fn()> = Rc::new(move || *counter.borrow_mut() += 1);
        let mut list: ListenerList<dyn Fn()> = ListenerList::new();

        assert!(list.add(listener.clone()));
        assert!(!list.add(listener.clone()));
        assert_eq!(list.len(), 1);
        for l in list.delivery_order() {
            l();
        }
        assert_eq!(*hits.borrow(), 1);

        assert!(list.remove(&listener));
        assert!(!list.remove(&listener));
        assert!(list.is_empty());
    }
}
