//! Observable state container.
//!
//! Holds a value owned by a single writer (the UI event loop) and notifies
//! subscribers whenever it is replaced or mutated. Subscribers only learn that
//! a change happened; they read the value back through the owner.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Observable<T> {
    value: T,
    version: watch::Sender<u64>,
}

/// Change notifications for one [`Observable`].
#[derive(Debug, Clone)]
pub struct Subscription {
    rx: watch::Receiver<u64>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        let (version, _) = watch::channel(0);
        Self { value, version }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.notify();
        out
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.version.subscribe(),
        }
    }

    fn notify(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl Subscription {
    /// Returns true if the value changed since the last [`Subscription::mark_seen`].
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) {
        self.rx.borrow_and_update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_subscribers() {
        let mut list = Observable::new(vec![1, 2]);
        let mut sub = list.subscribe();
        assert!(!sub.has_changed());

        list.set(vec![3]);
        assert!(sub.has_changed());
        assert_eq!(list.get(), &vec![3]);

        sub.mark_seen();
        assert!(!sub.has_changed());
    }

    #[test]
    fn test_update_returns_closure_result() {
        let mut list = Observable::new(vec!["a", "b", "c"]);
        let removed = list.update(|items| items.remove(1));
        assert_eq!(removed, "b");
        assert_eq!(list.get(), &vec!["a", "c"]);
    }

    #[test]
    fn test_late_subscriber_starts_from_current_value() {
        let mut value = Observable::new(0);
        value.set(1);
        value.set(2);

        let sub = value.subscribe();
        assert!(!sub.has_changed());

        value.update(|v| *v += 1);
        assert!(sub.has_changed());
        assert_eq!(*value.get(), 3);
    }

    #[test]
    fn test_every_subscriber_is_notified() {
        let mut list = Observable::new(Vec::<u8>::new());
        let mut first = list.subscribe();
        let second = first.clone();

        list.set(vec![1]);
        first.mark_seen();
        assert!(!first.has_changed());
        assert!(second.has_changed());
    }
}
