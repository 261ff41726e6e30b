//! Keyed load-state cache with request de-duplication.
//!
//! Loads are started by the caller that first requests a key; everyone who
//! asks while it is in flight is parked as a waiter and notified once
//! [`ResourceCache::resolve`] is called. Single-threaded: waiters run inside
//! `resolve` on the caller's stack.

use fnv::FnvHashMap;
use std::hash::Hash;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<H, E> {
    Pending,
    Ready(H),
    Failed(E),
}

impl<H, E> LoadState<H, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&H> {
        match self {
            LoadState::Ready(h) => Some(h),
            _ => None,
        }
    }

    pub fn failed(&self) -> Option<&E> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

type Waiter<H, E> = Box<dyn FnOnce(Result<&H, &E>)>;

struct Entry<H, E> {
    state: LoadState<H, E>,
    waiters: Vec<Waiter<H, E>>,
}

pub struct ResourceCache<K, H, E> {
    entries: FnvHashMap<K, Entry<H, E>>,
}

impl<K, H, E> Default for ResourceCache<K, H, E>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: FnvHashMap::default(),
        }
    }
}

impl<K, H, E> ResourceCache<K, H, E>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `key`. Returns `true` when the caller must start the load.
    ///
    /// Ready and failed entries answer `on_done` immediately; pending ones
    /// queue it behind the in-flight load.
    pub fn request(&mut self, key: K, on_done: impl FnOnce(Result<&H, &E>) + 'static) -> bool {
        if let Some(entry) = self.entries.get_mut(&key) {
            match &entry.state {
                LoadState::Pending => entry.waiters.push(Box::new(on_done)),
                LoadState::Ready(h) => on_done(Ok(h)),
                LoadState::Failed(e) => on_done(Err(e)),
            }
            return false;
        }
        self.entries.insert(
            key,
            Entry {
                state: LoadState::Pending,
                waiters: vec![Box::new(on_done)],
            },
        );
        true
    }

    /// Complete an in-flight load. Returns how many waiters were notified.
    ///
    /// Resolving an unknown key records the result anyway so later requests
    /// see it.
    pub fn resolve(&mut self, key: &K, result: Result<H, E>) -> usize {
        let state = match result {
            Ok(h) => LoadState::Ready(h),
            Err(e) => LoadState::Failed(e),
        };
        let entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
            state: LoadState::Pending,
            waiters: Vec::new(),
        });
        let waiters = std::mem::take(&mut entry.waiters);
        entry.state = state;
        let notified = waiters.len();
        for waiter in waiters {
            match &entry.state {
                LoadState::Ready(h) => waiter(Ok(h)),
                LoadState::Failed(e) => waiter(Err(e)),
                LoadState::Pending => {}
            }
        }
        notified
    }

    pub fn state(&self, key: &K) -> Option<&LoadState<H, E>> {
        self.entries.get(key).map(|e| &e.state)
    }

    pub fn get(&self, key: &K) -> Option<&H> {
        self.state(key).and_then(LoadState::ready)
    }

    /// Forget a settled entry so the next request reloads it. Pending entries
    /// are kept, their waiters are still owed an answer.
    pub fn evict(&mut self, key: &K) -> bool {
        match self.entries.get(key) {
            Some(entry) if !entry.state.is_pending() => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
