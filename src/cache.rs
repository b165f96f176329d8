//! Bounded template cache.
//!
//! Parsed templates are memoized by normalized text and shared between
//! invocations as `Arc<Statement>`. Entries are read-only: callers clone the
//! statement before rewriting it. The cache tolerates racing misses — both
//! sides parse the same pure function of the text and the last write wins.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ast::Statement;

/// Called with the evicted key after an entry is dropped at capacity.
pub type EvictionListener = Box<dyn Fn(&str) + Send + Sync>;

pub struct TemplateCache {
    inner: Mutex<Inner>,
    capacity: usize,
    log_evictions: bool,
    on_evict: Option<EvictionListener>,
}

struct Inner {
    map: HashMap<String, Arc<Statement>>,
    /// Least-recently-used key at the front.
    order: VecDeque<String>,
}

impl TemplateCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
            log_evictions: false,
            on_evict: None,
        }
    }

    pub fn with_eviction_logging(mut self, enabled: bool) -> Self {
        self.log_evictions = enabled;
        self
    }

    pub fn with_eviction_listener(mut self, listener: EvictionListener) -> Self {
        self.on_evict = Some(listener);
        self
    }

    /// Shared handle to a cached template, touching its recency.
    pub fn get(&self, key: &str) -> Option<Arc<Statement>> {
        let mut inner = self.lock();
        let hit = inner.map.get(key).cloned();
        if hit.is_some() {
            touch(&mut inner.order, key);
        }
        hit
    }

    /// Insert a parsed template and return the shared handle.
    pub fn put(&self, key: impl Into<String>, statement: Statement) -> Arc<Statement> {
        let key = key.into();
        let shared = Arc::new(statement);

        let evicted = {
            let mut inner = self.lock();
            let mut evicted = None;
            if !inner.map.contains_key(&key) && inner.map.len() >= self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.map.remove(&oldest);
                    evicted = Some(oldest);
                }
            }
            inner.map.insert(key.clone(), Arc::clone(&shared));
            touch(&mut inner.order, &key);
            evicted
        };

        if let Some(oldest) = evicted {
            if self.log_evictions {
                log::debug!("cache: template [{}] evicted at capacity {}", oldest, self.capacity);
            }
            if let Some(listener) = &self.on_evict {
                listener(&oldest);
            }
        }

        shared
    }

    pub fn invalidate(&self, key: &str) {
        let mut inner = self.lock();
        inner.map.remove(key);
        inner.order.retain(|k| k != key);
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn touch(order: &mut VecDeque<String>, key: &str) {
    if let Some(pos) = order.iter().position(|k| k == key) {
        order.remove(pos);
    }
    order.push_back(key.to_string());
}
