//! Pooled symbol collections.
//!
//! Traversals allocate many short-lived symbol sets and edge maps. Instead of
//! hitting the allocator for each, they are checked out of an [`ObjectPool`]
//! and returned when the owning guard drops.
//!
//! Two guards exist:
//! - [`PooledSymbolSet`] returns its set on drop.
//! - [`PooledEdgeMap`] owns a map whose values were themselves checked out of
//!   the set pool. On drop it returns every value set first, then the map.
//!
//! Guards return their collection on every exit path, including `?` errors,
//! cancellation and unwinding.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::symbols::{EdgeMap, Symbol, SymbolSet};

/// Tuning for [`SymbolPools`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Free instances retained per pool. Extra returns are dropped.
    pub max_pooled: usize,
    /// Collections whose capacity grew past this are dropped instead of pooled.
    pub max_retained_capacity: usize,
}

impl PoolConfig {
    pub const DEFAULT_MAX_POOLED: usize = 128;
    pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 512;

    pub fn with_max_pooled(mut self, max_pooled: usize) -> Self {
        self.max_pooled = max_pooled;
        self
    }

    pub fn with_max_retained_capacity(mut self, capacity: usize) -> Self {
        self.max_retained_capacity = capacity;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_pooled: Self::DEFAULT_MAX_POOLED,
            max_retained_capacity: Self::DEFAULT_MAX_RETAINED_CAPACITY,
        }
    }
}

/// A collection that can live in an [`ObjectPool`].
pub trait Poolable: Default + Send {
    /// Empty the collection, keeping its allocation.
    fn reset(&mut self);

    /// Current allocated capacity, compared against
    /// [`PoolConfig::max_retained_capacity`].
    fn pooled_capacity(&self) -> usize;
}

impl Poolable for SymbolSet {
    fn reset(&mut self) {
        self.clear();
    }

    fn pooled_capacity(&self) -> usize {
        self.capacity()
    }
}

impl Poolable for EdgeMap {
    fn reset(&mut self) {
        debug_assert!(self.is_empty(), "edge map returned with live value sets");
        self.clear();
    }

    fn pooled_capacity(&self) -> usize {
        self.capacity()
    }
}

/// Checkout counters for one pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total checkouts.
    pub allocated: usize,
    /// Total returns.
    pub freed: usize,
    /// Checked out and not yet returned.
    pub outstanding: usize,
    /// Largest `outstanding` ever observed.
    pub high_water_mark: usize,
}

/// A thread-safe free list of reusable collections.
#[derive(Debug)]
pub struct ObjectPool<T> {
    free: Mutex<Vec<T>>,
    config: PoolConfig,
    allocated: AtomicUsize,
    freed: AtomicUsize,
    outstanding: AtomicUsize,
    high_water_mark: AtomicUsize,
}

impl<T: Poolable> ObjectPool<T> {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            config,
            allocated: AtomicUsize::new(0),
            freed: AtomicUsize::new(0),
            outstanding: AtomicUsize::new(0),
            high_water_mark: AtomicUsize::new(0),
        }
    }

    /// Check out a cleared instance.
    pub fn allocate(&self) -> T {
        self.allocated.fetch_add(1, Ordering::Relaxed);
        let outstanding = self.outstanding.fetch_add(1, Ordering::AcqRel) + 1;
        self.high_water_mark.fetch_max(outstanding, Ordering::AcqRel);

        self.free.lock().pop().unwrap_or_default()
    }

    /// Return an instance. It is cleared before it can be handed out again.
    pub fn free(&self, mut item: T) {
        self.freed.fetch_add(1, Ordering::Relaxed);
        self.outstanding.fetch_sub(1, Ordering::AcqRel);

        if item.pooled_capacity() > self.config.max_retained_capacity {
            return;
        }
        item.reset();

        let mut free = self.free.lock();
        if free.len() < self.config.max_pooled {
            free.push(item);
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            allocated: self.allocated.load(Ordering::Acquire),
            freed: self.freed.load(Ordering::Acquire),
            outstanding: self.outstanding.load(Ordering::Acquire),
            high_water_mark: self.high_water_mark.load(Ordering::Acquire),
        }
    }

    /// Number of free instances currently retained.
    pub fn retained(&self) -> usize {
        self.free.lock().len()
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }
}

static SHARED_POOLS: LazyLock<Arc<SymbolPools>> =
    LazyLock::new(|| Arc::new(SymbolPools::with_config(PoolConfig::default())));

/// The two pools every finder draws from.
#[derive(Debug)]
pub struct SymbolPools {
    sets: ObjectPool<SymbolSet>,
    maps: ObjectPool<EdgeMap>,
}

impl SymbolPools {
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            sets: ObjectPool::new(config),
            maps: ObjectPool::new(config),
        }
    }

    /// Process-wide pools used by the finder singletons.
    pub fn shared() -> Arc<SymbolPools> {
        Arc::clone(&SHARED_POOLS)
    }

    pub fn allocate_set(&self) -> PooledSymbolSet<'_> {
        PooledSymbolSet {
            pools: self,
            set: self.sets.allocate(),
        }
    }

    pub fn allocate_edge_map(&self) -> PooledEdgeMap<'_> {
        PooledEdgeMap {
            pools: self,
            map: self.maps.allocate(),
        }
    }

    pub fn set_stats(&self) -> PoolStats {
        self.sets.stats()
    }

    pub fn map_stats(&self) -> PoolStats {
        self.maps.stats()
    }

    pub fn sets(&self) -> &ObjectPool<SymbolSet> {
        &self.sets
    }

    pub fn maps(&self) -> &ObjectPool<EdgeMap> {
        &self.maps
    }
}

impl Default for SymbolPools {
    fn default() -> Self {
        Self::with_config(PoolConfig::default())
    }
}

/// A checked-out [`SymbolSet`], returned to its pool on drop.
pub struct PooledSymbolSet<'p> {
    pools: &'p SymbolPools,
    set: SymbolSet,
}

impl Deref for PooledSymbolSet<'_> {
    type Target = SymbolSet;

    fn deref(&self) -> &SymbolSet {
        &self.set
    }
}

impl DerefMut for PooledSymbolSet<'_> {
    fn deref_mut(&mut self) -> &mut SymbolSet {
        &mut self.set
    }
}

impl Drop for PooledSymbolSet<'_> {
    fn drop(&mut self) {
        self.pools.sets.free(std::mem::take(&mut self.set));
    }
}

/// A checked-out [`EdgeMap`] whose value sets also come from the set pool.
///
/// Read access goes through `Deref`. Value sets are only created through
/// [`PooledEdgeMap::entry`], so every value is owned by the set pool.
pub struct PooledEdgeMap<'p> {
    pools: &'p SymbolPools,
    map: EdgeMap,
}

impl PooledEdgeMap<'_> {
    /// The incoming set for `symbol`, checking one out of the set pool on
    /// first use.
    pub fn entry(&mut self, symbol: Symbol) -> &mut SymbolSet {
        let pools = self.pools;
        self.map
            .entry(symbol)
            .or_insert_with(|| pools.sets.allocate())
    }

    /// Make sure `symbol` has an entry, even with no predecessors.
    pub fn ensure(&mut self, symbol: Symbol) {
        self.entry(symbol);
    }

    /// Record that `predecessor` must be placed before `symbol`.
    pub fn add_edge(&mut self, symbol: Symbol, predecessor: Symbol) {
        self.entry(symbol).insert(predecessor);
    }
}

impl Deref for PooledEdgeMap<'_> {
    type Target = EdgeMap;

    fn deref(&self) -> &EdgeMap {
        &self.map
    }
}

impl Drop for PooledEdgeMap<'_> {
    fn drop(&mut self) {
        // Children first, then the map itself.
        for (_, set) in self.map.drain(..) {
            self.pools.sets.free(set);
        }
        self.pools.maps.free(std::mem::take(&mut self.map));
    }
}
