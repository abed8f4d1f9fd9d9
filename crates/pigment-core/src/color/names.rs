use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use state::InitCell;

use crate::paint::DrawingSurface;

static GLOBAL: InitCell<NamedColorCache> = InitCell::new();

/// Name → RGB cache for colors resolved through a drawing surface.
///
/// Entries are written once per name and never evicted. Unknown names are
/// cached as black so the surface is asked only once.
#[derive(Debug, Default)]
pub struct NamedColorCache {
    entries: Mutex<HashMap<String, [f64; 3]>>,
}

impl NamedColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by color parsing.
    pub fn global() -> &'static NamedColorCache {
        GLOBAL.get_or_init(NamedColorCache::new)
    }

    /// Returns the cached triple for `name`, asking `surface` on first use.
    ///
    /// The lock is not held while the surface runs, so a surface may use the
    /// cache itself. When two callers race on a name, the first insert wins.
    pub fn resolve(&self, name: &str, surface: &dyn DrawingSurface) -> [f64; 3] {
        if let Some(rgb) = self.get(name) {
            return rgb;
        }
        let rgb = surface.resolve_named_color(name).unwrap_or_else(|| {
            log::warn!("unknown color name {name:?}, falling back to black");
            [0.0; 3]
        });
        log::debug!("resolved color name {name:?} to {rgb:?}");
        *self.lock().entry(name.to_string()).or_insert(rgb)
    }

    pub fn get(&self, name: &str) -> Option<[f64; 3]> {
        self.lock().get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, [f64; 3]>> {
        // Entries are plain data; a panic elsewhere cannot leave them torn.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::paint::{GradientPaint, SoftwareSurface};

    /// Counts name lookups and forwards them to the software surface.
    /// With `inner` set, each lookup also reads that cache first.
    #[derive(Default)]
    struct CountingSurface<'a> {
        lookups: Cell<u32>,
        inner: Option<&'a NamedColorCache>,
        seen: Cell<usize>,
    }

    impl DrawingSurface for CountingSurface<'_> {
        fn resolve_named_color(&self, name: &str) -> Option<[f64; 3]> {
            self.lookups.set(self.lookups.get() + 1);
            if let Some(cache) = self.inner {
                self.seen.set(cache.len());
            }
            SoftwareSurface.resolve_named_color(name)
        }

        fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Box<dyn GradientPaint> {
            SoftwareSurface.create_linear_gradient(x0, y0, x1, y1)
        }

        fn create_radial_gradient(
            &self,
            fx: f64,
            fy: f64,
            r0: f64,
            cx: f64,
            cy: f64,
            r1: f64,
        ) -> Box<dyn GradientPaint> {
            SoftwareSurface.create_radial_gradient(fx, fy, r0, cx, cy, r1)
        }
    }

    #[test]
    fn surface_is_asked_once_per_name() {
        let cache = NamedColorCache::new();
        let surface = CountingSurface::default();
        assert_eq!(cache.resolve("lime", &surface), [0.0, 1.0, 0.0]);
        assert_eq!(cache.resolve("lime", &surface), [0.0, 1.0, 0.0]);
        assert_eq!(surface.lookups.get(), 1);
        assert_eq!(cache.get("lime"), Some([0.0, 1.0, 0.0]));
    }

    #[test]
    fn unknown_names_are_cached_as_black() {
        let cache = NamedColorCache::new();
        let surface = CountingSurface::default();
        assert_eq!(cache.resolve("no-such-color", &surface), [0.0; 3]);
        assert_eq!(cache.resolve("no-such-color", &surface), [0.0; 3]);
        assert_eq!(surface.lookups.get(), 1);
    }

    #[test]
    fn surface_may_read_the_cache_it_fills() {
        let cache = NamedColorCache::new();
        cache.resolve("navy", &SoftwareSurface);
        let surface = CountingSurface { inner: Some(&cache), ..Default::default() };
        assert_eq!(cache.resolve("lime", &surface), [0.0, 1.0, 0.0]);
        assert_eq!(surface.seen.get(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = NamedColorCache::new();
        cache.resolve("navy", &SoftwareSurface);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
