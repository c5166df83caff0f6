//! Width-keyed cache of obstacle body gradients.

use super::color::{Axis, ColorRamp, Rgba};
use crate::core::constants::CAP_HEIGHT;
use crate::core::obstacles::GradientKey;
use std::collections::HashMap;
use std::sync::Arc;

pub const BODY_EDGE: Rgba = Rgba::hex(0x3AA53A);
pub const BODY_MID: Rgba = Rgba::hex(0x4EC94E);
pub const CAP_TOP: Rgba = Rgba::hex(0x2E912E);
pub const CAP_BOTTOM: Rgba = Rgba::hex(0x267A26);

/// Lazily populated gradients. Obstacle widths come from a small integer
/// range, so entries are never evicted.
#[derive(Debug, Default)]
pub struct GradientCache {
    ramps: HashMap<GradientKey, Arc<ColorRamp>>,
    cap: Option<Arc<ColorRamp>>,
}

impl GradientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body gradient for an obstacle of the key's width, built on first use.
    pub fn body(&mut self, key: GradientKey) -> Arc<ColorRamp> {
        Arc::clone(self.ramps.entry(key).or_insert_with(|| {
            Arc::new(ColorRamp::new(
                Axis::Horizontal,
                key.0 as usize,
                &[(0.0, BODY_EDGE), (0.5, BODY_MID), (1.0, BODY_EDGE)],
            ))
        }))
    }

    /// Cap gradient, shared by every obstacle.
    pub fn cap(&mut self) -> Arc<ColorRamp> {
        Arc::clone(
            self.cap
                .get_or_insert_with(|| Arc::new(cap_ramp(CAP_HEIGHT as usize))),
        )
    }

    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }
}

/// Vertical cap gradient, darkening downward on both segments.
pub fn cap_ramp(height: usize) -> ColorRamp {
    ColorRamp::new(
        Axis::Vertical,
        height,
        &[(0.0, CAP_TOP), (1.0, CAP_BOTTOM)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_reuses_entries() {
        let mut cache = GradientCache::new();
        let a = cache.body(GradientKey(64));
        let b = cache.body(GradientKey(64));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        cache.body(GradientKey(70));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_body_ramp_spans_width() {
        let mut cache = GradientCache::new();
        let ramp = cache.body(GradientKey(61));
        assert_eq!(ramp.colors.len(), 61);
        assert_eq!(ramp.colors[0], BODY_EDGE);
        assert_eq!(ramp.colors[30], BODY_MID);
    }

    #[test]
    fn test_cap_built_once() {
        let mut cache = GradientCache::new();
        let a = cache.cap();
        assert!(Arc::ptr_eq(&a, &cache.cap()));
        assert_eq!(a.axis, Axis::Vertical);
        assert_eq!(a.colors.first(), Some(&CAP_TOP));
        assert_eq!(a.colors.last(), Some(&CAP_BOTTOM));
        assert!(cache.is_empty());
    }
}
