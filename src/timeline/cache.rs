use std::{collections::HashMap, sync::Arc};

use xxhash_rust::xxh3::Xxh3;

use crate::{
    animation::ease::Ease,
    composition::model::{
        OverlapPolicy, Slide, TransitionKind, TransitionPolicy, validate_slides,
    },
    foundation::core::Fps,
    foundation::error::SlidecastResult,
    timeline::builder::{Timeline, build_timeline_with_policy},
};

const XXH3_SEED: u64 = 0x51_1d_ec_a5_7a_11_0f_01;

/// Stable fingerprint of every input that influences [`build_timeline_with_policy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineKey {
    hi: u64,
    lo: u64,
}

impl TimelineKey {
    /// Fingerprint a timeline request.
    ///
    /// Only slide durations are hashed: ids, text, images, and highlights never move frames.
    pub fn new(
        slides: &[Slide],
        transition: &TransitionPolicy,
        fps: Fps,
        overlap: OverlapPolicy,
    ) -> Self {
        let mut h = StableHasher::new();
        h.write_u32(fps.get());
        h.write_u8(match overlap {
            OverlapPolicy::Clamp => 0,
            OverlapPolicy::Reject => 1,
        });
        h.write_u8(match transition.kind {
            TransitionKind::None => 0,
            TransitionKind::Fade => 1,
            TransitionKind::Slide => 2,
            TransitionKind::Wipe => 3,
        });
        h.write_f64(transition.duration_secs);
        h.write_u8(match transition.ease {
            Ease::Linear => 0,
            Ease::InQuad => 1,
            Ease::OutQuad => 2,
            Ease::InOutQuad => 3,
            Ease::InCubic => 4,
            Ease::OutCubic => 5,
            Ease::InOutCubic => 6,
        });
        h.write_u64(slides.len() as u64);
        for s in slides {
            h.write_f64(s.duration_secs);
        }
        h.finish()
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> TimelineKey {
        let v = self.inner.digest128();
        TimelineKey {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Hit/miss counters for a [`TimelineCache`].
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that had to build a timeline.
    pub misses: u64,
}

/// Memoizes timelines for interactive previews that rebuild on every edit.
///
/// Failed builds are not cached. The cache is flushed when it reaches `capacity` entries.
pub struct TimelineCache {
    entries: HashMap<TimelineKey, Arc<Timeline>>,
    capacity: usize,
    stats: CacheStats,
}

impl TimelineCache {
    /// Cache holding at most `capacity` timelines (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached timeline for these inputs, building it on a miss.
    ///
    /// Slides are validated on every call, so a hit never hides a duplicate or empty id.
    pub fn get_or_build(
        &mut self,
        slides: &[Slide],
        transition: &TransitionPolicy,
        fps: Fps,
        overlap: OverlapPolicy,
    ) -> SlidecastResult<Arc<Timeline>> {
        validate_slides(slides)?;
        let key = TimelineKey::new(slides, transition, fps, overlap);
        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(Arc::clone(hit));
        }

        self.stats.misses += 1;
        let timeline = Arc::new(build_timeline_with_policy(
            slides, transition, fps, overlap,
        )?);
        if self.entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "timeline cache full; flushing");
            self.entries.clear();
        }
        self.entries.insert(key, Arc::clone(&timeline));
        Ok(timeline)
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of cached timelines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached timeline.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TimelineCache {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cache.rs"]
mod tests;
