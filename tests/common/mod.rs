//! Shared helpers for the integration tests.

use framepick::DeadzoneSet;

/// Small deterministic generator so layouts are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) % bound.max(1)
    }
}

/// Up to five random deadzones, merged by the store.
pub fn generated_deadzones(total_frames: u64, seed: u64) -> DeadzoneSet {
    let mut rng = Lcg(seed);
    let mut set = DeadzoneSet::new(total_frames);
    for _ in 0..rng.next(6) {
        let start = rng.next(total_frames);
        let length = rng.next(total_frames / 5 + 1);
        let end = (start + length).min(total_frames - 1);
        set.add(start, Some(end)).unwrap();
    }
    set
}
