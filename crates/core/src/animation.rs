//! Animation module - time-bounded interpolation of numeric properties
//!
//! An animation does not hold a reference to the value it drives. It holds a
//! typed target handle `K` which a [`PropertyStore`] resolves to `&mut f32`
//! on every run. Handles that no longer resolve (the owner was removed or the
//! session was reset) finish the animation without touching anything.

/// Interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Sinusoidal ease-in-out.
    Ease,
}

impl Easing {
    /// Interpolate between `initial` and `target` at progress `t` in `[0, 1]`.
    pub fn apply(&self, t: f32, initial: f32, target: f32) -> f32 {
        if t <= 0.0 {
            return initial;
        }
        if t >= 1.0 {
            return target;
        }
        match self {
            Easing::Linear => initial + t * (target - initial),
            Easing::Ease => {
                let k = ((std::f32::consts::PI * (t - 0.5)).sin() + 1.0) / 2.0;
                initial + k * (target - initial)
            }
        }
    }
}

/// Resolves animation target handles to the values they drive.
pub trait PropertyStore<K> {
    fn property_mut(&mut self, target: &K) -> Option<&mut f32>;
}

/// A single running interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation<K> {
    target: K,
    easing: Easing,
    start_ms: u64,
    duration_ms: u32,
    initial: f32,
    final_value: f32,
    finished: bool,
}

impl<K> Animation<K> {
    pub fn new(
        target: K,
        easing: Easing,
        initial: f32,
        final_value: f32,
        start_ms: u64,
        duration_ms: u32,
    ) -> Self {
        Self {
            target,
            easing,
            start_ms,
            duration_ms,
            initial,
            final_value,
            finished: false,
        }
    }

    pub fn target(&self) -> &K {
        &self.target
    }

    pub fn final_value(&self) -> f32 {
        self.final_value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Value of the curve at `now_ms`, snapped to the final value once done.
    pub fn value_at(&self, now_ms: u64) -> f32 {
        let end = self.start_ms + self.duration_ms as u64;
        if self.duration_ms == 0 || now_ms >= end {
            return self.final_value;
        }
        let t = now_ms.saturating_sub(self.start_ms) as f32 / self.duration_ms as f32;
        self.easing.apply(t, self.initial, self.final_value)
    }

    /// Write the value for `now_ms` into the bound property.
    ///
    /// Returns `true` once the animation has finished.
    pub fn run<S: PropertyStore<K> + ?Sized>(&mut self, now_ms: u64, store: &mut S) -> bool {
        if self.finished {
            return true;
        }
        let Some(value) = store.property_mut(&self.target) else {
            self.finished = true;
            return true;
        };
        *value = self.value_at(now_ms);
        self.finished = now_ms >= self.start_ms + self.duration_ms as u64;
        self.finished
    }
}

/// The live animation set, at most one per target.
#[derive(Debug, Clone)]
pub struct Animations<K> {
    items: Vec<Animation<K>>,
    clock_ms: u64,
}

impl<K: PartialEq> Animations<K> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            clock_ms: 0,
        }
    }

    /// Timestamp used as the start time of newly created animations.
    pub fn clock(&self) -> u64 {
        self.clock_ms
    }

    pub fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
    }

    /// Add an animation, replacing any running one with the same target.
    pub fn add(&mut self, animation: Animation<K>) {
        self.items.retain(|a| a.target != animation.target);
        self.items.push(animation);
    }

    /// Start animating `target` from `initial` towards `final_value`, beginning now.
    pub fn start(
        &mut self,
        target: K,
        easing: Easing,
        initial: f32,
        final_value: f32,
        duration_ms: u32,
    ) {
        let anim = Animation::new(
            target,
            easing,
            initial,
            final_value,
            self.clock_ms,
            duration_ms,
        );
        self.add(anim);
    }

    /// Advance every animation to `now_ms` and drop the finished ones.
    pub fn run<S: PropertyStore<K> + ?Sized>(&mut self, now_ms: u64, store: &mut S) {
        self.clock_ms = now_ms;
        for anim in self.items.iter_mut() {
            anim.run(now_ms, store);
        }
        self.items.retain(|a| !a.finished);
    }

    /// Drop every animation whose target matches `pred`.
    pub fn cancel(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.items.retain(|a| !pred(&a.target));
    }

    pub fn is_animating(&self, target: &K) -> bool {
        self.items.iter().any(|a| &a.target == target)
    }

    pub fn get(&self, target: &K) -> Option<&Animation<K>> {
        self.items.iter().find(|a| &a.target == target)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<K: PartialEq> Default for Animations<K> {
    fn default() -> Self {
        Self::new()
    }
}
