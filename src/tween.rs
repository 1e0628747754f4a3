//! Property tweening.
//!
//! A `Timeline` animates shared `f32` properties toward a target value with easing,
//! repeat, and yoyo. It is the tweening utility the float effect drives through the
//! `Tweener` trait.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// A numeric property a tween writes into. Shared with whatever reads it each frame.
pub type Property = Rc<Cell<f32>>;

/// Easing curves
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-in-out
    Power1InOut,
}

impl Ease {
    /// Map linear progress `t` in 0..=1 to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play the leg this many extra times
    Count(u32),
    Infinite,
}

/// Describes one tween: animate to `to` over `duration` per leg
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub to: f32,
    pub duration: Duration,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Reverse direction on every other leg
    pub yoyo: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

/// Something that can start tweens
pub trait Tweener {
    fn to(&mut self, property: Property, spec: TweenSpec) -> TweenId;
}

struct Tween {
    id: TweenId,
    property: Property,
    from: f32,
    spec: TweenSpec,
    start: Duration,
}

impl Tween {
    /// Value at `now` and whether the tween has finished
    fn sample(&self, now: Duration) -> (f32, bool) {
        let duration = self.spec.duration.as_secs_f32();
        let elapsed = now.saturating_sub(self.start).as_secs_f32();
        if duration <= 0.0 {
            return (self.spec.to, true);
        }

        let legs = elapsed / duration;
        let leg = legs.floor();
        let mut t = legs - leg;
        let mut leg = leg as u64;

        let finished = match self.spec.repeat {
            Repeat::Count(extra) if leg > extra as u64 => {
                leg = extra as u64;
                t = 1.0;
                true
            }
            _ => false,
        };

        if self.spec.yoyo && leg % 2 == 1 {
            t = 1.0 - t;
        }

        let eased = self.spec.ease.apply(t);
        (self.from + (self.spec.to - self.from) * eased, finished)
    }
}

/// Owns running tweens and advances them with the frame clock
#[derive(Default)]
pub struct Timeline {
    now: Duration,
    next_id: u64,
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `now` and write every tween's current value
    pub fn advance(&mut self, now: Duration) {
        puffin::profile_function!();

        self.now = now;
        self.tweens.retain(|tween| {
            let (value, finished) = tween.sample(now);
            tween.property.set(value);
            !finished
        });
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|tween| tween.id == id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl Tweener for Timeline {
    /// Starts from the property's current value at the timeline's current time
    fn to(&mut self, property: Property, spec: TweenSpec) -> TweenId {
        self.next_id += 1;
        let id = TweenId(self.next_id);
        self.tweens.push(Tween {
            id,
            from: property.get(),
            property,
            spec,
            start: self.now,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_spec() -> TweenSpec {
        TweenSpec {
            to: -20.0,
            duration: Duration::from_secs(3),
            ease: Ease::Power1InOut,
            repeat: Repeat::Infinite,
            yoyo: true,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_power1_in_out_endpoints_and_midpoint() {
        assert_eq!(Ease::Power1InOut.apply(0.0), 0.0);
        assert_eq!(Ease::Power1InOut.apply(1.0), 1.0);
        assert!(approx(Ease::Power1InOut.apply(0.5), 0.5));
        assert!(approx(Ease::Power1InOut.apply(0.25), 0.125));
        assert!(approx(Ease::Power1InOut.apply(0.75), 0.875));
    }

    #[test]
    fn test_yoyo_goes_there_and_back_forever() {
        let mut timeline = Timeline::new();
        let y: Property = Rc::new(Cell::new(0.0));
        let id = timeline.to(y.clone(), float_spec());

        let check = |timeline: &mut Timeline, millis: u64, expected: f32| {
            timeline.advance(Duration::from_millis(millis));
            assert!(approx(y.get(), expected), "at {}ms got {}", millis, y.get());
        };

        check(&mut timeline, 0, 0.0);
        check(&mut timeline, 1500, -10.0);
        check(&mut timeline, 3000, -20.0);
        check(&mut timeline, 4500, -10.0);
        check(&mut timeline, 6000, 0.0);
        check(&mut timeline, 300_000 + 1500, -10.0);
        assert!(timeline.is_active(id));
    }

    #[test]
    fn test_tween_starts_at_timeline_time() {
        let mut timeline = Timeline::new();
        timeline.advance(Duration::from_secs(10));
        let y: Property = Rc::new(Cell::new(0.0));
        timeline.to(y.clone(), float_spec());
        timeline.advance(Duration::from_secs(13));
        assert!(approx(y.get(), -20.0));
    }

    #[test]
    fn test_finite_tween_completes_and_is_removed() {
        let mut timeline = Timeline::new();
        let y: Property = Rc::new(Cell::new(5.0));
        let id = timeline.to(
            y.clone(),
            TweenSpec {
                to: 10.0,
                duration: Duration::from_secs(1),
                ease: Ease::Linear,
                repeat: Repeat::Count(0),
                yoyo: false,
            },
        );
        timeline.advance(Duration::from_millis(500));
        assert!(approx(y.get(), 7.5));
        timeline.advance(Duration::from_secs(2));
        assert!(approx(y.get(), 10.0));
        assert!(!timeline.is_active(id));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_finite_yoyo_ends_where_it_started() {
        let mut timeline = Timeline::new();
        let y: Property = Rc::new(Cell::new(0.0));
        timeline.to(
            y.clone(),
            TweenSpec {
                to: 1.0,
                duration: Duration::from_secs(1),
                ease: Ease::Linear,
                repeat: Repeat::Count(1),
                yoyo: true,
            },
        );
        timeline.advance(Duration::from_secs(5));
        assert!(approx(y.get(), 0.0));
        assert_eq!(timeline.len(), 0);
    }
}
