//! Ambient float effect for the decorative hero label.
//!
//! After load the effect either stays off (reduced motion, or no element) or waits
//! for a tweening utility. It checks for one every `FLOAT_POLL_INTERVAL`, or starts
//! immediately when told the utility is ready, then runs an endless eased yoyo.

use crate::constants::*;
use crate::tween::{Ease, Property, Repeat, TweenId, TweenSpec, Tweener};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// The decorative element. Its vertical offset is what gets animated.
#[derive(Default)]
pub struct FloatElement {
    offset_y: Property,
}

impl FloatElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y.get()
    }

    pub fn property(&self) -> Property {
        self.offset_y.clone()
    }
}

/// Where a tweening utility may come from
pub trait TweenerSource {
    type Tweener: Tweener;

    /// The utility if it is available right now
    fn tweener(&mut self) -> Option<&mut Self::Tweener>;
}

/// A slot that is filled once the utility is loaded
impl<T: Tweener> TweenerSource for Option<T> {
    type Tweener = T;

    fn tweener(&mut self) -> Option<&mut T> {
        self.as_mut()
    }
}

/// Readiness signal: the utility arrives over a channel when it has loaded
pub struct ReadySignal<T> {
    receiver: Receiver<T>,
    ready: Option<T>,
}

impl<T> ReadySignal<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self {
            receiver,
            ready: None,
        }
    }
}

impl<T: Tweener> TweenerSource for ReadySignal<T> {
    type Tweener = T;

    fn tweener(&mut self) -> Option<&mut T> {
        if self.ready.is_none() {
            // A disconnected sender just means the utility never loads
            if let Ok(tweener) = self.receiver.try_recv() {
                self.ready = Some(tweener);
            }
        }
        self.ready.as_mut()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatState {
    /// The platform asked for reduced motion
    Disabled,
    /// No decorative element to animate
    Absent,
    /// Looking for a tweening utility
    Waiting { next_poll: Duration },
    Running(TweenId),
}

pub struct FloatEffect {
    state: FloatState,
    property: Option<Property>,
    polls: u32,
}

impl FloatEffect {
    /// Set up the effect once loading has finished
    pub fn on_load(prefers_reduced_motion: bool, element: Option<&FloatElement>, now: Duration) -> Self {
        let (state, property) = if prefers_reduced_motion {
            log::info!("reduced motion preferred, float effect disabled");
            (FloatState::Disabled, None)
        } else {
            match element {
                Some(element) => (FloatState::Waiting { next_poll: now }, Some(element.property())),
                None => (FloatState::Absent, None),
            }
        };
        Self {
            state,
            property,
            polls: 0,
        }
    }

    /// Check for the utility if a poll is due, and start once it is found
    pub fn tick(&mut self, now: Duration, source: &mut impl TweenerSource) -> bool {
        let FloatState::Waiting { next_poll } = self.state else {
            return false;
        };
        if now < next_poll {
            return false;
        }

        self.polls += 1;
        match source.tweener() {
            Some(tweener) => self.start(tweener),
            None => {
                log::debug!("tweening utility not ready, poll {}", self.polls);
                self.state = FloatState::Waiting {
                    next_poll: now + FLOAT_POLL_INTERVAL,
                };
                false
            }
        }
    }

    /// The utility signalled readiness, start without waiting for the next poll
    pub fn on_ready(&mut self, tweener: &mut impl Tweener) -> bool {
        match self.state {
            FloatState::Waiting { .. } => self.start(tweener),
            _ => false,
        }
    }

    fn start(&mut self, tweener: &mut impl Tweener) -> bool {
        let Some(property) = self.property.clone() else {
            return false;
        };
        let id = tweener.to(property, float_tween());
        log::info!("float effect started");
        self.state = FloatState::Running(id);
        true
    }

    pub fn state(&self) -> FloatState {
        self.state
    }

    /// How many times the utility has been looked for
    pub fn polls(&self) -> u32 {
        self.polls
    }
}

/// Up by `FLOAT_OFFSET` and back, eased, forever
pub fn float_tween() -> TweenSpec {
    TweenSpec {
        to: FLOAT_OFFSET,
        duration: FLOAT_LEG_DURATION,
        ease: Ease::Power1InOut,
        repeat: Repeat::Infinite,
        yoyo: true,
    }
}

/// Read the reduced-motion preference from the environment
pub fn prefers_reduced_motion() -> bool {
    parse_reduced_motion(std::env::var(REDUCED_MOTION_ENV).ok().as_deref())
}

fn parse_reduced_motion(value: Option<&str>) -> bool {
    match value {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "reduce"
        ),
        None => false,
    }
}
