//! A time interface that can be replaced by a fake time implementation
//! during testing.
//!
//! Both protocol engines wait for data by polling the transport and
//! sleeping in between. They measure and spend time exclusively through the
//! [Clock] trait so that tests can run them against a [FakeClock] whose
//! time only passes when the engine sleeps.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::fmt::Debug;
use core::time::Duration;
#[cfg(feature = "std")]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::{thread, time};

//------------ Clock -----------------------------------------------------------

/// A trait for measuring and spending time.
pub trait Clock {
    /// The type that implements the [Elapsed] trait.
    type Instant: Clone + Debug + Elapsed;

    /// Record the current time in an [Self::Instant] object.
    fn now(&self) -> Self::Instant;

    /// Returns a free-running millisecond counter.
    ///
    /// The counter has no defined epoch and wraps around. It is used as a
    /// cheap source of values that differ between calls, such as DNS
    /// transaction IDs.
    fn millis(&self) -> u32;

    /// Blocks for the given duration.
    fn sleep(&self, duration: Duration);
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
    type Instant = C::Instant;

    fn now(&self) -> Self::Instant {
        (*self).now()
    }

    fn millis(&self) -> u32 {
        (*self).millis()
    }

    fn sleep(&self, duration: Duration) {
        (*self).sleep(duration)
    }
}

//------------ Elapsed --------------------------------------------------------

/// Trait for reporting the time that has elapsed since the creation of an
/// instance object.
pub trait Elapsed {
    /// Return the elapsed time.
    fn elapsed(&self) -> Duration;
}

//------------ SystemClock -----------------------------------------------------

/// Implementation of the [Clock] trait using the Instant type from
/// std::time.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default)]
pub struct SystemClock {}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a new system clock.
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    type Instant = time::Instant;

    fn now(&self) -> Self::Instant {
        Self::Instant::now()
    }

    fn millis(&self) -> u32 {
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map(|since| since.as_millis() as u32)
            .unwrap_or(0)
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration)
    }
}

#[cfg(feature = "std")]
impl Elapsed for time::Instant {
    fn elapsed(&self) -> Duration {
        self.elapsed()
    }
}

//------------ FakeClock -----------------------------------------------------

/// Implementation of the [Clock] trait to fake the passing of time, for
/// example for testing.
///
/// Time starts at zero and only moves when [adjust_time][Self::adjust_time]
/// or [Clock::sleep] is called. Clones share the same time.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    /// The current fake time in nanoseconds.
    now: Arc<AtomicU64>,
}

#[cfg(feature = "std")]
impl FakeClock {
    /// Creates a new fake clock starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the current time by adding a [Duration]
    pub fn adjust_time(&self, adjust: Duration) {
        let nanos = u64::try_from(adjust.as_nanos()).unwrap_or(u64::MAX);
        let _ = self.now.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |now| Some(now.saturating_add(nanos)),
        );
    }

    /// Return the current (fake) time.
    pub fn curr_time(&self) -> Duration {
        Duration::from_nanos(self.now.load(Ordering::SeqCst))
    }
}

#[cfg(feature = "std")]
impl Clock for FakeClock {
    type Instant = FakeInstant;

    fn now(&self) -> Self::Instant {
        FakeInstant::now(self.curr_time(), self.clone())
    }

    fn millis(&self) -> u32 {
        self.curr_time().as_millis() as u32
    }

    fn sleep(&self, duration: Duration) {
        self.adjust_time(duration)
    }
}

//------------ FakeInstant ----------------------------------------------------

/// An instant that provides fake time.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct FakeInstant {
    /// When the FakeInstant was created.
    start: Duration,

    /// The clock that was used to create it.
    clock: FakeClock,
}

#[cfg(feature = "std")]
impl FakeInstant {
    /// Create a new FakeInstant.
    fn now(now: Duration, clock: FakeClock) -> Self {
        Self { start: now, clock }
    }
}

#[cfg(feature = "std")]
impl Elapsed for FakeInstant {
    fn elapsed(&self) -> Duration {
        self.clock.curr_time().saturating_sub(self.start)
    }
}

//============ Test ==========================================================
