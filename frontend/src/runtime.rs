//! Task spawning, timers and clock behind one seam.
//!
//! The widget never touches `setInterval` or `spawn_local` directly; it
//! goes through [`Runtime`] so the browser implementation can be swapped
//! for a manually driven one in tests.

use std::future::Future;

use gloo_timers::callback::{Interval, Timeout};

/// A timer that can be stopped before it fires again.
pub trait Cancel {
    fn cancel(self);
}

/// Single-threaded executor and timer source.
pub trait Runtime: Clone + 'static {
    type Timer: Cancel + 'static;

    /// Run a future to completion in the background.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static;

    /// Call `tick` every `period_ms` until the returned timer is cancelled.
    fn interval<F>(&self, period_ms: u32, tick: F) -> Self::Timer
    where
        F: FnMut() + 'static;

    /// Call `fire` once after `delay_ms` unless cancelled first.
    fn timeout<F>(&self, delay_ms: u32, fire: F) -> Self::Timer
    where
        F: FnOnce() + 'static;

    /// Wall clock in milliseconds.
    fn now_ms(&self) -> f64;
}

// =============================================================================
// Browser
// =============================================================================

/// `spawn_local` plus gloo timers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRuntime;

/// Handle to a gloo timer; dropping it also clears the timer.
pub enum BrowserTimer {
    Interval(Interval),
    Timeout(Timeout),
}

impl Cancel for BrowserTimer {
    fn cancel(self) {
        match self {
            BrowserTimer::Interval(interval) => {
                let _ = interval.cancel();
            }
            BrowserTimer::Timeout(timeout) => {
                let _ = timeout.cancel();
            }
        }
    }
}

impl Runtime for BrowserRuntime {
    type Timer = BrowserTimer;

    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    fn interval<F>(&self, period_ms: u32, tick: F) -> Self::Timer
    where
        F: FnMut() + 'static,
    {
        BrowserTimer::Interval(Interval::new(period_ms, tick))
    }

    fn timeout<F>(&self, delay_ms: u32, fire: F) -> Self::Timer
    where
        F: FnOnce() + 'static,
    {
        BrowserTimer::Timeout(Timeout::new(delay_ms, fire))
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

// =============================================================================
// Manual runtime for tests
// =============================================================================

#[cfg(test)]
pub mod testing {
    //! A runtime whose timers only fire when the test says so.

    use super::{Cancel, Runtime};
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::rc::Rc;

    type Callback = Rc<RefCell<Box<dyn FnMut()>>>;

    #[derive(Clone, Copy, PartialEq)]
    enum Kind {
        Interval,
        Timeout,
    }

    struct Slot {
        id: usize,
        kind: Kind,
        live: bool,
        callback: Callback,
    }

    struct Inner {
        pool: RefCell<LocalPool>,
        spawner: LocalSpawner,
        slots: RefCell<Vec<Slot>>,
        next_id: Cell<usize>,
        created: Cell<usize>,
        cancelled: Cell<usize>,
        clock_ms: Cell<f64>,
    }

    #[derive(Clone)]
    pub struct ManualRuntime {
        inner: Rc<Inner>,
    }

    pub struct ManualTimer {
        id: usize,
        inner: Rc<Inner>,
    }

    impl Cancel for ManualTimer {
        fn cancel(self) {
            let mut slots = self.inner.slots.borrow_mut();
            if let Some(slot) = slots.iter_mut().find(|s| s.id == self.id && s.live) {
                slot.live = false;
                self.inner.cancelled.set(self.inner.cancelled.get() + 1);
            }
        }
    }

    impl ManualRuntime {
        pub fn new() -> Self {
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            Self {
                inner: Rc::new(Inner {
                    pool: RefCell::new(pool),
                    spawner,
                    slots: RefCell::new(Vec::new()),
                    next_id: Cell::new(0),
                    created: Cell::new(0),
                    cancelled: Cell::new(0),
                    clock_ms: Cell::new(0.0),
                }),
            }
        }

        /// Drive spawned futures until none can make progress.
        pub fn run_until_stalled(&self) {
            self.inner.pool.borrow_mut().run_until_stalled();
        }

        /// Fire every live interval once, then settle spawned work.
        pub fn tick(&self) {
            for callback in self.live_callbacks(Kind::Interval, false) {
                (callback.borrow_mut())();
            }
            self.run_until_stalled();
        }

        /// Fire every pending timeout, then settle spawned work.
        pub fn fire_timeouts(&self) {
            for callback in self.live_callbacks(Kind::Timeout, true) {
                (callback.borrow_mut())();
            }
            self.run_until_stalled();
        }

        pub fn advance(&self, ms: f64) {
            self.inner.clock_ms.set(self.inner.clock_ms.get() + ms);
        }

        pub fn live_intervals(&self) -> usize {
            self.inner
                .slots
                .borrow()
                .iter()
                .filter(|s| s.live && s.kind == Kind::Interval)
                .count()
        }

        pub fn timers_created(&self) -> usize {
            self.inner.created.get()
        }

        pub fn timers_cancelled(&self) -> usize {
            self.inner.cancelled.get()
        }

        fn live_callbacks(&self, kind: Kind, consume: bool) -> Vec<Callback> {
            let mut slots = self.inner.slots.borrow_mut();
            slots
                .iter_mut()
                .filter(|s| s.live && s.kind == kind)
                .map(|s| {
                    if consume {
                        s.live = false;
                    }
                    s.callback.clone()
                })
                .collect()
        }

        fn register(&self, kind: Kind, callback: Box<dyn FnMut()>) -> ManualTimer {
            let id = self.inner.next_id.get();
            self.inner.next_id.set(id + 1);
            self.inner.created.set(self.inner.created.get() + 1);
            self.inner.slots.borrow_mut().push(Slot {
                id,
                kind,
                live: true,
                callback: Rc::new(RefCell::new(callback)),
            });
            ManualTimer {
                id,
                inner: self.inner.clone(),
            }
        }
    }

    impl Runtime for ManualRuntime {
        type Timer = ManualTimer;

        fn spawn<F>(&self, future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            self.inner
                .spawner
                .spawn_local(future)
                .expect("local pool accepts futures");
        }

        fn interval<F>(&self, _period_ms: u32, tick: F) -> Self::Timer
        where
            F: FnMut() + 'static,
        {
            self.register(Kind::Interval, Box::new(tick))
        }

        fn timeout<F>(&self, _delay_ms: u32, fire: F) -> Self::Timer
        where
            F: FnOnce() + 'static,
        {
            let mut fire = Some(fire);
            self.register(
                Kind::Timeout,
                Box::new(move || {
                    if let Some(fire) = fire.take() {
                        fire();
                    }
                }),
            )
        }

        fn now_ms(&self) -> f64 {
            self.inner.clock_ms.get()
        }
    }
}
