use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::info;

use crate::quote::notify::Navigate;

const TICK_MILLIS: u32 = 1_000;

/// Source of timers. Dropping a handle must cancel its timer.
pub trait TimerDriver {
    type Handle;

    fn interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
    fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers. `gloo_timers` clears the JS timer when the handle drops.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimers;

pub enum GlooHandle {
    Interval(Interval),
    Timeout(Timeout),
}

impl TimerDriver for GlooTimers {
    type Handle = GlooHandle;

    fn interval(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> GlooHandle {
        GlooHandle::Interval(Interval::new(period_ms, move || tick()))
    }

    fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> GlooHandle {
        GlooHandle::Timeout(Timeout::new(delay_ms, fire))
    }
}

/// The post-submission countdown. Owns both timers; dropping it (or calling
/// [`ActiveCountdown::cancel`]) stops the ticks and the redirect.
pub struct ActiveCountdown<H> {
    remaining: Rc<Cell<u32>>,
    _ticker: H,
    _redirect: H,
}

impl<H> ActiveCountdown<H> {
    pub fn remaining(&self) -> u32 {
        self.remaining.get()
    }

    pub fn cancel(self) {
        info!("Countdown cancelled at {}", self.remaining.get());
    }
}

/// Counts down from `seconds` once per second, reporting each value through
/// `on_tick`, and sends the user home after the same total delay.
///
/// The redirect is its own one-shot timer rather than a side effect of the
/// last tick.
pub fn start_countdown<T, F>(
    driver: &T,
    seconds: u32,
    on_tick: F,
    navigator: Rc<dyn Navigate>,
) -> ActiveCountdown<T::Handle>
where
    T: TimerDriver,
    F: Fn(u32) + 'static,
{
    let remaining = Rc::new(Cell::new(seconds));

    let ticker = {
        let remaining = remaining.clone();
        driver.interval(
            TICK_MILLIS,
            Box::new(move || {
                let current = remaining.get();
                if current == 0 {
                    return;
                }
                remaining.set(current - 1);
                on_tick(current - 1);
            }),
        )
    };

    let redirect = driver.timeout(
        seconds.saturating_mul(TICK_MILLIS),
        Box::new(move || {
            info!("Countdown finished, redirecting home");
            navigator.go_home();
        }),
    );

    ActiveCountdown {
        remaining,
        _ticker: ticker,
        _redirect: redirect,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    enum Callback {
        Every(u64, Box<dyn FnMut()>),
        Once(Box<dyn FnOnce()>),
    }

    struct Scheduled {
        id: usize,
        due: u64,
        cancelled: Rc<Cell<bool>>,
        callback: Option<Callback>,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: usize,
        timers: Vec<Scheduled>,
    }

    /// Virtual time for timer tests.
    #[derive(Clone, Default)]
    struct ManualTimers {
        clock: Rc<RefCell<Clock>>,
    }

    struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualTimers {
        fn schedule(&self, delay: u64, callback: Callback) -> ManualHandle {
            let mut clock = self.clock.borrow_mut();
            let cancelled = Rc::new(Cell::new(false));
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay;
            clock.timers.push(Scheduled {
                id,
                due,
                cancelled: cancelled.clone(),
                callback: Some(callback),
            });
            ManualHandle { cancelled }
        }

        fn advance(&self, millis: u64) {
            let target = self.clock.borrow().now + millis;
            loop {
                let fired = {
                    let mut clock = self.clock.borrow_mut();
                    clock.timers.retain(|t| !t.cancelled.get() && t.callback.is_some());
                    let next = clock
                        .timers
                        .iter_mut()
                        .filter(|t| t.due <= target)
                        .min_by_key(|t| (t.due, t.id));
                    match next {
                        Some(timer) => {
                            let due = timer.due;
                            let id = timer.id;
                            let callback = timer.callback.take();
                            clock.now = due;
                            callback.map(|cb| (id, due, cb))
                        }
                        None => None,
                    }
                };

                let Some((id, due, callback)) = fired else {
                    break;
                };
                match callback {
                    Callback::Once(fire) => fire(),
                    Callback::Every(period, mut tick) => {
                        tick();
                        let mut clock = self.clock.borrow_mut();
                        if let Some(timer) = clock.timers.iter_mut().find(|t| t.id == id) {
                            timer.due = due + period;
                            timer.callback = Some(Callback::Every(period, tick));
                        }
                    }
                }
            }
            self.clock.borrow_mut().now = target;
        }
    }

    impl TimerDriver for ManualTimers {
        type Handle = ManualHandle;

        fn interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> ManualHandle {
            self.schedule(period_ms as u64, Callback::Every(period_ms as u64, tick))
        }

        fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> ManualHandle {
            self.schedule(delay_ms as u64, Callback::Once(fire))
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        home_visits: Cell<usize>,
    }

    impl Navigate for CountingNavigator {
        fn go_home(&self) {
            self.home_visits.set(self.home_visits.get() + 1);
        }
    }

    fn started(
        timers: &ManualTimers,
    ) -> (ActiveCountdown<ManualHandle>, Rc<RefCell<Vec<u32>>>, Rc<CountingNavigator>) {
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let navigator = Rc::new(CountingNavigator::default());
        let seen = ticks.clone();
        let countdown = start_countdown(
            timers,
            10,
            move |value| seen.borrow_mut().push(value),
            navigator.clone(),
        );
        (countdown, ticks, navigator)
    }

    #[test]
    fn counts_down_to_zero_and_redirects_once() {
        let timers = ManualTimers::default();
        let (countdown, ticks, navigator) = started(&timers);
        assert_eq!(countdown.remaining(), 10);

        timers.advance(9_999);
        assert_eq!(countdown.remaining(), 1);
        assert_eq!(navigator.home_visits.get(), 0);

        timers.advance(1);
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(*ticks.borrow(), vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(navigator.home_visits.get(), 1);

        timers.advance(30_000);
        assert_eq!(navigator.home_visits.get(), 1);
        assert_eq!(ticks.borrow().len(), 10);
    }

    #[test]
    fn teardown_midway_cancels_both_timers() {
        let timers = ManualTimers::default();
        let (countdown, ticks, navigator) = started(&timers);

        timers.advance(5_000);
        assert_eq!(countdown.remaining(), 5);
        countdown.cancel();

        timers.advance(60_000);
        assert_eq!(navigator.home_visits.get(), 0);
        assert_eq!(*ticks.borrow(), vec![9, 8, 7, 6, 5]);
    }

    #[test]
    fn dropping_is_the_same_as_cancelling() {
        let timers = ManualTimers::default();
        let (countdown, _ticks, navigator) = started(&timers);
        drop(countdown);

        timers.advance(10_000);
        assert_eq!(navigator.home_visits.get(), 0);
    }
}
