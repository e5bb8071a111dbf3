//! Simulation observer trait and the listener list that fans hooks out.

use epi_core::{Config, ListenerId, Tick};
use epi_dynamics::TickReport;
use epi_population::Population;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} new infections", report.infections.len());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first tick of a run.
    fn on_run_start(&mut self, _config: &Config, _population: &Population) {}

    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what happened during it.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called every `config.snapshot_interval` ticks with read-only access to
    /// the whole population.
    fn on_snapshot(&mut self, _tick: Tick, _population: &Population) {}

    /// Called once after the last tick of a run.
    fn on_run_end(&mut self, _final_tick: Tick, _population: &Population) {}

    /// Checked between ticks; returning `false` ends the run early.
    fn keep_running(&self) -> bool {
        true
    }
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_run_start(&mut self, config: &Config, population: &Population) {
        (**self).on_run_start(config, population)
    }
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick)
    }
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        (**self).on_tick_end(tick, report)
    }
    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        (**self).on_snapshot(tick, population)
    }
    fn on_run_end(&mut self, final_tick: Tick, population: &Population) {
        (**self).on_run_end(final_tick, population)
    }
    fn keep_running(&self) -> bool {
        (**self).keep_running()
    }
}

// ── Publisher ─────────────────────────────────────────────────────────────────

/// An ordered list of boxed observers, itself an observer.
///
/// Every hook is forwarded to each listener in subscription order.  The run
/// continues only while every listener wants it to.
#[derive(Default)]
pub struct Publisher {
    next_id:   u32,
    listeners: Vec<(ListenerId, Box<dyn SimObserver>)>,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener; it is notified after every earlier one.
    pub fn subscribe(&mut self, listener: impl SimObserver + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener, returning it.  `None` if `id` is not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn SimObserver>> {
        let pos = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(pos).1)
    }

    /// Subscribed ids, in notification order.
    pub fn listener_ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn SimObserver)) {
        for (_, listener) in &mut self.listeners {
            f(listener.as_mut());
        }
    }
}

impl SimObserver for Publisher {
    fn on_run_start(&mut self, config: &Config, population: &Population) {
        self.each(|l| l.on_run_start(config, population));
    }
    fn on_tick_start(&mut self, tick: Tick) {
        self.each(|l| l.on_tick_start(tick));
    }
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.each(|l| l.on_tick_end(tick, report));
    }
    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        self.each(|l| l.on_snapshot(tick, population));
    }
    fn on_run_end(&mut self, final_tick: Tick, population: &Population) {
        self.each(|l| l.on_run_end(final_tick, population));
    }
    fn keep_running(&self) -> bool {
        self.listeners.iter().all(|(_, l)| l.keep_running())
    }
}
