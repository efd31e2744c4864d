//! Simulation observer trait for progress reporting and data collection.

use aw_assign::AssignReport;
use aw_core::{AgentId, Tick};

/// Callbacks invoked by [`Simulation::tick_with`][crate::Simulation::tick_with]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — activation log
///
/// ```rust,ignore
/// struct WakeLog(Vec<(Tick, AgentId)>);
///
/// impl SimObserver for WakeLog {
///     fn on_activation(&mut self, tick: Tick, _claimer: AgentId, woken: AgentId) {
///         self.0.push((tick, woken));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each running tick, after the counter advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when `claimer` arrives at `woken` and activates it.
    fn on_activation(&mut self, _tick: Tick, _claimer: AgentId, _woken: AgentId) {}

    /// Called at the end of each running tick.
    ///
    /// `assign` is what the strategy did this tick; `woken` is the number of
    /// agents activated by arrivals.
    fn on_tick_end(&mut self, _tick: Tick, _assign: &AssignReport, _woken: usize) {}

    /// Called once, on the tick the last dormant agent is activated.
    fn on_complete(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `tick_with`
/// or `run_until_complete` but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
