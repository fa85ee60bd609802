//! Closure windows and the schedule that reveals them.

use fa_core::{ClosureSpec, Tick};

/// A half-open runway closure `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureWindow {
    pub start: Tick,
    pub end:   Tick,
}

impl ClosureWindow {
    pub fn new(start: Tick, end: Tick) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }

    /// `true` if `[from, to)` shares at least one tick with the window.
    #[inline]
    pub fn overlaps(&self, from: Tick, to: Tick) -> bool {
        from < self.end && to > self.start
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl From<ClosureSpec> for ClosureWindow {
    fn from(spec: ClosureSpec) -> Self {
        ClosureWindow::new(Tick(spec.start_tick), Tick(spec.end_tick()))
    }
}

/// All configured closures of a run, sorted by start tick.
///
/// `revealed` counts the windows whose start tick has been reached.  Only
/// revealed windows constrain slot and gap searches; an unrevealed window is
/// invisible to planning, which is what makes a closure a surprise.
#[derive(Clone, Debug, Default)]
pub struct ClosureSchedule {
    windows:  Vec<ClosureWindow>,
    revealed: usize,
}

impl ClosureSchedule {
    /// Build from (already validated, non-overlapping) closure specs.
    pub fn new(specs: &[ClosureSpec]) -> Self {
        let mut windows: Vec<ClosureWindow> = specs.iter().copied().map(Into::into).collect();
        windows.sort_by_key(|w| w.start);
        Self { windows, revealed: 0 }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Reveal every window starting at or before `now`; return the newly
    /// revealed ones.
    pub fn reveal_due(&mut self, now: Tick) -> &[ClosureWindow] {
        let from = self.revealed;
        while self.revealed < self.windows.len() && self.windows[self.revealed].start <= now {
            self.revealed += 1;
        }
        &self.windows[from..self.revealed]
    }

    /// Windows known to planning so far.
    pub fn known(&self) -> &[ClosureWindow] {
        &self.windows[..self.revealed]
    }

    /// Every configured window, revealed or not.
    pub fn all(&self) -> &[ClosureWindow] {
        &self.windows
    }

    /// `true` if a known window covers `tick`.
    pub fn is_known_closed(&self, tick: Tick) -> bool {
        self.known().iter().any(|w| w.contains(tick))
    }

    /// The known window covering `tick`, if any.
    pub fn known_window_at(&self, tick: Tick) -> Option<ClosureWindow> {
        self.known().iter().copied().find(|w| w.contains(tick))
    }
}
