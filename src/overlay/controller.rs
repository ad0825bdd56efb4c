use std::time::Duration;

use tracing::{debug, warn};

use super::history::{NavigationError, NavigationHost, SessionHistory};
use super::kind::{BackResolution, OverlayKind};
use super::timer::{TimerId, TimerQueue};

/// Visibility bookkeeping for one overlay.
///
/// `active` drops the moment the overlay is closed so a second back event is
/// never routed to it; `visible` stays up until the exit animation finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayState {
    pub active: bool,
    pub closing: bool,
    pub visible: bool,
}

/// What a call to [`OverlayController::tick`] changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverlayTick {
    /// Overlays deactivated by back events delivered from the host.
    pub closed: Vec<OverlayKind>,
    /// Overlays whose exit animation finished.
    pub hidden: Vec<OverlayKind>,
}

impl OverlayTick {
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty() && self.hidden.is_empty()
    }
}

/// Keeps the open overlays in lockstep with the navigation history.
///
/// Every `open` pushes a history frame, every back event pops exactly one
/// overlay, and the actual hide runs after the overlay's exit delay on the
/// controller's clock (advanced by [`tick`](Self::tick)).
#[derive(Debug)]
pub struct OverlayController<H: NavigationHost = SessionHistory> {
    host: H,
    policy: BackResolution,
    states: [OverlayState; 4],
    stack: Vec<OverlayKind>,
    hide_timers: [Option<TimerId>; 4],
    timers: TimerQueue<OverlayKind>,
    scroll_lock: Option<OverlayKind>,
    now: Duration,
}

impl Default for OverlayController<SessionHistory> {
    fn default() -> Self {
        Self::new(SessionHistory::new(), BackResolution::default())
    }
}

impl<H: NavigationHost> OverlayController<H> {
    pub fn new(host: H, policy: BackResolution) -> Self {
        Self {
            host,
            policy,
            states: [OverlayState::default(); 4],
            stack: Vec::new(),
            hide_timers: [None; 4],
            timers: TimerQueue::new(),
            scroll_lock: None,
            now: Duration::ZERO,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn policy(&self) -> BackResolution {
        self.policy
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn state(&self, kind: OverlayKind) -> OverlayState {
        self.states[kind.index()]
    }

    pub fn is_active(&self, kind: OverlayKind) -> bool {
        self.states[kind.index()].active
    }

    pub fn is_visible(&self, kind: OverlayKind) -> bool {
        self.states[kind.index()].visible
    }

    /// Open overlays, bottom first.
    pub fn stack(&self) -> &[OverlayKind] {
        &self.stack
    }

    pub fn top(&self) -> Option<OverlayKind> {
        self.stack.last().copied()
    }

    pub fn any_active(&self) -> bool {
        self.states.iter().any(|s| s.active)
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_some()
    }

    pub fn scroll_lock_holder(&self) -> Option<OverlayKind> {
        self.scroll_lock
    }

    pub fn hide_pending(&self, kind: OverlayKind) -> bool {
        self.hide_timers[kind.index()].is_some_and(|id| self.timers.is_pending(id))
    }

    /// Everything that should be drawn, in paint order: open overlays bottom
    /// to top, then overlays still playing their exit animation.
    pub fn paint_order(&self) -> Vec<OverlayKind> {
        let mut order = self.stack.clone();
        order.extend(
            OverlayKind::ALL
                .into_iter()
                .filter(|k| self.states[k.index()].closing && self.states[k.index()].visible),
        );
        order
    }

    /// Present `kind`. Returns `false` if it was already open.
    pub fn open(&mut self, kind: OverlayKind) -> bool {
        if self.is_active(kind) {
            warn!(overlay = %kind, "open ignored: overlay already active");
            return false;
        }
        if let Some(id) = self.hide_timers[kind.index()].take() {
            self.timers.cancel(id);
            debug!(overlay = %kind, "cancelled pending hide on reopen");
        }
        match self.host.push(kind) {
            Ok(frame) => debug!(overlay = %kind, seq = frame.seq, "pushed history frame"),
            Err(NavigationError::Unavailable) => {
                debug!(overlay = %kind, "history unavailable, opening without a frame")
            }
        }
        self.states[kind.index()] = OverlayState {
            active: true,
            closing: false,
            visible: true,
        };
        self.stack.push(kind);
        if kind.locks_scroll() {
            self.scroll_lock = Some(kind);
        }
        debug!(overlay = %kind, depth = self.stack.len(), "overlay opened");
        true
    }

    /// Request a programmatic close. The state flip happens when the host
    /// delivers the back event, so gesture and button share one path.
    pub fn dismiss(&mut self, kind: OverlayKind) -> bool {
        if !self.is_active(kind) {
            debug!(overlay = %kind, "dismiss ignored: overlay not active");
            return false;
        }
        if self.top() != Some(kind) {
            warn!(overlay = %kind, top = ?self.top(), "dismissing an overlay that is not on top");
        }
        match self.host.back() {
            Ok(()) => {}
            Err(NavigationError::Unavailable) => {
                self.deactivate(kind);
            }
        }
        true
    }

    /// Back gesture: dismiss whichever overlay the back event would close.
    /// Returns `false` when no overlay is open and the gesture should fall
    /// through to the screen underneath.
    pub fn back(&mut self) -> bool {
        match self.resolve() {
            Some(kind) => self.dismiss(kind),
            None => false,
        }
    }

    fn resolve(&self) -> Option<OverlayKind> {
        match self.policy {
            BackResolution::Stack => self
                .stack
                .iter()
                .rev()
                .copied()
                .find(|k| self.is_active(*k)),
            BackResolution::Priority => OverlayKind::PRIORITY
                .into_iter()
                .find(|k| self.is_active(*k)),
        }
    }

    /// Handle one popped history frame. Closes at most one overlay.
    pub fn on_navigate_back(&mut self) -> Option<OverlayKind> {
        let kind = self.resolve()?;
        self.deactivate(kind);
        Some(kind)
    }

    /// Close `kind` now and schedule its hide after the exit delay.
    ///
    /// On an overlay that is already inactive this only replaces the pending
    /// hide; there is never more than one hide queued per overlay.
    pub fn deactivate(&mut self, kind: OverlayKind) {
        let idx = kind.index();
        self.states[idx].active = false;
        self.states[idx].closing = true;
        if let Some(pos) = self.stack.iter().rposition(|k| *k == kind) {
            self.stack.remove(pos);
        }
        if let Some(id) = self.hide_timers[idx].take() {
            self.timers.cancel(id);
        }
        let deadline = self.now + kind.hide_delay();
        self.hide_timers[idx] = Some(self.timers.schedule(deadline, kind));
        debug!(overlay = %kind, ?deadline, "overlay closing");
    }

    /// Drain back events the host has delivered.
    pub fn pump_navigation(&mut self) -> Vec<OverlayKind> {
        let mut closed = Vec::new();
        while let Some(frame) = self.host.poll_back() {
            match self.on_navigate_back() {
                Some(kind) => {
                    if kind != frame.kind {
                        debug!(frame = %frame.kind, closed = %kind, "back frame tag differs from closed overlay");
                    }
                    closed.push(kind);
                }
                None => debug!(frame = %frame.kind, "back event with no active overlay"),
            }
        }
        closed
    }

    /// Advance the clock to `now`, deliver back events and run due hides.
    pub fn tick(&mut self, now: Duration) -> OverlayTick {
        self.now = self.now.max(now);
        let closed = self.pump_navigation();
        let mut hidden = Vec::new();
        for (id, kind) in self.timers.drain_due(self.now) {
            let idx = kind.index();
            if self.hide_timers[idx] == Some(id) {
                self.hide_timers[idx] = None;
            }
            self.hide(kind);
            hidden.push(kind);
        }
        OverlayTick { closed, hidden }
    }

    fn hide(&mut self, kind: OverlayKind) {
        let state = &mut self.states[kind.index()];
        state.visible = false;
        state.closing = false;
        if self.scroll_lock == Some(kind) {
            self.scroll_lock = self
                .stack
                .iter()
                .rev()
                .copied()
                .find(|k| k.locks_scroll() && self.states[k.index()].active);
        }
        debug!(overlay = %kind, scroll_lock = ?self.scroll_lock, "overlay hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn open_pushes_frame_and_locks_scroll() {
        let mut c = OverlayController::default();
        assert!(c.open(OverlayKind::Order));
        assert_eq!(c.host().depth(), 1);
        assert!(c.is_active(OverlayKind::Order));
        assert!(c.is_visible(OverlayKind::Order));
        assert_eq!(c.scroll_lock_holder(), Some(OverlayKind::Order));
    }

    #[test]
    fn reminder_does_not_take_scroll_lock() {
        let mut c = OverlayController::default();
        c.open(OverlayKind::Reminder);
        assert!(!c.scroll_locked());
    }

    #[test]
    fn open_is_idempotent() {
        let mut c = OverlayController::default();
        assert!(c.open(OverlayKind::Salary));
        assert!(!c.open(OverlayKind::Salary));
        assert_eq!(c.stack(), &[OverlayKind::Salary]);
        assert_eq!(c.host().depth(), 1);
    }

    #[test]
    fn back_with_nothing_open_is_noop() {
        let mut c = OverlayController::default();
        assert_eq!(c.on_navigate_back(), None);
        assert!(!c.back());
    }

    #[test]
    fn deactivate_twice_keeps_single_hide() {
        let mut c = OverlayController::default();
        c.open(OverlayKind::Salary);
        c.deactivate(OverlayKind::Salary);
        c.tick(ms(100));
        c.deactivate(OverlayKind::Salary);
        assert!(!c.is_active(OverlayKind::Salary));
        assert!(c.hide_pending(OverlayKind::Salary));
        // first deadline (300ms) was replaced by 400ms
        let t = c.tick(ms(300));
        assert!(t.hidden.is_empty());
        let t = c.tick(ms(400));
        assert_eq!(t.hidden, vec![OverlayKind::Salary]);
        assert!(c.tick(ms(2000)).hidden.is_empty());
    }

    #[test]
    fn scroll_lock_passes_back_to_underlying_overlay() {
        let mut c = OverlayController::default();
        c.open(OverlayKind::Salary);
        c.open(OverlayKind::Payment);
        assert_eq!(c.scroll_lock_holder(), Some(OverlayKind::Payment));
        c.on_navigate_back();
        c.tick(ms(400));
        assert_eq!(c.scroll_lock_holder(), Some(OverlayKind::Salary));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut c = OverlayController::default();
        c.tick(ms(500));
        c.tick(ms(100));
        assert_eq!(c.now(), ms(500));
    }

    #[test]
    fn paint_order_keeps_closing_overlay_on_top() {
        let mut c = OverlayController::default();
        c.open(OverlayKind::Order);
        c.open(OverlayKind::Reminder);
        c.on_navigate_back();
        assert_eq!(
            c.paint_order(),
            vec![OverlayKind::Order, OverlayKind::Reminder]
        );
        c.tick(ms(300));
        assert_eq!(c.paint_order(), vec![OverlayKind::Order]);
    }
}
