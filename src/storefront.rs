//! Application state of the store and every user-facing operation.
//!
//! `Storefront` owns the catalog, the session, the overlay controller and
//! the collaborators that reach outside the terminal (launcher, clipboard,
//! preference file). Keys are translated to operations in
//! [`handle_key`](Storefront::handle_key); views only read from it.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent};
use tracing::{debug, error, info, warn};

use crate::catalog::{Catalog, CatalogError, CatalogView, CategoryFilter, Package, Product};
use crate::clipboard::{COPY_FEEDBACK_DURATION, ClipboardSink, CopyFeedback, SystemClipboard};
use crate::components::{Component, ComponentContext, TextInputComponent};
use crate::composer::{MessageComposer, OrderError, PlayerId};
use crate::config::{PaymentMethod, StoreConfig};
use crate::keybindings::{Action, KeyBindings};
use crate::launcher::{BrowserLauncher, MessagingLauncher, chat_url};
use crate::overlay::{
    NavigationHost, OverlayController, OverlayKind, SessionHistory, TimerId, TimerQueue,
};
use crate::prefs::PreferenceStore;
use crate::session::Session;
use crate::theme::{Palette, ThemeMode};

/// Length of the shake played on an empty player id.
pub const INPUT_SHAKE_DURATION: Duration = Duration::from_millis(300);
/// Length of the tutorial banner's closing animation.
pub const BANNER_CLOSE_DURATION: Duration = Duration::from_millis(400);

const SHAKE_OFFSETS: [i16; 4] = [0, -2, 2, 0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Details(DetailsScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsScreen {
    Ready { product_id: String, cursor: usize },
    /// Unknown id or no catalog: the error state of the details page.
    Missing { requested: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Shown,
    Closing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Withdraw,
    Payment,
}

impl CopyTarget {
    const fn index(self) -> usize {
        match self {
            CopyTarget::Withdraw => 0,
            CopyTarget::Payment => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiTimer {
    CopyReset(CopyTarget),
    BannerRemoved,
    NoticeCleared,
}

#[derive(Debug)]
pub struct HomeState {
    pub search: TextInputComponent,
    pub search_focused: bool,
    pub filter: CategoryFilter,
    pub cursor: usize,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            search: TextInputComponent::new("بحث", "ابحث عن تطبيق أو لعبة… (/)"),
            search_focused: false,
            filter: CategoryFilter::All,
            cursor: 0,
        }
    }
}

pub struct Storefront<H: NavigationHost = SessionHistory> {
    catalog: Catalog,
    catalog_error: Option<String>,
    composer: MessageComposer,
    contact_number: String,
    payment_methods: Vec<PaymentMethod>,
    overlays: OverlayController<H>,
    session: Session,
    screen: Screen,
    home: HomeState,
    prefs: PreferenceStore,
    theme: ThemeMode,
    banner: BannerState,
    order_input: TextInputComponent,
    shake_until: Option<Duration>,
    payment_cursor: usize,
    copy_feedback: [CopyFeedback; 2],
    copy_timers: [Option<TimerId>; 2],
    timers: TimerQueue<UiTimer>,
    launcher: Box<dyn MessagingLauncher>,
    clipboard: Box<dyn ClipboardSink>,
    keys: KeyBindings,
    notice: Option<String>,
    notice_timer: Option<TimerId>,
    debug_log_visible: bool,
    quit: bool,
    now: Duration,
}

impl<H: NavigationHost> Storefront<H> {
    pub fn new(catalog: Catalog, config: &StoreConfig, prefs: PreferenceStore, host: H) -> Self {
        let theme = prefs.theme().unwrap_or_else(ThemeMode::detect);
        let banner = if prefs.tutorial_banner_closed() {
            BannerState::Closed
        } else {
            BannerState::Shown
        };
        Self {
            catalog,
            catalog_error: None,
            composer: MessageComposer::new(config.usd_divisor),
            contact_number: config.contact_number.clone(),
            payment_methods: config.payment_methods.clone(),
            overlays: OverlayController::new(host, config.back_policy),
            session: Session::new(),
            screen: Screen::Home,
            home: HomeState::default(),
            prefs,
            theme,
            banner,
            order_input: TextInputComponent::new("Player ID", "أدخل معرف اللاعب"),
            shake_until: None,
            payment_cursor: 0,
            copy_feedback: [CopyFeedback::Idle; 2],
            copy_timers: [None; 2],
            timers: TimerQueue::new(),
            launcher: Box::new(BrowserLauncher),
            clipboard: Box::new(SystemClipboard),
            keys: KeyBindings::default(),
            notice: None,
            notice_timer: None,
            debug_log_visible: false,
            quit: false,
            now: Duration::ZERO,
        }
    }

    pub fn with_launcher(mut self, launcher: impl MessagingLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_catalog_error(mut self, err: &CatalogError) -> Self {
        self.catalog_error = Some(err.to_string());
        self
    }

    // ---- read side -------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    pub fn overlays(&self) -> &OverlayController<H> {
        &self.overlays
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn home_view(&self) -> CatalogView<'_> {
        self.catalog
            .filter(self.home.search.value(), self.home.filter)
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn context(&self) -> ComponentContext {
        ComponentContext::new(self.palette())
    }

    pub fn banner(&self) -> BannerState {
        self.banner
    }

    pub fn order_input(&self) -> &TextInputComponent {
        &self.order_input
    }

    /// Current shake offset of the player id field.
    pub fn order_input_shift(&self) -> i16 {
        match self.shake_until {
            Some(until) if self.now < until => {
                let remaining = (until - self.now).as_millis() as usize;
                let step = remaining * SHAKE_OFFSETS.len() / INPUT_SHAKE_DURATION.as_millis() as usize;
                SHAKE_OFFSETS[step.min(SHAKE_OFFSETS.len() - 1)]
            }
            _ => 0,
        }
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn payment_cursor(&self) -> usize {
        self.payment_cursor
    }

    pub fn copy_feedback(&self, target: CopyTarget) -> CopyFeedback {
        self.copy_feedback[target.index()]
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn debug_log_visible(&self) -> bool {
        self.debug_log_visible
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Product shown on the details screen.
    pub fn current_product(&self) -> Option<&Product> {
        self.session
            .current_product()
            .and_then(|id| self.catalog.find(id))
    }

    pub fn salary_product(&self) -> Option<&Product> {
        self.session
            .salary_product()
            .and_then(|id| self.catalog.find(id))
    }

    pub fn selected_package(&self) -> Option<(&Product, &Package)> {
        let product = self.current_product()?;
        let package = product.packages.get(self.session.selected_package()?)?;
        Some((product, package))
    }

    // ---- clock -----------------------------------------------------------

    /// Advance to `now`: deliver back events, run overlay hides and UI timers.
    pub fn tick(&mut self, now: Duration) {
        self.now = self.now.max(now);
        let tick = self.overlays.tick(self.now);
        self.drop_orphaned_message();
        for kind in tick.hidden {
            self.on_overlay_hidden(kind);
        }
        for (_, timer) in self.timers.drain_due(self.now) {
            match timer {
                UiTimer::CopyReset(target) => {
                    self.copy_feedback[target.index()] = CopyFeedback::Idle;
                    self.copy_timers[target.index()] = None;
                }
                UiTimer::BannerRemoved => self.banner = BannerState::Closed,
                UiTimer::NoticeCleared => {
                    self.notice = None;
                    self.notice_timer = None;
                }
            }
        }
    }

    fn sync_navigation(&mut self) {
        let closed = self.overlays.pump_navigation();
        if !closed.is_empty() {
            debug!(?closed, "overlays closed by back events");
        }
        self.drop_orphaned_message();
    }

    /// A pending order message lives only as long as the reminder is open.
    fn drop_orphaned_message(&mut self) {
        if self.session.has_pending_message() && !self.overlays.is_active(OverlayKind::Reminder) {
            debug!("reminder closed without redirect, dropping pending message");
            self.session.clear_pending_message();
        }
    }

    fn on_overlay_hidden(&mut self, kind: OverlayKind) {
        match kind {
            OverlayKind::Order => {
                self.session.clear_selection();
                self.order_input.clear();
                self.shake_until = None;
            }
            OverlayKind::Salary => self.session.set_salary_product(None),
            OverlayKind::Payment => self.payment_cursor = 0,
            OverlayKind::Reminder => {}
        }
    }

    // ---- navigation ------------------------------------------------------

    /// Back gesture: close the top overlay, otherwise leave the screen.
    pub fn back(&mut self) {
        if self.overlays.back() {
            self.sync_navigation();
            return;
        }
        match self.screen {
            Screen::Details(_) => {
                info!("leaving details screen");
                self.session.set_current_product(None);
                self.screen = Screen::Home;
            }
            Screen::Home => {
                self.home.search_focused = false;
            }
        }
    }

    pub fn dismiss(&mut self, kind: OverlayKind) {
        if self.overlays.dismiss(kind) {
            self.sync_navigation();
        }
    }

    pub fn show_details(&mut self, id: &str) {
        match self.catalog.find(id) {
            Some(product) => {
                info!(product = %product.id, "showing details");
                self.session.set_current_product(Some(product.id.clone()));
                self.screen = Screen::Details(DetailsScreen::Ready {
                    product_id: product.id.clone(),
                    cursor: 0,
                });
            }
            None => {
                warn!(product = %id, "product not found");
                self.session.set_current_product(None);
                self.screen = Screen::Details(DetailsScreen::Missing {
                    requested: id.to_string(),
                });
            }
        }
    }

    /// Home card activation: salary cards open their modal, the rest open
    /// the details screen.
    pub fn open_product(&mut self, id: &str) {
        match self.catalog.find(id) {
            Some(product) if product.is_salary() => {
                let id = product.id.clone();
                self.open_salary(&id);
            }
            _ => self.show_details(id),
        }
    }

    pub fn open_salary(&mut self, id: &str) -> bool {
        let Some(product) = self.catalog.find(id) else {
            warn!(product = %id, "salary product not found");
            return false;
        };
        info!(product = %product.id, "opening salary modal");
        self.session.set_salary_product(Some(product.id.clone()));
        self.copy_feedback[CopyTarget::Withdraw.index()] = CopyFeedback::Idle;
        self.overlays.open(OverlayKind::Salary)
    }

    pub fn open_payment(&mut self) -> bool {
        self.payment_cursor = 0;
        self.overlays.open(OverlayKind::Payment)
    }

    // ---- order flow ------------------------------------------------------

    /// Pick package `index` of the product on the details screen and open
    /// the order modal.
    pub fn select_package(&mut self, index: usize) -> bool {
        let Some(product) = self.current_product() else {
            return false;
        };
        if index >= product.packages.len() {
            return false;
        }
        info!(product = %product.id, package = index, "package selected");
        if let Screen::Details(DetailsScreen::Ready { cursor, .. }) = &mut self.screen {
            *cursor = index;
        }
        self.session.select_package(index);
        self.order_input.clear();
        self.shake_until = None;
        self.overlays.open(OverlayKind::Order)
    }

    pub fn set_player_id(&mut self, value: &str) {
        self.order_input.set_value(value);
        self.order_input.set_invalid(false);
    }

    /// Compose the order message and ask for the redirect confirmation.
    pub fn confirm_order(&mut self) -> Result<(), OrderError> {
        let player = match PlayerId::parse(self.order_input.value()) {
            Ok(player) => player,
            Err(err) => {
                debug!("order confirmed without player id");
                self.order_input.set_invalid(true);
                self.shake_until = Some(self.now + INPUT_SHAKE_DURATION);
                return Err(err);
            }
        };
        let Some((product, package)) = self.selected_package() else {
            error!("order confirmed with no product or package selected");
            return Err(OrderError::NoSelection);
        };
        let message = self.composer.order_message(product, package, &player);
        info!(product = %product.id, package = %package.amount, "order composed");
        self.order_input.set_invalid(false);
        self.session.set_pending_message(message);
        self.overlays.open(OverlayKind::Reminder);
        Ok(())
    }

    /// Salary-page contact button: reminder without an order message.
    pub fn contact_store(&mut self) -> bool {
        self.session.clear_pending_message();
        self.overlays.open(OverlayKind::Reminder)
    }

    /// Reminder confirmed: close it and open the chat, pre-filled with the
    /// pending order message if there is one.
    pub fn confirm_redirect(&mut self) {
        let message = self.session.take_pending_message();
        self.dismiss(OverlayKind::Reminder);
        let url = chat_url(&self.contact_number, message.as_deref());
        self.launch(&url);
    }

    /// Salary tutorial button: the video when there is one, otherwise a chat
    /// asking for a walkthrough.
    pub fn request_tutorial(&mut self) {
        let Some(product) = self.salary_product() else {
            return;
        };
        let url = match product.tutorial_link() {
            Some(link) => link.to_string(),
            None => {
                let text = self.composer.tutorial_request(product);
                chat_url(&self.contact_number, Some(&text))
            }
        };
        self.launch(&url);
    }

    fn launch(&mut self, url: &str) {
        match self.launcher.launch(url) {
            Ok(()) => self.notice = None,
            Err(err) => {
                warn!(error = %err, "launch failed");
                self.notice = Some(format!("تعذر فتح الرابط: {url}"));
                if let Some(id) = self.notice_timer.take() {
                    self.timers.cancel(id);
                }
                self.notice_timer = Some(
                    self.timers
                        .schedule(self.now + COPY_FEEDBACK_DURATION, UiTimer::NoticeCleared),
                );
            }
        }
    }

    // ---- clipboard -------------------------------------------------------

    pub fn copy_withdraw_reference(&mut self) {
        let Some(reference) = self
            .salary_product()
            .and_then(|p| p.withdraw_link.clone())
        else {
            return;
        };
        self.copy(CopyTarget::Withdraw, &reference);
    }

    pub fn copy_payment_account(&mut self) {
        let Some(account) = self
            .payment_methods
            .get(self.payment_cursor)
            .map(|m| m.account.clone())
        else {
            return;
        };
        self.copy(CopyTarget::Payment, &account);
    }

    fn copy(&mut self, target: CopyTarget, text: &str) {
        let feedback = match self.clipboard.set_text(text) {
            Ok(()) => CopyFeedback::Copied,
            Err(err) => {
                warn!(error = %err, "copy failed");
                CopyFeedback::Failed
            }
        };
        let idx = target.index();
        self.copy_feedback[idx] = feedback;
        if let Some(id) = self.copy_timers[idx].take() {
            self.timers.cancel(id);
        }
        self.copy_timers[idx] = Some(
            self.timers
                .schedule(self.now + COPY_FEEDBACK_DURATION, UiTimer::CopyReset(target)),
        );
    }

    // ---- preferences -----------------------------------------------------

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = ?self.theme, "theme toggled");
        if let Err(err) = self.prefs.set_theme(self.theme) {
            warn!(error = %err, "could not save theme");
        }
    }

    pub fn dismiss_banner(&mut self) {
        if self.banner != BannerState::Shown {
            return;
        }
        self.banner = BannerState::Closing;
        self.timers
            .schedule(self.now + BANNER_CLOSE_DURATION, UiTimer::BannerRemoved);
        if let Err(err) = self.prefs.close_tutorial_banner() {
            warn!(error = %err, "could not save banner preference");
        }
    }

    // ---- home screen -----------------------------------------------------

    pub fn set_search(&mut self, value: &str) {
        self.home.search.set_value(value);
        self.home.cursor = 0;
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.home.filter = filter;
        self.home.cursor = 0;
    }

    /// Empty the search box and go back to the "all" filter.
    pub fn clear_search(&mut self) {
        self.home.search.clear();
        self.set_filter(CategoryFilter::All);
    }

    fn move_cursor(&mut self, delta: isize) {
        match &mut self.screen {
            Screen::Home => {
                let len = self.catalog.filter(self.home.search.value(), self.home.filter).len();
                self.home.cursor = step(self.home.cursor, delta, len);
            }
            Screen::Details(DetailsScreen::Ready { product_id, cursor }) => {
                let len = self
                    .catalog
                    .find(product_id)
                    .map_or(0, |p| p.packages.len());
                *cursor = step(*cursor, delta, len);
            }
            Screen::Details(DetailsScreen::Missing { .. }) => {}
        }
    }

    fn activate_cursor(&mut self) {
        match &self.screen {
            Screen::Home => {
                let id = self
                    .home_view()
                    .flatten()
                    .get(self.home.cursor)
                    .map(|p| p.id.clone());
                if let Some(id) = id {
                    self.open_product(&id);
                }
            }
            Screen::Details(DetailsScreen::Ready { cursor, .. }) => {
                let index = *cursor;
                self.select_package(index);
            }
            Screen::Details(DetailsScreen::Missing { .. }) => {}
        }
    }

    // ---- input -----------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        let keys = &self.keys;
        if keys.matches(Action::Quit, &key) {
            self.quit = true;
            return;
        }
        if keys.matches(Action::ToggleDebugLog, &key) {
            self.debug_log_visible = !self.debug_log_visible;
            return;
        }
        match self.overlays.top() {
            Some(kind) => self.handle_overlay_key(kind, key),
            None => match self.screen {
                Screen::Home if self.home.search_focused => self.handle_search_key(key),
                Screen::Home => self.handle_home_key(key),
                Screen::Details(_) => self.handle_details_key(key),
            },
        }
    }

    fn handle_overlay_key(&mut self, kind: OverlayKind, key: KeyEvent) {
        use Action::*;
        match kind {
            OverlayKind::Order => match self.keys.resolve(&key, &[Accept]) {
                Some(Accept) => {
                    if let Err(err) = self.confirm_order() {
                        debug!(%err, "order not confirmed");
                    }
                }
                _ if key.code == KeyCode::Esc => self.back(),
                _ => {
                    let ctx = self.context();
                    self.order_input.handle_event(&Event::Key(key), &ctx);
                }
            },
            OverlayKind::Reminder => match self.keys.resolve(&key, &[Accept, Back]) {
                Some(Accept) => self.confirm_redirect(),
                Some(Back) => self.back(),
                _ => {}
            },
            OverlayKind::Salary => {
                match self
                    .keys
                    .resolve(&key, &[Back, Copy, OpenTutorial, ContactStore])
                {
                    Some(Back) => self.back(),
                    Some(Copy) => self.copy_withdraw_reference(),
                    Some(OpenTutorial) => self.request_tutorial(),
                    Some(ContactStore) => {
                        self.contact_store();
                    }
                    _ => {}
                }
            }
            OverlayKind::Payment => match self.keys.resolve(&key, &[Back, Up, Down, Copy, Accept]) {
                Some(Back) => self.back(),
                Some(Up) => self.payment_cursor = step(self.payment_cursor, -1, self.payment_methods.len()),
                Some(Down) => self.payment_cursor = step(self.payment_cursor, 1, self.payment_methods.len()),
                Some(Copy) | Some(Accept) => self.copy_payment_account(),
                _ => {}
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        use Action::*;
        match self.keys.resolve(&key, &[Accept, NextFilter, PrevFilter]) {
            Some(Accept) => self.home.search_focused = false,
            Some(NextFilter) => self.set_filter(self.home.filter.next()),
            Some(PrevFilter) => self.set_filter(self.home.filter.prev()),
            _ if key.code == KeyCode::Esc => self.home.search_focused = false,
            _ => {
                let ctx = self.context().with_focus(true);
                if self.home.search.handle_event(&Event::Key(key), &ctx) {
                    self.home.cursor = 0;
                }
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        use Action::*;
        let candidates = [
            Up,
            Down,
            Accept,
            FocusSearch,
            ClearSearch,
            NextFilter,
            PrevFilter,
            DismissBanner,
            OpenPayment,
            ToggleTheme,
            Back,
        ];
        match self.keys.resolve(&key, &candidates) {
            Some(Up) => self.move_cursor(-1),
            Some(Down) => self.move_cursor(1),
            Some(Accept) => self.activate_cursor(),
            Some(FocusSearch) => self.home.search_focused = true,
            Some(ClearSearch) => self.clear_search(),
            Some(NextFilter) => self.set_filter(self.home.filter.next()),
            Some(PrevFilter) => self.set_filter(self.home.filter.prev()),
            Some(DismissBanner) => self.dismiss_banner(),
            Some(OpenPayment) => {
                self.open_payment();
            }
            Some(ToggleTheme) => self.toggle_theme(),
            Some(Back) => self.back(),
            _ => {}
        }
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        use Action::*;
        match self
            .keys
            .resolve(&key, &[Up, Down, Accept, OpenPayment, ToggleTheme, Back])
        {
            Some(Up) => self.move_cursor(-1),
            Some(Down) => self.move_cursor(1),
            Some(Accept) => self.activate_cursor(),
            Some(OpenPayment) => {
                self.open_payment();
            }
            Some(ToggleTheme) => self.toggle_theme(),
            Some(Back) => self.back(),
            _ => {}
        }
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(2, 1, 3), 2);
        assert_eq!(step(1, 1, 3), 2);
        assert_eq!(step(5, 0, 0), 0);
    }
}
