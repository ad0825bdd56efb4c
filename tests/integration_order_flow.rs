use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use xp_store::catalog::{BundledCatalog, Catalog};
use xp_store::clipboard::{ClipboardError, ClipboardSink, CopyFeedback};
use xp_store::composer::OrderError;
use xp_store::config::StoreConfig;
use xp_store::launcher::{LaunchError, MessagingLauncher};
use xp_store::overlay::{OverlayKind, SessionHistory};
use xp_store::prefs::PreferenceStore;
use xp_store::storefront::{BannerState, CopyTarget, Screen, Storefront};
use xp_store::theme::ThemeMode;

#[derive(Clone, Default)]
struct Launches(Rc<RefCell<Vec<String>>>);

impl Launches {
    fn urls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl MessagingLauncher for Launches {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        self.0.borrow_mut().push(url.to_string());
        Ok(())
    }
}

struct BrokenLauncher;

impl MessagingLauncher for BrokenLauncher {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        Err(LaunchError::Open {
            url: url.to_string(),
            source: std::io::Error::other("no browser"),
        })
    }
}

#[derive(Clone, Default)]
struct Clip(Rc<RefCell<Option<String>>>);

impl ClipboardSink for Clip {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.0.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Backend(arboard::Error::ClipboardNotSupported))
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn store_with(history: SessionHistory, prefs: PreferenceStore) -> (Storefront, Launches) {
    let (catalog, err) = Catalog::load_from(&BundledCatalog);
    assert!(err.is_none());
    let launches = Launches::default();
    let app = Storefront::new(catalog, &StoreConfig::default(), prefs, history)
        .with_launcher(launches.clone())
        .with_clipboard(Clip::default());
    (app, launches)
}

fn store() -> (Storefront, Launches) {
    store_with(SessionHistory::new(), PreferenceStore::in_memory())
}

fn press(app: &mut Storefront, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn decode_text(url: &str) -> String {
    let (_, text) = url.split_once("?text=").expect("pre-filled chat");
    urlencoding::decode(text).expect("utf-8").into_owned()
}

#[test]
fn order_message_reaches_chat_once() {
    let (mut app, launches) = store();
    app.show_details("pubg");
    assert!(app.select_package(2));
    assert_eq!(app.overlays().top(), Some(OverlayKind::Order));

    assert_eq!(app.confirm_order(), Err(OrderError::MissingPlayerId));
    assert!(app.order_input().invalid());
    assert!(!app.overlays().is_active(OverlayKind::Reminder));

    app.set_player_id("  51234 ");
    app.confirm_order().unwrap();
    assert_eq!(app.overlays().top(), Some(OverlayKind::Reminder));
    assert!(app.session().has_pending_message());

    app.confirm_redirect();
    assert!(!app.overlays().is_active(OverlayKind::Reminder));
    assert!(!app.session().has_pending_message());

    let urls = launches.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("https://wa.me/967775211618?text="));
    let text = decode_text(&urls[0]);
    assert!(text.contains("💎 الفئة: 660 UC"));
    assert!(text.contains("$10.00"));
    assert!(text.contains("🆔 Player ID: 51234"));
}

#[test]
fn cancelled_reminder_drops_pending_message() {
    let (mut app, launches) = store();
    app.show_details("pubg");
    app.select_package(0);
    app.set_player_id("7");
    app.confirm_order().unwrap();

    app.back();
    assert!(!app.session().has_pending_message());
    assert!(app.overlays().is_active(OverlayKind::Order));

    // a later reminder without an order opens a bare chat
    app.contact_store();
    app.confirm_redirect();
    assert_eq!(launches.urls(), vec!["https://wa.me/967775211618".to_string()]);
}

#[test]
fn order_selection_cleared_after_exit_animation() {
    let (mut app, _) = store();
    app.show_details("freefire");
    app.select_package(1);
    app.set_player_id("abc");
    app.back();
    app.tick(ms(100));
    // still drawn while closing
    assert!(app.selected_package().is_some());
    app.tick(ms(300));
    assert!(app.selected_package().is_none());
    assert!(app.order_input().value().is_empty());
}

#[test]
fn keyboard_drives_the_whole_order() {
    let (mut app, launches) = store();
    app.show_details("tiktok");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.overlays().top(), Some(OverlayKind::Order));
    for c in "user_1".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.order_input().value(), "user_");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.overlays().top(), Some(OverlayKind::Reminder));
    press(&mut app, KeyCode::Enter);
    assert_eq!(launches.urls().len(), 1);
    assert!(decode_text(&launches.urls()[0]).contains("350 Coins"));
}

#[test]
fn enter_with_empty_player_id_keeps_order_open() {
    let (mut app, launches) = store();
    app.show_details("pubg");
    app.select_package(1);
    press(&mut app, KeyCode::Enter);
    assert!(app.order_input().invalid());
    assert_eq!(app.overlays().top(), Some(OverlayKind::Order));
    assert!(!app.session().has_pending_message());
    assert!(launches.urls().is_empty());

    // typing goes through the input component again
    press(&mut app, KeyCode::Char('9'));
    assert_eq!(app.order_input().value(), "9");
    assert!(!app.order_input().invalid());
}

#[test]
fn esc_closes_overlay_before_leaving_details() {
    let (mut app, _) = store();
    app.show_details("pubg");
    app.select_package(0);
    press(&mut app, KeyCode::Esc);
    assert!(!app.overlays().is_active(OverlayKind::Order));
    assert!(matches!(app.screen(), Screen::Details(_)));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen(), &Screen::Home);
}

#[test]
fn unknown_product_shows_missing_details() {
    let (mut app, _) = store();
    app.open_product("nope");
    assert!(matches!(app.screen(), Screen::Details(_)));
    assert!(app.current_product().is_none());
    assert!(!app.select_package(0));
}

#[test]
fn order_flow_without_history() {
    let (mut app, launches) = store_with(SessionHistory::detached(), PreferenceStore::in_memory());
    app.show_details("pubg");
    app.select_package(0);
    app.set_player_id("42");
    app.confirm_order().unwrap();
    app.confirm_redirect();
    assert!(!app.overlays().is_active(OverlayKind::Reminder));
    assert!(app.overlays().is_active(OverlayKind::Order));
    assert_eq!(launches.urls().len(), 1);
}

#[test]
fn salary_card_opens_modal_and_tutorial() {
    let (mut app, launches) = store();
    app.open_product("xp-salary");
    assert_eq!(app.overlays().top(), Some(OverlayKind::Salary));
    assert_eq!(app.screen(), &Screen::Home);
    app.request_tutorial();
    assert_eq!(
        launches.urls(),
        vec!["https://youtube.com/watch?v=xp-tutorial".to_string()]
    );

    app.back();
    app.tick(ms(300));
    app.open_product("likee-salary");
    app.request_tutorial();
    let text = decode_text(&launches.urls()[1]);
    assert!(text.contains("📱 البرنامج: رواتب لايكي"));
}

#[test]
fn copy_feedback_reverts_after_two_seconds() {
    let (mut app, _) = store();
    app.open_salary("xp-salary");
    app.copy_withdraw_reference();
    assert_eq!(app.copy_feedback(CopyTarget::Withdraw), CopyFeedback::Copied);
    app.tick(ms(1500));
    // a second press restarts the countdown
    app.copy_withdraw_reference();
    app.tick(ms(2500));
    assert_eq!(app.copy_feedback(CopyTarget::Withdraw), CopyFeedback::Copied);
    app.tick(ms(3500));
    assert_eq!(app.copy_feedback(CopyTarget::Withdraw), CopyFeedback::Idle);
}

#[test]
fn clipboard_failure_is_shown_not_raised() {
    let (catalog, _) = Catalog::load_from(&BundledCatalog);
    let mut app = Storefront::new(
        catalog,
        &StoreConfig::default(),
        PreferenceStore::in_memory(),
        SessionHistory::new(),
    )
    .with_clipboard(NoClipboard)
    .with_launcher(BrokenLauncher);
    app.open_payment();
    app.copy_payment_account();
    assert_eq!(app.copy_feedback(CopyTarget::Payment), CopyFeedback::Failed);

    app.contact_store();
    app.confirm_redirect();
    assert!(app.notice().is_some());
    app.tick(ms(2000));
    assert!(app.notice().is_none());
    assert_eq!(app.copy_feedback(CopyTarget::Payment), CopyFeedback::Idle);
}

#[test]
fn preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    let (mut app, _) = store_with(
        SessionHistory::new(),
        PreferenceStore::load(&path).unwrap(),
    );
    let theme = app.theme();
    assert_eq!(app.banner(), BannerState::Shown);
    app.toggle_theme();
    app.dismiss_banner();
    assert_eq!(app.banner(), BannerState::Closing);
    app.tick(ms(400));
    assert_eq!(app.banner(), BannerState::Closed);

    let (app, _) = store_with(
        SessionHistory::new(),
        PreferenceStore::load(&path).unwrap(),
    );
    assert_eq!(app.theme(), theme.toggled());
    assert_eq!(app.banner(), BannerState::Closed);
    assert_ne!(app.theme(), theme);
    assert!(matches!(app.theme(), ThemeMode::Light | ThemeMode::Dark));
}

#[test]
fn search_and_filter_on_home() {
    let (mut app, _) = store();
    press(&mut app, KeyCode::Char('/'));
    for c in "free".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    assert_eq!(app.home_view().len(), 1);
    press(&mut app, KeyCode::Enter);
    assert!(!app.home().search_focused);
    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.home_view().len(), 5);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.home_view().salaries.len(), 2);
    assert!(app.home_view().games.is_empty());
}
