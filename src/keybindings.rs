use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Back gesture: closes the top overlay, then leaves the screen
    Back,
    Accept,
    Up,
    Down,
    // Home screen
    FocusSearch,
    ClearSearch,
    NextFilter,
    PrevFilter,
    DismissBanner,
    // Overlays
    Copy,
    OpenPayment,
    OpenTutorial,
    ContactStore,
    // Global
    ToggleTheme,
    ToggleDebugLog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::Back => "Back / close",
            Action::Accept => "Select / confirm",
            Action::Up => "Up",
            Action::Down => "Down",
            Action::FocusSearch => "Search",
            Action::ClearSearch => "Clear search",
            Action::NextFilter => "Next filter",
            Action::PrevFilter => "Previous filter",
            Action::DismissBanner => "Hide tutorial banner",
            Action::Copy => "Copy",
            Action::OpenPayment => "Payment methods",
            Action::OpenTutorial => "Tutorial",
            Action::ContactStore => "Contact store",
            Action::ToggleTheme => "Toggle theme",
            Action::ToggleDebugLog => "Debug log",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(Quit, KeyCombo::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        kb.add(Back, KeyCombo::plain(KeyCode::Esc));
        kb.add(Back, KeyCombo::plain(KeyCode::Backspace));
        kb.add(Accept, KeyCombo::plain(KeyCode::Enter));
        kb.add(Up, KeyCombo::plain(KeyCode::Up));
        kb.add(Up, KeyCombo::plain(KeyCode::Char('k')));
        kb.add(Down, KeyCombo::plain(KeyCode::Down));
        kb.add(Down, KeyCombo::plain(KeyCode::Char('j')));
        kb.add(FocusSearch, KeyCombo::plain(KeyCode::Char('/')));
        kb.add(ClearSearch, KeyCombo::plain(KeyCode::Char('r')));
        kb.add(NextFilter, KeyCombo::plain(KeyCode::Tab));
        kb.add(PrevFilter, KeyCombo::plain(KeyCode::BackTab));
        kb.add(DismissBanner, KeyCombo::plain(KeyCode::Char('x')));
        kb.add(Copy, KeyCombo::plain(KeyCode::Char('c')));
        kb.add(OpenPayment, KeyCombo::plain(KeyCode::Char('p')));
        kb.add(OpenTutorial, KeyCombo::plain(KeyCode::Char('v')));
        kb.add(ContactStore, KeyCombo::plain(KeyCode::Char('w')));
        kb.add(ToggleTheme, KeyCombo::plain(KeyCode::Char('t')));
        kb.add(ToggleDebugLog, KeyCombo::plain(KeyCode::F(12)));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// First action among `candidates` bound to `key`. Contexts pass the
    /// actions they understand so overlapping keys resolve per screen.
    pub fn resolve(&self, key: &KeyEvent, candidates: &[Action]) -> Option<Action> {
        candidates.iter().copied().find(|a| self.matches(*a, key))
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }

    /// "Key: action" hints for the status bar.
    pub fn hints(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .filter_map(|a| self.first_combo(*a).map(|c| format!("{}: {}", c, a)))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
    }

    #[test]
    fn resolve_respects_candidate_order() {
        let kb = KeyBindings::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(kb.resolve(&esc, &[Action::Accept, Action::Back]), Some(Action::Back));
        assert_eq!(kb.resolve(&esc, &[Action::Accept]), None);
    }

    #[test]
    fn hints_use_first_combo() {
        let kb = KeyBindings::default();
        assert_eq!(kb.hints(&[Action::Back]), "Esc: Back / close");
    }
}
