pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod component_context;
pub mod components;
pub mod composer;
pub mod config;
pub mod drivers;
pub mod event_loop;
pub mod keybindings;
pub mod launcher;
pub mod overlay;
pub mod prefs;
pub mod pricing;
pub mod runner;
pub mod session;
pub mod storefront;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod view;
