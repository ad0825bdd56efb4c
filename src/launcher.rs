//! Opening chats and links outside the terminal.

use thiserror::Error;
use tracing::info;

/// Store contact used when no other number is configured.
pub const DEFAULT_CONTACT_NUMBER: &str = "967775211618";

const CHAT_BASE_URL: &str = "https://wa.me";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("could not open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Chat link for `number`, pre-filled with `text` when given.
pub fn chat_url(number: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => format!(
            "{CHAT_BASE_URL}/{number}?text={}",
            urlencoding::encode(text)
        ),
        None => format!("{CHAT_BASE_URL}/{number}"),
    }
}

/// Something that can hand a URL to the outside world. Fire and forget:
/// success only means the hand-off happened.
pub trait MessagingLauncher {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError>;
}

/// Opens URLs with the platform browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLauncher;

impl MessagingLauncher for BrowserLauncher {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        info!(%url, "opening in browser");
        webbrowser::open(url).map_err(|source| LaunchError::Open {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_chat_url() {
        assert_eq!(chat_url("967775211618", None), "https://wa.me/967775211618");
    }

    #[test]
    fn text_is_percent_encoded() {
        let url = chat_url("1", Some("hi there\n🆔 ID: 5&6"));
        assert_eq!(
            url,
            "https://wa.me/1?text=hi%20there%0A%F0%9F%86%94%20ID%3A%205%266"
        );
    }
}
