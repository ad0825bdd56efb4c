//! Human-readable messages sent to the store's chat.

use indoc::formatdoc;
use thiserror::Error;

use crate::catalog::{Package, Product};
use crate::pricing::{DEFAULT_USD_DIVISOR, PriceLabel};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("player id is required")]
    MissingPlayerId,
    #[error("no package selected")]
    NoSelection,
}

/// A non-empty, trimmed player identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn parse(raw: &str) -> Result<Self, OrderError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrderError::MissingPlayerId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MessageComposer {
    usd_divisor: u64,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_USD_DIVISOR)
    }
}

impl MessageComposer {
    pub fn new(usd_divisor: u64) -> Self {
        Self { usd_divisor }
    }

    pub fn usd_divisor(&self) -> u64 {
        self.usd_divisor
    }

    pub fn price(&self, package: &Package) -> PriceLabel {
        PriceLabel::new(package.price_yer, self.usd_divisor)
    }

    /// The "selected package" summary shown in the order modal.
    pub fn selection_summary(&self, product: &Product, package: &Package) -> String {
        let price = self.price(package);
        formatdoc! {"
            {amount} من {name}
            السعر: {yer} ر.ي / ${usd}",
            amount = package.amount,
            name = product.name_ar,
            yer = price.yer,
            usd = price.usd,
        }
    }

    pub fn order_message(&self, product: &Product, package: &Package, player: &PlayerId) -> String {
        let price = self.price(package);
        formatdoc! {"
            مرحباً 👋

            أريد طلب شحن من منصة XP

            📱 التطبيق: {name}
            💎 الفئة: {amount}
            💵 السعر: ${usd} / {yer} ر.ي
            🆔 Player ID: {player}

            شكراً لكم 🙏",
            name = product.name_ar,
            amount = package.amount,
            usd = price.usd,
            yer = price.yer,
            player = player.as_str(),
        }
    }

    /// Asks the store for a withdrawal walkthrough when a salary product has
    /// no tutorial video.
    pub fn tutorial_request(&self, product: &Product) -> String {
        formatdoc! {"
            مرحباً 👋

            أريد طلب شرح آلية سحب الراتب من منصة XP

            📱 البرنامج: {name}

            شكراً لكم 🙏",
            name = product.name_ar,
        }
    }
}
