//! Price display helpers.
//!
//! Catalog prices are whole Yemeni rials. The dollar figure shown next to
//! them is derived with a fixed divisor and kept in integer cents so the two
//! decimals never pick up float noise.

use std::fmt;

/// Rials per dollar used to derive the secondary price.
pub const DEFAULT_USD_DIVISOR: u64 = 530;

/// Shown wherever a package carries no price.
pub const MISSING_PRICE: &str = "---";

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const ARABIC_GROUP_SEPARATOR: char = '٬';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UsdAmount {
    cents: u64,
}

impl UsdAmount {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// `price_yer / divisor`, rounded half-up to the cent. A zero divisor
    /// falls back to the default rate.
    pub fn from_yer(price_yer: u64, divisor: u64) -> Self {
        let divisor = if divisor == 0 {
            DEFAULT_USD_DIVISOR
        } else {
            divisor
        };
        let scaled = u128::from(price_yer) * 100;
        let divisor = u128::from(divisor);
        let cents = (scaled * 2 + divisor) / (divisor * 2);
        Self {
            cents: u64::try_from(cents).unwrap_or(u64::MAX),
        }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }
}

impl fmt::Display for UsdAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Format a rial amount the way the `ar-YE` locale does: Arabic-Indic
/// digits grouped by thousands.
pub fn format_yer(amount: u64) -> String {
    let digits: Vec<char> = amount
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| ARABIC_DIGITS[d as usize])
        .collect();
    let mut out = String::with_capacity(digits.len() * 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(ARABIC_GROUP_SEPARATOR);
        }
        out.push(*digit);
    }
    out
}

/// Both renderings of an optional package price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLabel {
    pub yer: String,
    pub usd: String,
}

impl PriceLabel {
    pub fn new(price_yer: Option<u64>, divisor: u64) -> Self {
        match price_yer {
            Some(price) if price > 0 => Self {
                yer: format_yer(price),
                usd: UsdAmount::from_yer(price, divisor).to_string(),
            },
            _ => Self {
                yer: MISSING_PRICE.to_string(),
                usd: MISSING_PRICE.to_string(),
            },
        }
    }
}
