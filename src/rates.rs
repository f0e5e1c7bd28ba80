//! Rates

use jiff::{SignedDuration, Timestamp};
use rusty_money::{Money, iso::Currency};

use crate::money::zar;

/// How long a quote stays valid after it was received.
pub const QUOTE_VALIDITY: SignedDuration = SignedDuration::from_hours(24);

/// Flat price of the fallback standard tier, in cents.
pub const FALLBACK_STANDARD_PRICE: i64 = 7_500;

/// Flat price of the fallback express tier, in cents.
pub const FALLBACK_EXPRESS_PRICE: i64 = 15_000;

/// Courier offering a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Courier {
    /// Courier identifier
    pub id: String,

    /// Courier display name
    pub name: String,

    /// Logo URL, empty when unknown
    pub logo_url: String,
}

/// Shipping tier of a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLevel {
    /// Service level identifier
    pub id: String,

    /// Service level display name
    pub name: String,

    /// Provider code used when booking a shipment
    pub code: String,
}

/// A price and timing offer for shipping a parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    /// Quote identifier
    pub id: String,

    /// Courier
    pub courier: Courier,

    /// Shipping tier
    pub service_level: ServiceLevel,

    /// Earliest collection date
    pub collection_date: Option<String>,

    /// Start of the delivery window
    pub delivery_from: Option<String>,

    /// End of the delivery window
    pub delivery_to: Option<String>,

    /// Human-readable delivery estimate, for tiers without dates
    pub estimate: Option<String>,

    /// Price in the store currency
    pub total: Money<'static, Currency>,

    /// When this quote expires
    pub valid_until: Timestamp,
}

/// Where the quotes of a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Live quotes from the shipping provider
    Provider,

    /// Flat-rate tiers offered while the provider is unavailable
    Fallback,
}

/// A set of quotes with the default choice made.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSelection {
    /// Quotes, in provider order
    pub quotes: Vec<RateQuote>,

    /// Identifier of the pre-selected quote
    pub selected: Option<String>,

    /// Origin of the quotes
    pub source: RateSource,
}

impl RateSelection {
    /// Select the cheapest of the given provider quotes.
    pub fn from_quotes(quotes: Vec<RateQuote>) -> Self {
        let selected = cheapest(&quotes).map(|quote| quote.id.clone());

        Self {
            quotes,
            selected,
            source: RateSource::Provider,
        }
    }

    /// The two flat-rate tiers, with standard selected.
    pub fn fallback(now: Timestamp) -> Self {
        let quotes = fallback_quotes(now);
        let selected = quotes.first().map(|quote| quote.id.clone());

        Self {
            quotes,
            selected,
            source: RateSource::Fallback,
        }
    }

    /// The pre-selected quote.
    pub fn selected_quote(&self) -> Option<&RateQuote> {
        let selected = self.selected.as_deref()?;

        self.quotes.iter().find(|quote| quote.id == selected)
    }

    /// Whether these quotes are the fallback tiers.
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

/// Returns the cheapest quote; on ties the earliest quote in the list wins.
pub fn cheapest(quotes: &[RateQuote]) -> Option<&RateQuote> {
    quotes
        .iter()
        .min_by(|a, b| a.total.amount().cmp(b.total.amount()))
}

/// Expiry of a quote received at `received_at`.
pub fn valid_until(received_at: Timestamp) -> Timestamp {
    received_at
        .checked_add(QUOTE_VALIDITY)
        .unwrap_or(Timestamp::MAX)
}

/// Flat-rate standard and express tiers.
pub fn fallback_quotes(now: Timestamp) -> Vec<RateQuote> {
    let tier = |code: &str, name: &str, estimate: &str, price: i64| RateQuote {
        id: code.to_string(),
        courier: Courier {
            id: code.to_string(),
            name: name.to_string(),
            logo_url: String::new(),
        },
        service_level: ServiceLevel {
            id: code.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        },
        collection_date: None,
        delivery_from: None,
        delivery_to: None,
        estimate: Some(estimate.to_string()),
        total: zar(price),
        valid_until: valid_until(now),
    };

    vec![
        tier(
            "standard",
            "Standard Delivery",
            "3-5 business days",
            FALLBACK_STANDARD_PRICE,
        ),
        tier(
            "express",
            "Express Delivery",
            "1-2 business days",
            FALLBACK_EXPRESS_PRICE,
        ),
    ]
}
