//! Parcels
//!
//! Shipments go out as a single box. For mixed carts the box is approximated from the combined
//! volume of every unit, without bin-packing, and is never smaller than the biggest box in the
//! cart along any axis.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// Minimum weight the provider is quoted, in kilograms.
pub const MIN_WEIGHT_KG: f64 = 0.5;

/// Declared value used when a cart has no priced items, in cents.
pub const DEFAULT_DECLARED_VALUE: u64 = 50_000;

const WIDTH_FACTOR: f64 = 0.8;
const HEIGHT_FACTOR: f64 = 0.6;

/// Packaging of a single unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Length in centimetres
    pub length_cm: u32,

    /// Width in centimetres
    pub width_cm: u32,

    /// Height in centimetres
    pub height_cm: u32,

    /// Weight in grams
    pub weight_g: u32,
}

impl BoxSpec {
    /// Box used when a product carries no packaging details.
    pub const DEFAULT: Self = Self {
        length_cm: 15,
        width_cm: 10,
        height_cm: 5,
        weight_g: 500,
    };

    /// Volume in cubic centimetres.
    pub fn volume_cm3(&self) -> u64 {
        u64::from(self.length_cm) * u64::from(self.width_cm) * u64::from(self.height_cm)
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight_g) / 1000.0
    }
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A resolved cart or order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product reference
    pub product: ProductId,

    /// Number of units
    pub quantity: NonZeroU32,

    /// Unit price in cents
    pub unit_price: u64,

    /// Packaging of one unit
    pub package: BoxSpec,
}

impl LineItem {
    /// Line total in cents.
    pub fn total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity.get()))
    }
}

/// A single parcel as submitted to the shipping provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    /// Length in centimetres
    pub length_cm: u32,

    /// Width in centimetres
    pub width_cm: u32,

    /// Height in centimetres
    pub height_cm: u32,

    /// Weight in kilograms
    pub weight_kg: f64,
}

impl Parcel {
    /// Parcel quoted for an empty cart.
    pub const DEFAULT: Self = Self {
        length_cm: 30,
        width_cm: 20,
        height_cm: 15,
        weight_kg: 1.0,
    };
}

impl Default for Parcel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Derive the parcel needed to ship the given line items together.
pub fn aggregate(items: &[LineItem]) -> Parcel {
    if items.is_empty() {
        return Parcel::DEFAULT;
    }

    // One unit ships in its own box.
    if let [item] = items
        && item.quantity.get() == 1
    {
        return Parcel {
            length_cm: item.package.length_cm,
            width_cm: item.package.width_cm,
            height_cm: item.package.height_cm,
            weight_kg: item.package.weight_kg().max(MIN_WEIGHT_KG),
        };
    }

    let mut volume: u64 = 0;
    let mut weight_kg = 0.0;
    let mut max_length = 0;
    let mut max_width = 0;
    let mut max_height = 0;

    for item in items {
        let quantity = item.quantity.get();

        max_length = max_length.max(item.package.length_cm);
        max_width = max_width.max(item.package.width_cm);
        max_height = max_height.max(item.package.height_cm);

        volume = volume.saturating_add(item.package.volume_cm3() * u64::from(quantity));
        weight_kg += item.package.weight_kg() * f64::from(quantity);
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "cart volumes are far below f64's exact integer range"
    )]
    let edge = (volume as f64).cbrt();

    Parcel {
        length_cm: max_length.max(ceil_cm(edge)),
        width_cm: max_width.max(ceil_cm(edge * WIDTH_FACTOR)),
        height_cm: max_height.max(ceil_cm(edge * HEIGHT_FACTOR)),
        weight_kg: weight_kg.max(MIN_WEIGHT_KG),
    }
}

/// Value declared to the provider for the given line items, in cents.
///
/// Falls back to [`DEFAULT_DECLARED_VALUE`] when nothing in the cart carries a price.
pub fn declared_value(items: &[LineItem]) -> u64 {
    match items
        .iter()
        .fold(0_u64, |total, item| total.saturating_add(item.total()))
    {
        0 => DEFAULT_DECLARED_VALUE,
        total => total,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is a non-negative cube root edge, clamped to the u32 range"
)]
fn ceil_cm(value: f64) -> u32 {
    value.ceil().clamp(0.0, f64::from(u32::MAX)) as u32
}
