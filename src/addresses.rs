//! Addresses

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::countries::{HOME_COUNTRY_CODE, country_code};

/// Trading name used on the warehouse address and contact.
pub const STORE_NAME: &str = "Umi Candles";

/// Whether an address is a business or a home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    /// Business premises
    Business,

    /// Private residence
    Residential,
}

/// Postal address in the shape the shipping provider expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Business or residential
    #[serde(rename = "type")]
    pub kind: AddressKind,

    /// Company name, for business addresses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Street address
    pub street_address: String,

    /// Suburb or local area
    #[serde(default)]
    pub local_area: String,

    /// City
    pub city: String,

    /// Province, state or zone
    #[serde(default)]
    pub zone: String,

    /// ISO alpha-2 country code
    pub country: String,

    /// Postal code
    pub code: String,
}

/// A field that must be present on an address before it is sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    /// Street address
    StreetAddress,

    /// City
    City,

    /// Postal code
    PostalCode,
}

impl Display for AddressField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StreetAddress => "street address",
            Self::City => "city",
            Self::PostalCode => "postal code",
        })
    }
}

impl Address {
    /// The first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<AddressField> {
        [
            (AddressField::StreetAddress, &self.street_address),
            (AddressField::City, &self.city),
            (AddressField::PostalCode, &self.code),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Address details as captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Street address
    pub street_address: String,

    /// Suburb or local area
    #[serde(default)]
    pub local_area: String,

    /// City
    pub city: String,

    /// Province, state or zone
    #[serde(default)]
    pub zone: String,

    /// Country display name, e.g. "South Africa"
    #[serde(default)]
    pub country: String,

    /// Postal code
    pub postal_code: String,
}

impl Destination {
    /// Residential delivery address for this destination.
    pub fn to_address(&self) -> Address {
        let country = if self.country.trim().is_empty() {
            HOME_COUNTRY_CODE
        } else {
            country_code(&self.country)
        };

        Address {
            kind: AddressKind::Residential,
            company: None,
            street_address: self.street_address.trim().to_string(),
            local_area: self.local_area.trim().to_string(),
            city: self.city.trim().to_string(),
            zone: self.zone.trim().to_string(),
            country: country.to_string(),
            code: self.postal_code.trim().to_string(),
        }
    }
}

/// A person or business the provider can contact about a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name
    pub name: String,

    /// Mobile number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,

    /// Email address
    pub email: String,
}

/// The warehouse every shipment is collected from.
pub fn warehouse_address() -> Address {
    Address {
        kind: AddressKind::Business,
        company: Some(STORE_NAME.to_string()),
        street_address: "123 Main Street".to_string(),
        local_area: "Sandton".to_string(),
        city: "Johannesburg".to_string(),
        zone: "Gauteng".to_string(),
        country: HOME_COUNTRY_CODE.to_string(),
        code: "2196".to_string(),
    }
}

/// Contact details for collections from the warehouse.
pub fn warehouse_contact() -> Contact {
    Contact {
        name: STORE_NAME.to_string(),
        mobile_number: Some("0123456789".to_string()),
        email: "orders@umicandles.com".to_string(),
    }
}
