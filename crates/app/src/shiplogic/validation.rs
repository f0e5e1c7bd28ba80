//! Request validation.
//!
//! Requests are checked before they leave the process so malformed input never reaches the
//! provider.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use taper::addresses::{Address, AddressField};

use crate::shiplogic::wire::{RateRequest, ShipmentRequest, WireParcel};

/// Which end of a shipment an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    /// Pickup address
    Collection,

    /// Drop-off address
    Delivery,
}

impl Display for AddressRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collection => "Collection",
            Self::Delivery => "Delivery",
        })
    }
}

/// A parcel measurement that must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Length
    Length,

    /// Width
    Width,

    /// Height
    Height,

    /// Weight
    Weight,
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
            Self::Weight => "weight",
        })
    }
}

/// A request that must not be sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required address field is blank.
    #[error("{role} {field} is required")]
    MissingAddressField {
        /// Address with the blank field
        role: AddressRole,

        /// Blank field
        field: AddressField,
    },

    /// The request has no parcels.
    #[error("At least one parcel is required")]
    NoParcels,

    /// A parcel measurement is zero, negative or not a number.
    #[error("Parcel {index} {measurement} is required")]
    InvalidParcel {
        /// 1-based parcel position
        index: usize,

        /// Offending measurement
        measurement: Measurement,
    },

    /// A shipment was requested without a service level.
    #[error("Service level code is required")]
    MissingServiceLevel,

    /// A tracking lookup was requested without a reference.
    #[error("Please provide a valid tracking number")]
    MissingTrackingReference,
}

/// Check a rate request before submission.
///
/// # Errors
///
/// Returns the first problem found, checking the collection address, then the delivery
/// address, then each parcel in order.
pub fn validate_rate_request(request: &RateRequest) -> Result<(), ValidationError> {
    validate_address(AddressRole::Collection, &request.collection_address)?;
    validate_address(AddressRole::Delivery, &request.delivery_address)?;
    validate_parcels(&request.parcels)
}

/// Check a shipment request before submission.
///
/// # Errors
///
/// Returns the first problem found, checking addresses and parcels as for rate requests and
/// then the service level code.
pub fn validate_shipment_request(request: &ShipmentRequest) -> Result<(), ValidationError> {
    validate_address(AddressRole::Collection, &request.collection_address)?;
    validate_address(AddressRole::Delivery, &request.delivery_address)?;
    validate_parcels(&request.parcels)?;

    if request.service_level_code.trim().is_empty() {
        return Err(ValidationError::MissingServiceLevel);
    }

    Ok(())
}

fn validate_address(role: AddressRole, address: &Address) -> Result<(), ValidationError> {
    match address.missing_field() {
        Some(field) => Err(ValidationError::MissingAddressField { role, field }),
        None => Ok(()),
    }
}

fn validate_parcels(parcels: &[WireParcel]) -> Result<(), ValidationError> {
    if parcels.is_empty() {
        return Err(ValidationError::NoParcels);
    }

    for (position, parcel) in parcels.iter().enumerate() {
        let invalid = |measurement| ValidationError::InvalidParcel {
            index: position + 1,
            measurement,
        };

        if parcel.submitted_length_cm == 0 {
            return Err(invalid(Measurement::Length));
        }

        if parcel.submitted_width_cm == 0 {
            return Err(invalid(Measurement::Width));
        }

        if parcel.submitted_height_cm == 0 {
            return Err(invalid(Measurement::Height));
        }

        if !(parcel.submitted_weight_kg.is_finite() && parcel.submitted_weight_kg > 0.0) {
            return Err(invalid(Measurement::Weight));
        }
    }

    Ok(())
}
