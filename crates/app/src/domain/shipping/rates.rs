//! Rate normalization

use jiff::Timestamp;
use taper::{
    money::zar_from_major,
    rates::{Courier, RateQuote, ServiceLevel, valid_until},
};

use crate::shiplogic::wire::ProviderRate;

/// Convert provider rates into quotes, in provider order.
///
/// Quote and service level ids come from the provider's service level id. Amounts are always
/// taken as rand.
pub fn normalize(rates: Vec<ProviderRate>, received_at: Timestamp) -> Vec<RateQuote> {
    let expires = valid_until(received_at);

    rates
        .into_iter()
        .map(|rate| {
            let level = rate.service_level;
            let id = level.id.to_string();

            RateQuote {
                id: id.clone(),
                courier: Courier {
                    id: level.code.clone(),
                    name: level.name.clone(),
                    logo_url: String::new(),
                },
                service_level: ServiceLevel {
                    id,
                    name: level.name,
                    code: level.code,
                },
                collection_date: level.collection_date,
                delivery_from: level.delivery_date_from,
                delivery_to: level.delivery_date_to,
                estimate: level.description,
                total: zar_from_major(rate.rate),
                valid_until: expires,
            }
        })
        .collect()
}
