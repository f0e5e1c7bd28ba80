//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use taper_app::auth::AdminIdentity;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_admin(&mut self, admin: AdminIdentity);

    fn admin_or_401(&self) -> Result<&AdminIdentity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin(&mut self, admin: AdminIdentity) {
        self.inject(admin);
    }

    fn admin_or_401(&self) -> Result<&AdminIdentity, StatusError> {
        self.obtain::<AdminIdentity>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
