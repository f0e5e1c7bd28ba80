//! State

use std::sync::Arc;

use taper_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Whether error responses carry raw provider failure details
    pub(crate) expose_error_details: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, expose_error_details: bool) -> Self {
        Self {
            app,
            expose_error_details,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, expose_error_details: bool) -> Arc<Self> {
        Arc::new(Self::new(app, expose_error_details))
    }
}
