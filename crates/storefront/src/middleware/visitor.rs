//! Per-visitor state extractor.
//!
//! Loads the visitor's [`Store`] and [`CheckoutFlow`] from the session.
//! Handlers mutate them in place and call [`VisitorSession::save`]; nothing
//! is written back otherwise.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::checkout::CheckoutFlow;
use crate::error::AppError;
use crate::models::session_keys;
use crate::store::Store;

/// Extractor for the visitor's store and checkout progress.
///
/// Missing state loads as empty, so a first-time visitor needs no setup.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut visitor: VisitorSession) -> Result<Json<Value>> {
///     visitor.store.clear_cart();
///     visitor.save().await?;
///     Ok(Json(json!({ "ok": true })))
/// }
/// ```
pub struct VisitorSession {
    session: Session,
    pub store: Store,
    pub checkout: CheckoutFlow,
}

impl<S> FromRequestParts<S> for VisitorSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session layer not installed".to_string()))?;

        let store = session
            .get::<Store>(session_keys::STORE)
            .await?
            .unwrap_or_default();
        let checkout = session
            .get::<CheckoutFlow>(session_keys::CHECKOUT)
            .await?
            .unwrap_or_default();

        Ok(Self {
            session,
            store,
            checkout,
        })
    }
}

impl VisitorSession {
    /// Write the store and checkout progress back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::STORE, &self.store)
            .await?;
        self.session
            .insert(session_keys::CHECKOUT, &self.checkout)
            .await?;
        Ok(())
    }
}
