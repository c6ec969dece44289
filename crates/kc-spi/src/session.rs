//! Keycloak session management.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::registry::SpiRegistry;

/// A Keycloak session represents a unit of work.
///
/// Sessions give providers access to the registry while they are being
/// created.
#[derive(Debug)]
pub struct KeycloakSession {
    /// Unique session identifier.
    id: Uuid,

    /// Reference to the SPI registry.
    registry: Arc<SpiRegistry>,

    /// Whether this session has been closed.
    closed: RwLock<bool>,
}

impl KeycloakSession {
    /// Creates a new session.
    #[must_use]
    pub fn new(registry: Arc<SpiRegistry>) -> Self {
        Self {
            id: Uuid::now_v7(),
            registry,
            closed: RwLock::new(false),
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the SPI registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<SpiRegistry> {
        &self.registry
    }

    /// Closes the session.
    ///
    /// After closing, the session should not be used.
    pub fn close(&self) {
        *self.closed.write() = true;
    }
}

impl Drop for KeycloakSession {
    fn drop(&mut self) {
        if !*self.closed.read() {
            tracing::trace!(session = %self.id, "closing session on drop");
            self.close();
        }
    }
}
