//! Service manager: named ports that open sessions.
//!
//! A port is registered with a factory. Connecting to the port builds a
//! fresh interface object and inserts it into the caller's session table,
//! much like `sm:GetService` followed by a connect on the returned port.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::error::ServiceError;
use crate::service::ServiceFramework;
use crate::session::{SessionHandle, SessionTable};

/// Builds one interface object per connection.
pub type ServiceFactory = Box<dyn Fn() -> Box<dyn ServiceFramework> + Send + Sync>;

/// Registry of named service ports.
#[derive(Default)]
pub struct ServiceManager {
    services: BTreeMap<String, ServiceFactory>,
}

impl ServiceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a port under `name`.
    ///
    /// A name can be registered once; a second registration fails and keeps
    /// the first factory.
    pub fn register_service(
        &mut self,
        name: &str,
        factory: ServiceFactory,
    ) -> Result<(), ServiceError> {
        if self.services.contains_key(name) {
            warn!("ServiceManager: {} already registered", name);
            return Err(ServiceError::AlreadyRegistered(name.to_string()));
        }
        info!("ServiceManager: registered {}", name);
        self.services.insert(name.to_string(), factory);
        Ok(())
    }

    /// Open a new session on port `name` inside `sessions`.
    pub fn connect(
        &self,
        name: &str,
        sessions: &mut SessionTable,
    ) -> Result<SessionHandle, ServiceError> {
        let factory = self
            .services
            .get(name)
            .ok_or_else(|| ServiceError::UnknownService(name.to_string()))?;
        let handle = sessions.insert(factory());
        debug!("ServiceManager: connected to {} as {}", name, handle);
        Ok(handle)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Registered port names, sorted.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}
