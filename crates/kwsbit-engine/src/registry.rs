use crate::service_trait::InferenceService;
use kwsbit_core::InferenceError;
use std::collections::HashMap;

pub struct ServiceRegistry {
    factories: HashMap<String, fn() -> Box<dyn InferenceService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || Box::new(crate::null_service::NullService::new()));
        registry.register("simulated", || {
            Box::new(crate::simulated_service::SimulatedService::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn InferenceService>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn InferenceService>, InferenceError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| InferenceError::EngineNotFound(name.to_string()))
    }

    /// Create an engine and apply its settings.
    pub fn create_configured(
        &self,
        name: &str,
        config: &toml::Value,
    ) -> Result<Box<dyn InferenceService>, InferenceError> {
        let mut service = self.create(name)?;
        service.configure(config)?;
        Ok(service)
    }

    pub fn list_engines(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
