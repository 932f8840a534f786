//! Named handler factories available to declarative route tables.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::echo::EchoFactory;
use crate::handler::{HandlerFactory, SharedFactory};

/// Maps handler names used in route tables to shared factories
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, SharedFactory>,
    echo_fallback: bool,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that answers every unknown name with an [`EchoFactory`]
    #[must_use]
    pub fn echo() -> Self {
        Self {
            factories: HashMap::new(),
            echo_fallback: true,
        }
    }

    /// Register a factory under `name`, replacing any previous one
    pub fn register(&mut self, name: &str, factory: SharedFactory) {
        debug!(handler = %name, "Handler factory registered");
        self.factories.insert(name.to_string(), factory);
    }

    /// Register a concrete factory value under `name`
    pub fn register_factory<F>(&mut self, name: &str, factory: F)
    where
        F: HandlerFactory + 'static,
    {
        self.register(name, Arc::new(factory));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedFactory> {
        match self.factories.get(name) {
            Some(factory) => Some(Arc::clone(factory)),
            None if self.echo_fallback => Some(Arc::new(EchoFactory::new(name))),
            None => None,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.echo_fallback || self.factories.contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
