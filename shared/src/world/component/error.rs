use thiserror::Error;

/// Errors that can occur during component registry lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// Component type not registered in the protocol
    #[error("Component not registered with Protocol. Must call `add_component()` during protocol initialization. Component: {component_name}")]
    ComponentNotRegistered { component_name: &'static str },

    /// Net ID lookup failed (component not found in registry)
    #[error("Component net ID {net_id} not found in registry. Must properly initialize Component with Protocol via `add_component()` function")]
    NetIdNotFound { net_id: u16 },

    /// Component kind lookup failed (component type not found in registry)
    #[error("Component kind not found in registry. Must properly initialize Component with Protocol via `add_component()` function")]
    KindNotFound,

    /// No room for another component type
    #[error("Cannot register Component {component_name}: the registry already holds the maximum of {limit} component types")]
    RegistryFull {
        component_name: &'static str,
        limit: usize,
    },
}
