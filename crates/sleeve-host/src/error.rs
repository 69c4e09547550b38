//! Error types for placement hosts.

use thiserror::Error;

use sleeve_model::ElementId;

/// Errors that can occur while mutating a placement host.
#[derive(Error, Debug)]
pub enum HostError {
    /// Opening template not loaded in the host.
    #[error("opening template {0} not found")]
    TemplateNotFound(ElementId),

    /// Placement attempted against a template that was never activated.
    #[error("opening template '{family}' is not active")]
    InactiveTemplate {
        /// Family name of the inactive template.
        family: String,
    },

    /// Parameter write against an instance the host does not contain.
    #[error("instance {0} not found")]
    InstanceNotFound(ElementId),

    /// The template family does not expose the requested parameter.
    #[error("family '{family}' has no parameter '{name}'")]
    MissingParameter {
        /// Family name of the instance's template.
        family: String,
        /// The parameter that was looked up.
        name: String,
    },
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
