use thiserror::Error;

use widgetdeck_core::{ProviderIdentity, WidgetId};

/// Host-level failures. None of these are fatal to the process; every
/// variant maps to a user-visible diagnostic and a recovered host state.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no provider found for {0}")]
    UnknownProvider(ProviderIdentity),

    #[error("widget {id} content failed to inflate: {cause}")]
    Inflate {
        id: WidgetId,
        cause: anyhow::Error,
    },

    #[error("index {0} out of range")]
    OutOfRange(usize),
}

impl HostError {
    /// Short message suitable for a toast/snackbar in the shell.
    pub fn user_message(&self) -> String {
        match self {
            HostError::UnknownProvider(identity) => {
                format!("Widget {} is not installed", identity.package)
            }
            HostError::Inflate { .. } => {
                "This widget could not be displayed and was removed".to_string()
            }
            HostError::OutOfRange(_) => "Widget no longer exists".to_string(),
        }
    }
}
