//! Example snippet loading
//!
//! `GET /examples/{name}` returns raw source text. Names may contain `/` to
//! reach examples in subdirectories; each segment is encoded on its own. A
//! failed load leaves the editor exactly as it was.

use super::{encode_uri_component, ClientError, CompileClient, Result, Transport, EXAMPLES_PATH};
use crate::view::{AlertKind, ViewState};
use tracing::{info, warn};

impl<T: Transport> CompileClient<T> {
    /// Fetch the source text of a named example
    pub fn load_example(&self, name: &str) -> Result<String> {
        let segments: Vec<String> = name.split('/').map(encode_uri_component).collect();
        let path = format!("{}{}", EXAMPLES_PATH, segments.join("/"));
        let response = self.transport().get(&path).map_err(|err| {
            warn!(%err, example = name, "example request failed");
            err
        })?;

        if !response.is_success() {
            warn!(status = response.status, example = name, "example not available");
            return Err(ClientError::Status(response.status));
        }

        Ok(response.body)
    }
}

/// Apply the outcome of an example load to the view.
///
/// On success the whole source document is replaced; on failure an alert is
/// queued and the document is left untouched.
pub fn apply_example(view: &mut ViewState, name: &str, outcome: Result<String>) {
    match outcome {
        Ok(text) => {
            info!(example = name, bytes = text.len(), "example loaded");
            view.source.replace(text);
        }
        Err(ClientError::Status(_)) => {
            view.alert(AlertKind::Example, "Failed to load example");
        }
        Err(_) => {
            view.alert(AlertKind::Example, "Error loading example");
        }
    }
}
