use thiserror::Error;

/// The two ways a search can fail. Both are terminal for the triggering
/// action: nothing is retried, the user re-issues the search.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or upstream HTTP failure, with the upstream status code when
    /// the server answered at all.
    #[error("forecast request failed{}", status_suffix(.status))]
    Fetch {
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected forecast payload: {reason}")]
    Parse { reason: String },
}

impl Error {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Error::Parse { reason: reason.into() }
    }

    /// Upstream HTTP status, if this is a fetch failure that carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => *status,
            Error::Parse { .. } => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {code}"),
        None => String::new(),
    }
}
