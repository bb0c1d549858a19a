//! Redirect policy for binary downloads.
//!
//! The policy runs inside the HTTP client for every hop, before the hop is
//! followed. A violating hop is never requested: the client stops and the request
//! fails with a [`RedirectViolation`] as the error source, which
//! [`violation_in`] recovers from the returned `reqwest::Error`.

use crate::constants::MAX_REDIRECTS;
use crate::core::DkenvError;
use reqwest::Url;
use reqwest::redirect::{Attempt, Policy};
use thiserror::Error;

/// Why a redirect hop was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectViolation {
    #[error("Too many redirects")]
    TooMany {
        hops: usize,
    },
    #[error("Redirect to non-https server: {url}")]
    Insecure {
        url: String,
    },
}

impl From<RedirectViolation> for DkenvError {
    fn from(violation: RedirectViolation) -> Self {
        match violation {
            RedirectViolation::TooMany {
                hops,
            } => Self::TooManyRedirects {
                hops,
            },
            RedirectViolation::Insecure {
                url,
            } => Self::InsecureRedirect {
                url,
            },
        }
    }
}

/// Decide whether the hop to `next` may be followed.
///
/// `previous` holds every URL already requested in this chain, starting with the
/// original request, so its length equals the number of the hop being evaluated.
/// The hop count is checked before the scheme.
pub fn check_redirect(next: &Url, previous: &[Url]) -> Result<(), RedirectViolation> {
    if previous.len() > MAX_REDIRECTS {
        return Err(RedirectViolation::TooMany {
            hops: previous.len() - 1,
        });
    }

    if next.scheme() != "https" {
        return Err(RedirectViolation::Insecure {
            url: next.to_string(),
        });
    }

    Ok(())
}

/// The client-side policy wrapping [`check_redirect`].
#[must_use]
pub fn policy() -> Policy {
    Policy::custom(|attempt: Attempt<'_>| match check_redirect(attempt.url(), attempt.previous()) {
        Ok(()) => attempt.follow(),
        Err(violation) => attempt.error(violation),
    })
}

/// Find a [`RedirectViolation`] anywhere in the source chain of `error`.
pub fn violation_in(error: &(dyn std::error::Error + 'static)) -> Option<RedirectViolation> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(violation) = err.downcast_ref::<RedirectViolation>() {
            return Some(violation.clone());
        }
        current = err.source();
    }
    None
}
