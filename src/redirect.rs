use crate::request::{HttpMethod, InertiaRequest};

/// What the middleware must do with an outgoing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectAction {
    Keep,
    /// Rewrite the status to `303 See Other`, keeping `Location`.
    SeeOther,
    /// Replace the redirect with a `409 Conflict` carrying `X-Inertia-Location`.
    ExternalLocation,
}

#[inline]
fn is_redirect(status: u16) -> bool {
    status == 301 || status == 302
}

/// An Inertia GET request whose client asset version differs from the current one
/// must be answered with a forced full reload. A missing version header counts as
/// an empty version.
pub fn is_stale(request: &InertiaRequest, current_version: &str) -> bool {
    request.is_inertia()
        && *request.method() == HttpMethod::Get
        && request.version().unwrap_or("") != current_version
}

pub fn classify_redirect(request: &InertiaRequest, status: u16) -> RedirectAction {
    if !request.is_inertia() || !is_redirect(status) {
        return RedirectAction::Keep;
    }

    if request.method().is_non_idempotent_write() {
        RedirectAction::SeeOther
    } else {
        RedirectAction::ExternalLocation
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(method: HttpMethod, is_inertia: bool) -> InertiaRequest {
        InertiaRequest::new(method, "http://localhost:8080/").inertia(is_inertia)
    }

    #[test]
    fn test_writes_are_rewritten_to_see_other() {
        for method in [HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
            assert_eq!(
                classify_redirect(&request(method.clone(), true), 302),
                RedirectAction::SeeOther
            );
            assert_eq!(
                classify_redirect(&request(method, true), 301),
                RedirectAction::SeeOther
            );
        }
    }

    #[test]
    fn test_other_redirects_become_external_locations() {
        assert_eq!(
            classify_redirect(&request(HttpMethod::Get, true), 302),
            RedirectAction::ExternalLocation
        );
        assert_eq!(
            classify_redirect(&request(HttpMethod::Post, true), 301),
            RedirectAction::ExternalLocation
        );
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(
            classify_redirect(&request(HttpMethod::Put, false), 302),
            RedirectAction::Keep
        );
        assert_eq!(
            classify_redirect(&request(HttpMethod::Get, true), 200),
            RedirectAction::Keep
        );
        assert_eq!(
            classify_redirect(&request(HttpMethod::Put, true), 303),
            RedirectAction::Keep
        );
        assert_eq!(
            classify_redirect(&request(HttpMethod::Get, true), 307),
            RedirectAction::Keep
        );
    }

    #[test]
    fn test_staleness() {
        let fresh = request(HttpMethod::Get, true).with_version(Some("1.0".into()));
        assert!(!is_stale(&fresh, "1.0"));

        let stale = request(HttpMethod::Get, true).with_version(Some("0.9".into()));
        assert!(is_stale(&stale, "1.0"));

        let missing = request(HttpMethod::Get, true);
        assert!(is_stale(&missing, "1.0"));

        let post = request(HttpMethod::Post, true).with_version(Some("0.9".into()));
        assert!(!is_stale(&post, "1.0"));

        let plain = request(HttpMethod::Get, false).with_version(Some("0.9".into()));
        assert!(!is_stale(&plain, "1.0"));
    }
}
