use crate::inertia::{InertiaResponder, RenderOptions};
use crate::props::{InertiaProp, InertiaProps};
use crate::session::InertiaSession;
use crate::shared::InertiaShared;
use crate::utils::inertia_err_msg;
use crate::{Component, Inertia, InertiaError};
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};

/// Request-scoped override of the configured history encryption.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EncryptHistory(pub bool);

/// Short for calling `render` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
///
/// # Errors
/// Returns [`InertiaError::ConfigError`] if Inertia instance hasn't been configured (set to AppData).
pub async fn render<T>(req: &HttpRequest, component: Component) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia = extract_inertia::<T>(req)?;
    inertia.render(req, component).await
}

/// Short for calling `render_with_props` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
/// * `props`       -   The page props.
///
/// # Errors
/// Returns [`InertiaError::ConfigError`] if Inertia instance hasn't been configured (set to AppData).
pub async fn render_with_props<T>(
    req: &HttpRequest,
    component: Component,
    props: InertiaProps,
) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia = extract_inertia::<T>(req)?;
    inertia.render_with_props(req, component, props).await
}

/// Short for calling `render_with_options` from the `Inertia` instance added to the request
/// AppData.
pub async fn render_with_options<T>(
    req: &HttpRequest,
    component: Component,
    props: InertiaProps,
    options: RenderOptions,
) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia = extract_inertia::<T>(req)?;
    inertia
        .render_with_options(req, component, props, options)
        .await
}

/// A `409 Conflict` carrying `X-Inertia-Location`, forcing the client into a full page
/// visit to `url`.
pub fn location(url: &str) -> HttpResponse {
    Inertia::<()>::location(url)
}

/// Shares a prop with every page rendered for this request.
pub fn share(req: &HttpRequest, key: impl Into<String>, prop: impl Into<InertiaProp>) {
    let mut extensions = req.extensions_mut();
    match extensions.get_mut::<InertiaShared>() {
        Some(shared) => shared.set(key, prop),
        None => {
            let mut shared = InertiaShared::new();
            shared.set(key, prop);
            extensions.insert(shared);
        }
    }
}

/// Shares several props at once. See [`share`].
pub fn share_props(req: &HttpRequest, props: InertiaProps) {
    let mut extensions = req.extensions_mut();
    match extensions.get_mut::<InertiaShared>() {
        Some(shared) => shared.extend(props),
        None => {
            extensions.insert(InertiaShared::from(props));
        }
    }
}

/// Overrides the configured history encryption for this request.
pub fn encrypt_history(req: &HttpRequest, encrypt: bool) {
    req.extensions_mut().insert(EncryptHistory(encrypt));
}

/// Asks the client-side to clear its history state on the next rendered page.
pub fn clear_history(req: &HttpRequest) {
    let mut extensions = req.extensions_mut();
    match extensions.get_mut::<InertiaSession>() {
        Some(session) => session.clear_history = true,
        None => {
            extensions.insert(InertiaSession {
                clear_history: true,
            });
        }
    }
}

fn extract_inertia<T>(req: &HttpRequest) -> Result<&Inertia<T>, InertiaError>
where
    T: 'static,
{
    match req.app_data::<Data<Inertia<T>>>() {
        None => Err(InertiaError::ConfigError(inertia_err_msg(
            "There is no Inertia struct in AppData. Please, assure you have correctly configured Inertia.".into(),
        ))),
        Some(inertia) => Ok(inertia),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test;
    use serde_json::json;

    #[test]
    async fn test_share_creates_the_store_lazily() {
        let req = test::TestRequest::get().to_http_request();
        assert!(req.extensions().get::<InertiaShared>().is_none());

        share(&req, "user", json!({"name": "Example User"}));
        share(&req, "app_name", json!("Inertia"));
        share(&req, "user", json!({"name": "Other User"}));

        let mut more = InertiaProps::new();
        more.insert("locale".into(), InertiaProp::plain(json!("en")));
        share_props(&req, more);

        let extensions = req.extensions();
        let shared = extensions.get::<InertiaShared>().unwrap();
        let keys: Vec<&String> = shared.all().keys().collect();
        assert_eq!(keys, vec!["user", "app_name", "locale"]);
        assert_eq!(
            shared.all()["user"].clone().resolve(),
            json!({"name": "Other User"})
        );
    }

    #[test]
    async fn test_history_helpers() {
        let req = test::TestRequest::get().to_http_request();

        encrypt_history(&req, true);
        clear_history(&req);

        assert!(matches!(
            req.extensions().get::<EncryptHistory>(),
            Some(EncryptHistory(true))
        ));
        assert_eq!(
            req.extensions().get::<InertiaSession>(),
            Some(&InertiaSession {
                clear_history: true
            })
        );
    }

    #[test]
    async fn test_render_without_app_data_fails() {
        let req = test::TestRequest::get().to_http_request();
        let result = render::<()>(&req, Component("Index".into())).await;

        assert!(matches!(result, Err(InertiaError::ConfigError(_))));
    }
}
