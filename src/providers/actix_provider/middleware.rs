use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::marker::PhantomData;
use std::sync::Arc;

use super::headers::X_INERTIA_LOCATION;
use crate::inertia::{InertiaHttpRequest, InertiaResponder};
use crate::redirect::{classify_redirect, is_stale, RedirectAction};
use crate::shared::InertiaShared;
use crate::utils::inertia_err_msg;
use crate::{Inertia, InertiaProps};

/// Computes the props shared with every page of the incoming request.
pub type SharedPropsCallback = dyn Fn(&ServiceRequest) -> InertiaProps;

/// Inertia protocol middleware. It must wrap every route that renders Inertia pages.
///
/// It takes care of forcing a full reload whenever the client assets version is
/// outdated, of adjusting redirects to what the client-side adapter expects and of
/// sharing the props returned by [`InertiaMiddleware::with_shared_props`] callback.
///
/// `TInertia` is the template resolver data type of the [`Inertia`] instance living
/// in the application data.
pub struct InertiaMiddleware<TInertia> {
    shared_props_cb: Arc<SharedPropsCallback>,
    _p: PhantomData<TInertia>,
}

impl<TInertia> Default for InertiaMiddleware<TInertia>
where
    TInertia: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<TInertia> InertiaMiddleware<TInertia>
where
    TInertia: 'static,
{
    pub fn new() -> Self {
        Self {
            shared_props_cb: Arc::new(|_req: &ServiceRequest| InertiaProps::new()),
            _p: PhantomData::<TInertia>,
        }
    }

    pub fn with_shared_props(mut self, props: Arc<SharedPropsCallback>) -> Self {
        self.shared_props_cb = props;
        self
    }
}

// Middleware factory is `Transform` trait
// `S` - type of the next service
// `B` - type of response's body
impl<S, B, TInertia> Transform<S, ServiceRequest> for InertiaMiddleware<TInertia>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    TInertia: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = InertiaMiddlewareService<S, TInertia>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InertiaMiddlewareService {
            service,
            shared_props: self.shared_props_cb.clone(),
            _p: PhantomData::<TInertia>,
        }))
    }
}

pub struct InertiaMiddlewareService<S, TInertia>
where
    TInertia: 'static,
{
    service: S,
    shared_props: Arc<SharedPropsCallback>,
    _p: PhantomData<TInertia>,
}

impl<S, B, TInertia> Service<ServiceRequest> for InertiaMiddlewareService<S, TInertia>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    TInertia: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let shared_props = (self.shared_props)(&req);
        if !shared_props.is_empty() {
            let mut extensions = req.extensions_mut();
            match extensions.get_mut::<InertiaShared>() {
                Some(shared) => shared.extend(shared_props),
                None => {
                    extensions.insert(InertiaShared::from(shared_props));
                }
            }
        }

        let request = req.request().inertia_request();

        let is_outdated = match req.app_data::<Data<Inertia<TInertia>>>() {
            None => {
                log::error!(
                    "{}",
                    inertia_err_msg(
                        "There is no Inertia struct in AppData, assets version won't be checked."
                            .into()
                    )
                );
                false
            }
            Some(inertia) => is_stale(&request, inertia.version()),
        };

        if is_outdated {
            log::debug!(
                "Outdated assets version {:?} on {}, forcing a full reload.",
                request.version().unwrap_or(""),
                request.url()
            );

            let response = Inertia::<TInertia>::location(request.url());
            let (http_req, _payload) = req.into_parts();
            let res = ServiceResponse::new(http_req, response).map_into_right_body();

            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            match classify_redirect(&request, res.status().as_u16()) {
                RedirectAction::Keep => {}
                RedirectAction::SeeOther => {
                    log::debug!("Rewriting redirect to 303 See Other on {}", request.url());
                    *res.response_mut().status_mut() = StatusCode::SEE_OTHER;
                }
                RedirectAction::ExternalLocation => {
                    log::debug!("Rewriting redirect to an external visit on {}", request.url());
                    let response = res.response_mut();
                    let location = response
                        .headers_mut()
                        .remove(header::LOCATION)
                        .next()
                        .unwrap_or_else(|| HeaderValue::from_static("/"));

                    response.headers_mut().insert(X_INERTIA_LOCATION, location);
                    *response.status_mut() = StatusCode::CONFLICT;
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}
