use super::facade::EncryptHistory;
use super::headers;

use crate::inertia::{Inertia, InertiaHttpRequest, InertiaResponder, InertiaService, RenderOptions};
use crate::props::InertiaProps;
use crate::request::{HttpMethod, InertiaRequest};
use crate::session::InertiaSession;
use crate::shared::InertiaShared;
use crate::utils::convert_struct_to_stringified_json;
use crate::{Component, InertiaError, InertiaPage};

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest};
use actix_web::http::header::{self, ContentType, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{
    web, App, FromRequest, HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder, Responder, ResponseError,
};
use async_trait::async_trait;

pub(crate) fn page_response(
    page: &InertiaPage,
    status: StatusCode,
) -> Result<HttpResponse, InertiaError> {
    let body = convert_struct_to_stringified_json(page)?;

    Ok(HttpResponseBuilder::new(status)
        .insert_header((header::VARY, HeaderValue::from_static("X-Inertia")))
        .insert_header((headers::X_INERTIA, HeaderValue::from_static("true")))
        .insert_header(ContentType::json())
        .body(body))
}

impl Responder for InertiaPage {
    type Body = BoxBody;

    #[inline]
    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match page_response(&self, StatusCode::OK) {
            Ok(response) => response,
            Err(err) => err.error_response(),
        }
    }
}

#[async_trait(?Send)]
impl<T> InertiaResponder<HttpResponse, HttpRequest> for Inertia<T>
where
    T: 'static,
{
    #[inline]
    async fn render(
        &self,
        req: &HttpRequest,
        component: Component,
    ) -> Result<HttpResponse, InertiaError> {
        self.render_with_props(req, component, InertiaProps::new())
            .await
    }

    #[inline]
    async fn render_with_props(
        &self,
        req: &HttpRequest,
        component: Component,
        props: InertiaProps,
    ) -> Result<HttpResponse, InertiaError> {
        self.render_with_options(req, component, props, RenderOptions::default())
            .await
    }

    async fn render_with_options(
        &self,
        req: &HttpRequest,
        component: Component,
        props: InertiaProps,
        options: RenderOptions,
    ) -> Result<HttpResponse, InertiaError> {
        let status = StatusCode::from_u16(options.status).map_err(|_| {
            InertiaError::HeaderError(format!("Invalid response status {}", options.status))
        })?;

        let request = req.inertia_request();
        let shared = req
            .extensions()
            .get::<InertiaShared>()
            .cloned()
            .unwrap_or_default();
        let clear_history = req
            .extensions_mut()
            .get_mut::<InertiaSession>()
            .is_some_and(|session| session.take_clear_history());

        let page = self.build_page(&request, component, props, shared, clear_history);

        // if it's an inertia request, returns an InertiaPage object
        if request.is_inertia() {
            return page_response(&page, status);
        }

        let html = self
            .render_first_load(page, options.template_data)
            .await?;

        Ok(HttpResponseBuilder::new(status)
            .insert_header(ContentType::html())
            .body(html))
    }

    #[inline]
    fn location(url: &str) -> HttpResponse {
        HttpResponseBuilder::new(StatusCode::CONFLICT)
            .insert_header((headers::X_INERTIA_LOCATION, url))
            .finish()
    }
}

impl ResponseError for InertiaError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(ContentType::plaintext())
            .body(self.get_cause())
    }
}

impl<TApp> InertiaService for App<TApp>
where
    TApp: ServiceFactory<
        ServiceRequest,
        Config = (),
        Error = actix_web::error::Error,
        InitError = (),
    >,
{
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static,
    {
        self.route(
            path,
            web::get().to(move |req: HttpRequest| async move {
                super::facade::render::<T>(&req, component.into()).await
            }),
        )
    }
}

impl InertiaHttpRequest for HttpRequest {
    fn is_inertia_request(&self) -> bool {
        self.headers().contains_key(headers::X_INERTIA)
    }

    fn inertia_request(&self) -> InertiaRequest {
        let encrypt_history = self
            .extensions()
            .get::<EncryptHistory>()
            .map(|EncryptHistory(value)| *value);

        InertiaRequest::new(
            HttpMethod::from_name(self.method().as_str()),
            self.full_url().to_string(),
        )
        .inertia(self.is_inertia_request())
        .with_version(header_content(self, &headers::X_INERTIA_VERSION))
        .with_partial_component(header_content(self, &headers::X_INERTIA_PARTIAL_COMPONENT))
        .with_partial_data(header_content(self, &headers::X_INERTIA_PARTIAL_DATA))
        .with_reset(header_content(self, &headers::X_INERTIA_RESET))
        .with_encrypt_history(encrypt_history)
    }
}

/// Reads a header as text. Values that aren't visible ASCII are treated as absent.
fn header_content(req: &HttpRequest, header_name: &HeaderName) -> Option<String> {
    let value = req.headers().get(header_name)?;

    match value.to_str() {
        Ok(value) => Some(value.to_string()),
        Err(_err) => {
            log::debug!(
                "Ignoring header {}: its value must contain only visible ASCII characters.",
                header_name
            );
            None
        }
    }
}

impl FromRequest for InertiaSession {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<InertiaSession>()
            .cloned()
            .unwrap_or_default();

        std::future::ready(Ok(session))
    }
}
