#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other,
}

impl HttpMethod {
    pub fn from_name(name: &str) -> Self {
        match name {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Other,
        }
    }

    /// Methods a browser must not replay against a redirect target.
    #[inline]
    pub fn is_non_idempotent_write(&self) -> bool {
        matches!(self, HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete)
    }
}

/// Read-only view over the Inertia protocol headers of one request.
///
/// It is built once per request by the http provider and is all the page builder
/// and the middleware ever read from the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InertiaRequest {
    pub(crate) is_inertia: bool,
    pub(crate) method: HttpMethod,
    pub(crate) url: String,
    pub(crate) version: Option<String>,
    pub(crate) partial_component: Option<String>,
    pub(crate) partial_data: Option<String>,
    pub(crate) reset: Option<String>,
    pub(crate) encrypt_history: Option<bool>,
}

impl InertiaRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            is_inertia: false,
            method,
            url: url.into(),
            version: None,
            partial_component: None,
            partial_data: None,
            reset: None,
            encrypt_history: None,
        }
    }

    pub fn inertia(mut self, is_inertia: bool) -> Self {
        self.is_inertia = is_inertia;
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_partial_component(mut self, component: Option<String>) -> Self {
        self.partial_component = component;
        self
    }

    pub fn with_partial_data(mut self, data: Option<String>) -> Self {
        self.partial_data = data;
        self
    }

    pub fn with_reset(mut self, reset: Option<String>) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_encrypt_history(mut self, encrypt_history: Option<bool>) -> Self {
        self.encrypt_history = encrypt_history;
        self
    }

    #[inline]
    pub fn is_inertia(&self) -> bool {
        self.is_inertia
    }

    #[inline]
    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[inline]
    pub fn encrypt_history(&self) -> Option<bool> {
        self.encrypt_history
    }

    /// A partial render needs the partial data header and a partial component header
    /// that is byte-equal to `component`. A missing component header never matches.
    pub fn is_partial_render(&self, component: &str) -> bool {
        self.partial_data.is_some() && self.partial_component.as_deref() == Some(component)
    }

    /// Requested keys. Not trimmed; an empty or absent header yields a single empty key.
    pub fn partial_keys(&self) -> Vec<&str> {
        split_keys(self.partial_data.as_deref())
    }

    /// Keys the client wants replaced rather than merged. Same splitting rules as
    /// [`InertiaRequest::partial_keys`].
    pub fn reset_keys(&self) -> Vec<&str> {
        split_keys(self.reset.as_deref())
    }
}

fn split_keys(header: Option<&str>) -> Vec<&str> {
    header.unwrap_or("").split(',').collect()
}
