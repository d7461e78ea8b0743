use crate::inertia;
use crate::InertiaError;
use actix_web::http::header::{HeaderName, HeaderValue};

pub const X_INERTIA: HeaderName = HeaderName::from_static(inertia::X_INERTIA);
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_LOCATION);
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_VERSION);
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_COMPONENT);
pub const X_INERTIA_PARTIAL_DATA: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_DATA);
pub const X_INERTIA_RESET: HeaderName = HeaderName::from_static(inertia::X_INERTIA_RESET);

pub enum InertiaHeader<'a> {
    Inertia,
    InertiaLocation(&'a str),
    Version(&'a str),
    PartialComponent(&'a str),
    PartialData(Vec<&'a str>),
    Reset(Vec<&'a str>),
}

impl InertiaHeader<'_> {
    /// # Errors
    /// Returns [`InertiaError::HeaderError`] if the value isn't a valid header value.
    pub fn convert(&self) -> Result<(HeaderName, HeaderValue), InertiaError> {
        let (name, value) = match self {
            Self::Inertia => return Ok((X_INERTIA, HeaderValue::from_static("true"))),
            Self::InertiaLocation(url) => (X_INERTIA_LOCATION, url.to_string()),
            Self::Version(version) => (X_INERTIA_VERSION, version.to_string()),
            Self::PartialComponent(component) => {
                (X_INERTIA_PARTIAL_COMPONENT, component.to_string())
            }
            Self::PartialData(keys) => (X_INERTIA_PARTIAL_DATA, keys.join(",")),
            Self::Reset(keys) => (X_INERTIA_RESET, keys.join(",")),
        };

        match HeaderValue::from_str(&value) {
            Ok(header_value) => Ok((name, header_value)),
            Err(_err) => Err(InertiaError::HeaderError(format!(
                "Header {}'s value must contain only visible ASCII characters.",
                name
            ))),
        }
    }
}
