//! Server-side adapter of the [Inertia.js](https://inertiajs.com) protocol.
//!
//! Build an [`Inertia`] instance from an [`InertiaConfig`] at bootstrap, add it to the
//! application data and wrap your routes with the provider middleware. Then render
//! pages through [`InertiaResponder`] or the provider facade functions.

mod config;
mod error;
mod inertia;
mod page;
mod page_builder;
mod props;
mod providers;
mod redirect;
mod request;
mod session;
mod shared;
mod ssr;
mod template;
mod utils;

pub use config::{InertiaConfig, InertiaConfigBuilder, InertiaVersion};
pub use error::InertiaError;
pub use inertia::{Component, Inertia, InertiaResponder, InertiaService, RenderOptions};
pub use page::{InertiaPage, SsrPage};
pub use page_builder::PageBuilder;
pub use props::{InertiaProp, InertiaProps, PropValue};
pub use redirect::{classify_redirect, is_stale, RedirectAction};
pub use request::{HttpMethod, InertiaRequest};
pub use session::InertiaSession;
pub use shared::InertiaShared;
pub use ssr::SsrClient;
pub use template::{
    csr_container, file_template_resolver, TemplateResolver, TemplateResolverOutput, ViewData,
};

#[cfg(feature = "actix")]
pub use providers::actix;
