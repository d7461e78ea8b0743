use crate::config::InertiaConfig;
use crate::error::InertiaError;
use crate::page::InertiaPage;
use crate::page_builder::PageBuilder;
use crate::props::InertiaProps;
use crate::request::InertiaRequest;
use crate::shared::InertiaShared;
use crate::ssr::SsrClient;
use crate::template::{TemplateResolver, ViewData};
use crate::utils::inertia_err_msg;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const X_INERTIA: &str = "x-inertia";
pub const X_INERTIA_LOCATION: &str = "x-inertia-location";
pub const X_INERTIA_VERSION: &str = "x-inertia-version";
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";
pub const X_INERTIA_PARTIAL_DATA: &str = "x-inertia-partial-data";
pub const X_INERTIA_RESET: &str = "x-inertia-reset";

/// The javascript component name.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Component(pub String);

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component(value)
    }
}

/// Per-render options besides the props.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Data handed to the root template on first loads. Never sent to the client-side.
    pub template_data: Map<String, Value>,
    pub status: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template_data: Map::new(),
            status: 200,
        }
    }
}

impl RenderOptions {
    pub fn with_template_data(mut self, template_data: Map<String, Value>) -> Self {
        self.template_data = template_data;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// InertiaResponder trait defines methods that every crate feature
/// should implement. For instance, T may be a sort of actix-web Responder,
/// if "actix" feature is passed with the --feature flag or with the
/// feature field in the cargo toml.
#[async_trait(?Send)] // it's `?Send` because some frameworks like Actix won't require requests to be thread-safe
pub trait InertiaResponder<TResponse, THttpReq> {
    /// Renders an Inertia Page as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page javascript component name to be rendered by the
    ///                     client-side adapter.
    async fn render(&self, req: &THttpReq, component: Component)
        -> Result<TResponse, InertiaError>;

    /// Renders an Inertia Page with props as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page component to be rendered by the client-side adapter.
    /// * `props`       -   The page props. Shared props are merged under them.
    ///
    /// # Errors
    /// This operation may result in one of InertiaErrors if the page can't be serialized
    /// or the root template can't be rendered.
    async fn render_with_props(
        &self,
        req: &THttpReq,
        component: Component,
        props: InertiaProps,
    ) -> Result<TResponse, InertiaError>;

    /// Same as [`InertiaResponder::render_with_props`], also taking the template data
    /// and the response status.
    async fn render_with_options(
        &self,
        req: &THttpReq,
        component: Component,
        props: InertiaProps,
        options: RenderOptions,
    ) -> Result<TResponse, InertiaError>;

    /// Forces the Inertia client to perform a full page visit to `url`.
    fn location(url: &str) -> TResponse;
}

/// Defines some helper methods to be implemented to HttpRequests from the
/// library opted by the cargo feature.
pub(crate) trait InertiaHttpRequest {
    fn is_inertia_request(&self) -> bool;

    /// Builds the read-only protocol view of this request.
    fn inertia_request(&self) -> InertiaRequest;
}

/// Route registration helpers for the http library's application builder.
pub trait InertiaService {
    /// Registers a GET route rendering `component` without props.
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static;
}

/// Inertia struct must be a singleton and initialized at the application bootstrap.
/// It is supposed to last during the whole application runtime and is never mutated
/// after being built.
///
/// Extra details of how to initialize and keep it is specific to the feature-opted http library.
pub struct Inertia<T = ()>
where
    T: 'static,
{
    /// The current assets version.
    pub(crate) version: String,
    /// The root template path, i.e. `templates_dir` joined with `layout`.
    pub(crate) template_path: PathBuf,
    /// A function responsible for rendering the root template
    /// with the given **view data** and/or **page data**.
    ///
    /// Since Rust does not offer a standard template engine, there are various options, and it
    /// is not our goal to tie you to a specific one.
    pub(crate) template_resolver: TemplateResolver<T>,
    pub(crate) template_resolver_data: &'static T,
    /// A client to make requests to the Inertia SSR server, if SSR is enabled.
    pub(crate) ssr_client: Option<SsrClient>,
    pub(crate) encrypt_history: bool,
    /// Extra data to be passed to the root template.
    pub(crate) view_data: Map<String, Value>,
}

impl<T> Inertia<T>
where
    T: 'static,
{
    /// Initializes an instance of [`Inertia`] struct.
    ///
    /// # Arguments
    /// * `config`  -   An [`InertiaConfig`], see [`InertiaConfig::builder`].
    pub fn new<V>(config: InertiaConfig<T, V>) -> Self
    where
        V: ToString,
    {
        let ssr_client = match (config.with_ssr, config.ssr_client) {
            (false, _) => None,
            (true, Some(client)) => Some(client),
            (true, None) => Some(SsrClient::default()),
        };

        Self {
            version: config.version.resolve(),
            template_path: config.templates_dir.join(&config.layout),
            template_resolver: config.template_resolver,
            template_resolver_data: config.template_resolver_data,
            ssr_client,
            encrypt_history: config.encrypt_history,
            view_data: config.view_data.unwrap_or_default(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn template_path(&self) -> &PathBuf {
        &self.template_path
    }

    pub fn is_ssr_enabled(&self) -> bool {
        self.ssr_client.is_some()
    }

    /// Resolves the page object for this request.
    pub fn build_page(
        &self,
        request: &InertiaRequest,
        component: Component,
        props: InertiaProps,
        shared: InertiaShared,
        clear_history: bool,
    ) -> InertiaPage {
        PageBuilder::new(request, &self.version)
            .shared(shared)
            .encrypt_history_default(self.encrypt_history)
            .clear_history(clear_history)
            .build(component, props)
    }

    /// Renders the root template for a first load. Server-side rendering is tried
    /// first when enabled, and any failure of it silently falls back to client-side
    /// rendering.
    pub async fn render_first_load(
        &self,
        page: InertiaPage,
        template_data: Map<String, Value>,
    ) -> Result<String, InertiaError> {
        let mut ssr_page = None;

        if let Some(ssr_client) = &self.ssr_client {
            match ssr_client.render(&page).await {
                Err(err) => {
                    log::warn!(
                        "{}",
                        inertia_err_msg(format!(
                            "Error on server-side rendering page {}, falling back to client-side rendering. {}",
                            page.component.0, err
                        ))
                    );
                }
                Ok(rendered) => ssr_page = Some(rendered),
            }
        }

        let mut view_template_data = self.view_data.clone();
        view_template_data.extend(template_data);

        let view_data = ViewData {
            page,
            ssr_page,
            template_data: view_template_data,
        };

        (self.template_resolver)(
            self.template_path.clone(),
            view_data,
            self.template_resolver_data,
        )
        .await
    }
}
