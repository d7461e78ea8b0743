use crate::error::InertiaError;
use crate::ssr::{SsrClient, DEFAULT_SSR_TIMEOUT, DEFAULT_SSR_URL};
use crate::template::{file_template_resolver, TemplateResolver};
use crate::utils::inertia_err_msg;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_LAYOUT: &str = "base.html";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// The current assets version, resolved once when [`Inertia`] is instantiated.
///
/// [`Inertia`]: crate::Inertia
pub enum InertiaVersion<V>
where
    V: ToString,
{
    Literal(V),
    Resolver(Box<dyn FnOnce() -> V>),
}

impl<V> InertiaVersion<V>
where
    V: ToString,
{
    pub fn resolve(self) -> String {
        match self {
            InertiaVersion::Literal(version) => version.to_string(),
            InertiaVersion::Resolver(resolver) => resolver().to_string(),
        }
    }
}

/// A configuration struct for initializing Inertia. You can directly fill the struct or use
/// the builder fluent syntax by calling `InertiaConfig::builder()`, and finally
/// `InertiaConfigBuilder::build()`.
///
/// * `version`                 -   The current asset version of the application.
///                                 See [Asset versioning](https://inertiajs.com/asset-versioning) for more
///                                 details.
/// * `templates_dir`           -   The directory holding the root template.
/// * `layout`                  -   The root template file name, relative to `templates_dir`.
/// * `template_resolver`       -   A function that renders the root template. See [`TemplateResolver`].
/// * `template_resolver_data`  -   The third parameter of your template resolver. Inertia will
///                                 pass it by reference when calling the resolver function.
/// * `with_ssr`                -   Whether Server-side Rendering should be enabled.
/// * `ssr_client`              -   The SSR server client. If `None` is given while `with_ssr`
///                                 is set, `SsrClient::default` will be used.
/// * `encrypt_history`         -   Default history encryption flag, overridable per request.
/// * `view_data`               -   Optional data to be passed to every root template render.
pub struct InertiaConfig<T, V>
where
    T: 'static,
    V: ToString,
{
    pub version: InertiaVersion<V>,
    pub templates_dir: PathBuf,
    pub layout: String,
    pub template_resolver: TemplateResolver<T>,
    pub template_resolver_data: &'static T,
    pub with_ssr: bool,
    pub ssr_client: Option<SsrClient>,
    pub encrypt_history: bool,
    pub view_data: Option<Map<String, Value>>,
}

impl<T, V> InertiaConfig<T, V>
where
    T: 'static,
    V: ToString,
{
    /// Instatiates a new InertiaConfigBuilder instance. It must be configured using a fluent syntax.
    ///
    /// # Examples
    /// ```rust
    /// use inertia_actix::{file_template_resolver, InertiaConfig, InertiaVersion};
    ///
    /// let inertia_config = InertiaConfig::builder()
    ///     .set_version(InertiaVersion::Literal("v1"))
    ///     .set_templates_dir("templates")
    ///     .set_layout("base.html")
    ///     .set_template_resolver(&file_template_resolver)
    ///     .set_template_resolver_data(&())
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> InertiaConfigBuilder<T, V> {
        InertiaConfigBuilder::new()
    }
}

pub struct InertiaConfigBuilder<T, V>
where
    T: 'static,
    V: ToString,
{
    pub version: Option<InertiaVersion<V>>,
    pub templates_dir: PathBuf,
    pub layout: String,
    pub template_resolver: Option<TemplateResolver<T>>,
    pub template_resolver_data: Option<&'static T>,
    pub with_ssr: bool,
    pub ssr_client: Option<SsrClient>,
    pub encrypt_history: bool,
    pub view_data: Option<Map<String, Value>>,
}

impl<T, V> Default for InertiaConfigBuilder<T, V>
where
    T: 'static,
    V: ToString,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> InertiaConfigBuilder<T, V>
where
    T: 'static,
    V: ToString,
{
    pub fn new() -> Self {
        Self {
            version: None,
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            layout: DEFAULT_LAYOUT.to_string(),
            template_resolver: None,
            template_resolver_data: None,
            with_ssr: false,
            ssr_client: None,
            encrypt_history: false,
            view_data: None,
        }
    }

    pub fn set_version(mut self, version: InertiaVersion<V>) -> Self {
        self.version = Some(version);
        self
    }

    pub fn set_templates_dir(mut self, templates_dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = templates_dir.into();
        self
    }

    pub fn set_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn set_template_resolver(mut self, template_resolver: TemplateResolver<T>) -> Self {
        self.template_resolver = Some(template_resolver);
        self
    }

    pub fn set_template_resolver_data(mut self, data: &'static T) -> Self {
        self.template_resolver_data = Some(data);
        self
    }

    pub fn set_ssr_client(mut self, ssr_client: SsrClient) -> Self {
        self.ssr_client = Some(ssr_client);
        self
    }

    pub fn enable_ssr(mut self) -> Self {
        self.with_ssr = true;
        self
    }

    pub fn set_encrypt_history(mut self, encrypt_history: bool) -> Self {
        self.encrypt_history = encrypt_history;
        self
    }

    pub fn set_view_data(mut self, view_data: Map<String, Value>) -> Self {
        self.view_data = Some(view_data);
        self
    }

    /// Compile the current `InertiaConfigBuilder` into a valid `InertiaConfig` struct.
    ///
    /// # Errors
    /// Returns [`InertiaError::ConfigError`] if `version`, `template_resolver` or
    /// `template_resolver_data` weren't set, if `layout` is empty or if SSR is enabled
    /// with an empty server url.
    pub fn build(self) -> Result<InertiaConfig<T, V>, InertiaError> {
        let version = self.version.ok_or_else(|| missing_field("version"))?;
        let template_resolver = self
            .template_resolver
            .ok_or_else(|| missing_field("template_resolver"))?;
        let template_resolver_data = self
            .template_resolver_data
            .ok_or_else(|| missing_field("template_resolver_data"))?;

        if self.layout.trim().is_empty() {
            return Err(InertiaError::ConfigError(inertia_err_msg(
                "[InertiaConfigBuilder] 'layout' must be set.".into(),
            )));
        }

        if self.with_ssr
            && self
                .ssr_client
                .as_ref()
                .is_some_and(|client| client.url().trim().is_empty())
        {
            return Err(InertiaError::ConfigError(inertia_err_msg(
                "[InertiaConfigBuilder] SSR is enabled but the SSR server url is empty.".into(),
            )));
        }

        Ok(InertiaConfig {
            version,
            templates_dir: self.templates_dir,
            layout: self.layout,
            template_resolver,
            template_resolver_data,
            with_ssr: self.with_ssr,
            ssr_client: self.ssr_client,
            encrypt_history: self.encrypt_history,
            view_data: self.view_data,
        })
    }
}

impl InertiaConfigBuilder<(), String> {
    /// Builds a configuration from `INERTIA_*` environment variables, rendering
    /// the root template with [`file_template_resolver`].
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `INERTIA_VERSION` | `1.0` |
    /// | `INERTIA_SSR_ENABLED` | `false` |
    /// | `INERTIA_SSR_URL` | `http://localhost:13714` |
    /// | `INERTIA_SSR_TIMEOUT_MS` | `5000` |
    /// | `INERTIA_ENCRYPT_HISTORY` | `false` |
    /// | `INERTIA_LAYOUT` | `base.html` |
    /// | `INERTIA_TEMPLATES_DIR` | `templates` |
    ///
    /// # Errors
    /// Returns [`InertiaError::ConfigError`] if a boolean or numeric variable can't be parsed.
    pub fn from_env() -> Result<Self, InertiaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, InertiaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = lookup("INERTIA_VERSION").unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let with_ssr = parse_bool(&lookup, "INERTIA_SSR_ENABLED", false)?;
        let encrypt_history = parse_bool(&lookup, "INERTIA_ENCRYPT_HISTORY", false)?;
        let ssr_url = lookup("INERTIA_SSR_URL").unwrap_or_else(|| DEFAULT_SSR_URL.to_string());
        let ssr_timeout = match lookup("INERTIA_SSR_TIMEOUT_MS") {
            None => DEFAULT_SSR_TIMEOUT,
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
                InertiaError::ConfigError(format!(
                    "Expected milliseconds for INERTIA_SSR_TIMEOUT_MS, got `{}`",
                    raw
                ))
            })?,
        };

        let mut builder = InertiaConfigBuilder::new()
            .set_version(InertiaVersion::Literal(version))
            .set_templates_dir(
                lookup("INERTIA_TEMPLATES_DIR").unwrap_or_else(|| DEFAULT_TEMPLATES_DIR.into()),
            )
            .set_layout(lookup("INERTIA_LAYOUT").unwrap_or_else(|| DEFAULT_LAYOUT.into()))
            .set_template_resolver(&file_template_resolver)
            .set_template_resolver_data(&())
            .set_encrypt_history(encrypt_history)
            .set_ssr_client(SsrClient::new(ssr_url, ssr_timeout));

        if with_ssr {
            builder = builder.enable_ssr();
        }

        Ok(builder)
    }
}

fn missing_field(field: &str) -> InertiaError {
    InertiaError::ConfigError(inertia_err_msg(format!(
        "[InertiaConfigBuilder] '{}' is a mandatory field and InertiaConfigBuilder cannot build without it.",
        field
    )))
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, InertiaError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        None => return Ok(default),
        Some(raw) => raw,
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(InertiaError::ConfigError(format!(
            "Expected bool for {}, got `{}`",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::{InertiaConfig, InertiaConfigBuilder, InertiaVersion};
    use crate::template::{TemplateResolverOutput, ViewData};
    use crate::InertiaError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    // region: --- Mocks

    pub fn mocked_resolver(
        _template_path: PathBuf,
        _view_data: ViewData,
        _data: &(),
    ) -> TemplateResolverOutput {
        Box::pin(async { Ok("".to_string()) })
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    // endregion: --- Mocks

    // region: --- Tests

    #[test]
    fn builder_fails_if_critical_fields_are_unset() {
        let totally_empty = InertiaConfigBuilder::<(), &str>::new().build();

        let without_version = InertiaConfigBuilder::<(), &str>::new()
            .set_template_resolver(&mocked_resolver)
            .set_template_resolver_data(&())
            .build();

        let without_template_resolver = InertiaConfigBuilder::<(), &str>::new()
            .set_template_resolver_data(&())
            .set_version(InertiaVersion::Literal("v1"))
            .build();

        let without_template_data = InertiaConfigBuilder::<(), &str>::new()
            .set_template_resolver(&mocked_resolver)
            .set_version(InertiaVersion::Literal("v1"))
            .build();

        let without_layout = InertiaConfigBuilder::<(), &str>::new()
            .set_template_resolver(&mocked_resolver)
            .set_template_resolver_data(&())
            .set_version(InertiaVersion::Literal("v1"))
            .set_layout("")
            .build();

        let with_critical_fields_filled = InertiaConfigBuilder::<(), &str>::new()
            .set_template_resolver(&mocked_resolver)
            .set_template_resolver_data(&())
            .set_version(InertiaVersion::Literal("v1"))
            .build();

        assert!(matches!(totally_empty, Err(InertiaError::ConfigError(_))));
        assert!(without_version.is_err());
        assert!(without_template_resolver.is_err());
        assert!(without_template_data.is_err());
        assert!(without_layout
            .err()
            .is_some_and(|err| err.get_cause().contains("'layout' must be set")));
        assert!(with_critical_fields_filled.is_ok());
    }

    #[test]
    fn builder_builds_correctly() {
        let with_builder = InertiaConfig::<(), &str>::builder()
            .set_template_resolver(&mocked_resolver)
            .set_templates_dir("resources/views")
            .set_layout("root.html")
            .set_template_resolver_data(&())
            .set_version(InertiaVersion::Literal("v1"))
            .set_encrypt_history(true)
            .build()
            .unwrap();

        assert_eq!(with_builder.templates_dir, PathBuf::from("resources/views"));
        assert_eq!(with_builder.layout, "root.html");
        assert_eq!(with_builder.version.resolve(), "v1");
        assert!(with_builder.encrypt_history);
        assert!(!with_builder.with_ssr);
        assert!(with_builder.ssr_client.is_none());
        assert!(with_builder.view_data.is_none());
    }

    #[test]
    fn version_resolver_is_called() {
        let version = InertiaVersion::Resolver(Box::new(|| format!("{}-{}", "build", 42)));
        assert_eq!(version.resolve(), "build-42");
    }

    #[test]
    fn env_defaults() {
        let config = InertiaConfigBuilder::from_lookup(env(&[]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.version.resolve(), "1.0");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.layout, "base.html");
        assert!(!config.with_ssr);
        assert!(!config.encrypt_history);

        let ssr_client = config.ssr_client.unwrap();
        assert_eq!(ssr_client.url(), "http://localhost:13714");
        assert_eq!(ssr_client.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn env_overrides() {
        let config = InertiaConfigBuilder::from_lookup(env(&[
            ("INERTIA_VERSION", "2.0"),
            ("INERTIA_SSR_ENABLED", "true"),
            ("INERTIA_SSR_URL", "http://ssr:13714"),
            ("INERTIA_SSR_TIMEOUT_MS", "250"),
            ("INERTIA_ENCRYPT_HISTORY", "1"),
            ("INERTIA_LAYOUT", "app.html"),
            ("INERTIA_TEMPLATES_DIR", "views"),
        ]))
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(config.version.resolve(), "2.0");
        assert_eq!(config.templates_dir, PathBuf::from("views"));
        assert_eq!(config.layout, "app.html");
        assert!(config.with_ssr);
        assert!(config.encrypt_history);

        let ssr_client = config.ssr_client.unwrap();
        assert_eq!(ssr_client.url(), "http://ssr:13714");
        assert_eq!(ssr_client.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn env_type_mismatch_fails_fast() {
        let result = InertiaConfigBuilder::from_lookup(env(&[("INERTIA_ENCRYPT_HISTORY", "yes")]));
        assert_eq!(
            result.err(),
            Some(InertiaError::ConfigError(
                "Expected bool for INERTIA_ENCRYPT_HISTORY, got `yes`".into()
            ))
        );

        let result = InertiaConfigBuilder::from_lookup(env(&[("INERTIA_SSR_TIMEOUT_MS", "soon")]));
        assert!(matches!(result, Err(InertiaError::ConfigError(_))));
    }

    #[test]
    fn env_ssr_without_url_fails_on_build() {
        let result = InertiaConfigBuilder::from_lookup(env(&[
            ("INERTIA_SSR_ENABLED", "true"),
            ("INERTIA_SSR_URL", "  "),
        ]))
        .unwrap()
        .build();

        assert!(matches!(result, Err(InertiaError::ConfigError(_))));
    }

    // endregion: --- Tests
}
