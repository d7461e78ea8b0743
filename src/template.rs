use crate::error::InertiaError;
use crate::page::{InertiaPage, SsrPage};
use crate::utils::escape_html_attribute;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const HEAD_PLACEHOLDER: &str = "%-inertia_head-%";
pub const BODY_PLACEHOLDER: &str = "%-inertia_body-%";

/// View Data is a struct containing everything the root template may need.
pub struct ViewData {
    /// The page object. On client-side rendering, it must be embedded in the
    /// application container's `data-page` attribute.
    pub page: InertiaPage,
    /// The SSR fragment, present only if server-side rendering succeeded.
    pub ssr_page: Option<SsrPage>,
    /// Extra data for the template: configured view data overlaid by the data
    /// passed on render.
    pub template_data: Map<String, Value>,
}

pub type TemplateResolverOutput = BoxFuture<'static, Result<String, InertiaError>>;

/// A function responsible for rendering the root template with the given [`ViewData`].
///
/// # Arguments
/// Inertia will call this function passing the following parameters to it:
/// * `path`        -   The root template path (`templates_dir` joined with `layout`).
/// * `view_data`   -   A [`ViewData`] struct.
/// * `data`        -   The configured `template_resolver_data`, e.g. a template engine.
pub type TemplateResolver<T> =
    &'static (dyn Fn(PathBuf, ViewData, &'static T) -> TemplateResolverOutput + Send + Sync);

/// Renders the application container for client-side rendering.
pub fn csr_container(page: &InertiaPage) -> Result<String, InertiaError> {
    let stringified_page = serde_json::to_string(page).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to serialize page: {}", err))
    })?;

    Ok(format!(
        "<div id=\"app\" data-page=\"{}\"></div>",
        escape_html_attribute(&stringified_page)
    ))
}

async fn render_file(path: PathBuf, view_data: ViewData) -> Result<String, InertiaError> {
    let file = tokio::fs::read(&path).await.map_err(|err| {
        InertiaError::TemplateError(format!(
            "Failed to open root layout at {}: {:#}",
            path.display(),
            err
        ))
    })?;

    let html = String::from_utf8(file).map_err(|err| {
        InertiaError::TemplateError(format!("Failed to read file contents: {err:?}"))
    })?;

    let (head, body) = match &view_data.ssr_page {
        Some(ssr) => (ssr.get_head(), ssr.get_body().clone()),
        None => (String::new(), csr_container(&view_data.page)?),
    };

    Ok(fill_placeholders(&html, &head, &body, &view_data.template_data))
}

/// Replaces every `%-<key>-%` of the layout in a single pass, so nothing inserted
/// is ever scanned again. Template data is HTML-escaped and unknown keys render
/// as an empty string.
fn fill_placeholders(layout: &str, head: &str, body: &str, data: &Map<String, Value>) -> String {
    let mut html = String::with_capacity(layout.len() + head.len() + body.len());
    let mut rest = layout;

    while let Some(start) = rest.find("%-") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let key = match after.find("-%") {
            Some(end) if is_placeholder_key(&after[..end]) => &after[..end],
            _ => {
                html.push_str("%-");
                rest = after;
                continue;
            }
        };

        let placeholder = &rest[start..start + key.len() + 4];
        if placeholder == HEAD_PLACEHOLDER {
            html.push_str(head);
        } else if placeholder == BODY_PLACEHOLDER {
            html.push_str(body);
        } else if let Some(value) = data.get(key) {
            let rendered = match value {
                Value::String(text) => escape_html_attribute(text),
                other => escape_html_attribute(&other.to_string()),
            };
            html.push_str(&rendered);
        }

        rest = &after[key.len() + 2..];
    }

    html.push_str(rest);
    html
}

fn is_placeholder_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
}

/// Bundled template resolver. It reads the root template from disk and replaces
/// `%-inertia_head-%`, `%-inertia_body-%` and `%-<key>-%` for each template data entry.
///
/// Template data values are HTML-escaped, never inserted as raw markup. Placeholders
/// without a matching entry are removed.
pub fn file_template_resolver(
    path: PathBuf,
    view_data: ViewData,
    _data: &'static (),
) -> TemplateResolverOutput {
    Box::pin(render_file(path, view_data))
}
