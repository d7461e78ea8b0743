use crate::inertia::Component;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fragment returned by the Inertia SSR server, rendered inside the root template
/// on the first request or on a full visit request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SsrPage {
    /// All html-string elements to be injected in the root template head.
    pub(crate) head: Vec<String>,
    /// The html to be injected as the application container.
    pub(crate) body: String,
}

impl SsrPage {
    pub fn new(head: Vec<String>, body: String) -> Self {
        SsrPage { head, body }
    }

    pub fn get_head(&self) -> String {
        self.head.join("\n")
    }

    pub fn get_body(&self) -> &String {
        &self.body
    }
}

/// Response containing a valid Inertia Payload that will be used
/// by the Inertia client to render the components.
///
/// `deferredProps` and `mergeProps` are left out of the json when they don't
/// apply, they're never sent as `null`.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InertiaPage {
    /// The name of the JavaScript page component.
    pub(crate) component: Component,
    /// The page props (data). A merge of page props and shared props.
    pub(crate) props: Map<String, Value>,
    /// Absolute url of the current request.
    pub(crate) url: String,
    /// Current assets version.
    pub(crate) version: String,
    pub(crate) encrypt_history: bool,
    pub(crate) clear_history: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) deferred_props: Option<IndexMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) merge_props: Option<Vec<String>>,
}

impl InertiaPage {
    /// Instantiates an Inertia Page object to sent as http response,
    /// according to [Inertia Protocol].
    ///
    /// [Inertia Protocol]: https://inertiajs.com/the-protocol
    ///
    /// # Arguments
    /// * `component`   -   The name of the javascript page component (e.g. "Users/Index").
    /// * `url`         -   The current request's url.
    /// * `version`     -   Current assets version. See [Inertia's assets versioning].
    /// * `props`       -   A map of the page's already resolved props.
    ///
    /// [Inertia's assets versioning]: https://inertiajs.com/the-protocol#asset-versioning
    pub fn new(
        component: Component,
        url: String,
        version: String,
        props: Map<String, Value>,
    ) -> Self {
        InertiaPage {
            component,
            props,
            url,
            version,
            encrypt_history: false,
            clear_history: false,
            deferred_props: None,
            merge_props: None,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encrypt_history(&self) -> bool {
        self.encrypt_history
    }

    pub fn clear_history(&self) -> bool {
        self.clear_history
    }

    pub fn deferred_props(&self) -> Option<&IndexMap<String, Vec<String>>> {
        self.deferred_props.as_ref()
    }

    pub fn merge_props(&self) -> Option<&Vec<String>> {
        self.merge_props.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn page_with_extras() -> InertiaPage {
        let mut props = Map::new();
        props.insert("name".into(), json!("Brandon"));
        props.insert("sport".into(), json!("Hockey"));

        let mut deferred = IndexMap::new();
        deferred.insert("default".to_string(), vec!["team".to_string()]);

        let mut page = InertiaPage::new(
            Component("merge".into()),
            "http://localhost:8080/merge/".into(),
            "1.0".into(),
            props,
        );
        page.deferred_props = Some(deferred);
        page.merge_props = Some(vec!["sport".into(), "team".into()]);
        page
    }

    #[test]
    fn test_optional_fields_are_omitted_not_null() {
        let page = InertiaPage::new(
            Component("empty".into()),
            "http://localhost:8080/empty/".into(),
            "1.0".into(),
            Map::new(),
        );

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "component": "empty",
                "props": {},
                "url": "http://localhost:8080/empty/",
                "version": "1.0",
                "encryptHistory": false,
                "clearHistory": false,
            })
        );
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(page_with_extras()).unwrap();

        assert_eq!(value["deferredProps"], json!({"default": ["team"]}));
        assert_eq!(value["mergeProps"], json!(["sport", "team"]));
        assert_eq!(value["component"], json!("merge"));
    }

    #[test]
    fn test_reencoding_is_idempotent() {
        let page = page_with_extras();
        let encoded = serde_json::to_string(&page).unwrap();
        let decoded: InertiaPage = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, page);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), encoded);

        let bare: InertiaPage = serde_json::from_value(json!({
            "component": "empty",
            "props": {},
            "url": "/",
            "version": "1.0",
            "encryptHistory": true,
            "clearHistory": false,
        }))
        .unwrap();
        assert!(bare.deferred_props().is_none());
        assert!(bare.merge_props().is_none());
        assert!(bare.encrypt_history());
    }

    #[test]
    fn test_ssr_page_parts() {
        let ssr: SsrPage = serde_json::from_value(json!({
            "head": ["<title>Home</title>", "<meta name=\"x\">"],
            "body": "<div id=\"app\">Home</div>",
        }))
        .unwrap();

        assert_eq!(ssr.get_head(), "<title>Home</title>\n<meta name=\"x\">");
        assert_eq!(ssr.get_body(), "<div id=\"app\">Home</div>");
    }
}
