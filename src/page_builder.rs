use crate::inertia::Component;
use crate::page::InertiaPage;
use crate::props::InertiaProps;
use crate::request::InertiaRequest;
use crate::shared::InertiaShared;
use indexmap::IndexMap;
use serde_json::Map;

/// Decides which props a response carries, and which keys go to the
/// `deferredProps` manifest and the `mergeProps` list.
pub struct PageBuilder<'a> {
    request: &'a InertiaRequest,
    version: &'a str,
    shared: InertiaShared,
    encrypt_history: bool,
    clear_history: bool,
}

impl<'a> PageBuilder<'a> {
    pub fn new(request: &'a InertiaRequest, version: &'a str) -> Self {
        Self {
            request,
            version,
            shared: InertiaShared::default(),
            encrypt_history: false,
            clear_history: false,
        }
    }

    pub fn shared(mut self, shared: InertiaShared) -> Self {
        self.shared = shared;
        self
    }

    /// Used when the request carries no encrypt-history override.
    pub fn encrypt_history_default(mut self, encrypt_history: bool) -> Self {
        self.encrypt_history = encrypt_history;
        self
    }

    pub fn clear_history(mut self, clear_history: bool) -> Self {
        self.clear_history = clear_history;
        self
    }

    pub fn build(self, component: Component, props: InertiaProps) -> InertiaPage {
        let is_partial = self.request.is_partial_render(&component.0);

        let deferred_props = if is_partial {
            None
        } else {
            Self::deferred_manifest(&props)
        };
        let merge_props = self.merge_list(&props);

        let mut merged = self.shared.into_props();
        merged.extend(props);

        let partial_keys = self.request.partial_keys();
        merged.retain(|key, prop| {
            if is_partial {
                partial_keys.contains(&key.as_str())
            } else {
                !prop.ignore_on_first_load()
            }
        });

        let mut resolved = Map::with_capacity(merged.len());
        for (key, prop) in merged {
            resolved.insert(key, prop.resolve());
        }

        let mut page = InertiaPage::new(
            component,
            self.request.url().to_string(),
            self.version.to_string(),
            resolved,
        );
        page.encrypt_history = self
            .request
            .encrypt_history()
            .unwrap_or(self.encrypt_history);
        page.clear_history = self.clear_history;
        page.deferred_props = deferred_props;
        page.merge_props = merge_props;

        page
    }

    fn deferred_manifest(props: &InertiaProps) -> Option<IndexMap<String, Vec<String>>> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();

        for (key, prop) in props {
            if let Some(group) = prop.deferred_group() {
                groups.entry(group.to_string()).or_default().push(key.clone());
            }
        }

        (!groups.is_empty()).then_some(groups)
    }

    /// A reset key is never listed, even when its prop asks to be merged.
    fn merge_list(&self, props: &InertiaProps) -> Option<Vec<String>> {
        let reset_keys = self.request.reset_keys();

        let merge_props: Vec<String> = props
            .iter()
            .filter(|(key, prop)| prop.should_merge() && !reset_keys.contains(&key.as_str()))
            .map(|(key, _)| key.clone())
            .collect();

        (!merge_props.is_empty()).then_some(merge_props)
    }
}
