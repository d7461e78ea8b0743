use crate::props::{InertiaProp, InertiaProps};

/// Per-request bag of props merged into every page rendered for that request.
///
/// Handler props win over shared ones on key collision. The store lives in the
/// request extensions, so it is created on the first `share` and dropped with the
/// request.
#[derive(Clone, Debug, Default)]
pub struct InertiaShared {
    props: InertiaProps,
}

impl InertiaShared {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow insert, last write wins.
    pub fn set(&mut self, key: impl Into<String>, prop: impl Into<InertiaProp>) {
        self.props.insert(key.into(), prop.into());
    }

    pub fn extend(&mut self, props: InertiaProps) {
        self.props.extend(props);
    }

    pub fn all(&self) -> &InertiaProps {
        &self.props
    }

    pub fn into_props(self) -> InertiaProps {
        self.props
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl From<InertiaProps> for InertiaShared {
    fn from(props: InertiaProps) -> Self {
        Self { props }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let mut shared = InertiaShared::new();
        assert!(shared.is_empty());

        shared.set("position", json!("defense"));
        shared.set("number", json!(29));
        shared.set("position", json!("goalie"));

        let keys: Vec<&String> = shared.all().keys().collect();
        assert_eq!(keys, vec!["position", "number"]);

        let position = shared.into_props().shift_remove("position").unwrap().resolve();
        assert_eq!(position, json!("goalie"));
    }

    #[test]
    fn test_extend_merges_shallowly() {
        let mut shared = InertiaShared::new();
        shared.set("user", json!({"name": "Example User"}));

        let mut more = InertiaProps::new();
        more.insert("user".into(), json!({"id": 1}).into());
        more.insert("app_name".into(), json!("Inertia").into());
        shared.extend(more);

        let props = shared.into_props();
        assert_eq!(props.len(), 2);
        assert_eq!(props["user"].clone().resolve(), json!({"id": 1}));
    }
}
