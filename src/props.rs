use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub type LazyResolver = Arc<dyn Fn() -> Value + Send + Sync>;

/// Default group name of deferred props.
pub const DEFAULT_DEFER_GROUP: &str = "default";

/// A prop value that may hold lazy producers anywhere in its tree.
///
/// Producers are only called by [`PropValue::resolve`], which the page builder
/// runs after filtering, so a producer whose prop isn't sent is never invoked.
#[derive(Clone)]
pub enum PropValue {
    Value(Value),
    Lazy(LazyResolver),
    Map(IndexMap<String, PropValue>),
    List(Vec<PropValue>),
}

impl PropValue {
    pub fn lazy<F>(resolver: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        PropValue::Lazy(Arc::new(resolver))
    }

    /// Walks the tree depth-first, in insertion order, replacing every producer
    /// with its result.
    pub fn resolve(self) -> Value {
        match self {
            PropValue::Value(value) => value,
            PropValue::Lazy(resolver) => resolver(),
            PropValue::Map(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key, value.resolve());
                }
                Value::Object(map)
            }
            PropValue::List(items) => {
                Value::Array(items.into_iter().map(PropValue::resolve).collect())
            }
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PropValue::Lazy(_) => f.write_str("Lazy(..)"),
            PropValue::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            PropValue::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Value(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Value(value.into())
    }
}

impl From<IndexMap<String, PropValue>> for PropValue {
    fn from(entries: IndexMap<String, PropValue>) -> Self {
        PropValue::Map(entries)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        PropValue::List(items)
    }
}

#[derive(Clone, Debug)]
pub enum InertiaProp {
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    Plain(PropValue),
    /// - NEVER included on standard visits
    /// - OPTIONALLY included on partial reloads
    Optional(PropValue),
    /// - NEVER included on standard visits, listed in `deferredProps` under its group
    /// - OPTIONALLY included on partial reloads
    /// - merged client-side when `merge` is set
    Deferred {
        value: PropValue,
        group: String,
        merge: bool,
    },
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ALWAYS merged client-side, unless reset
    Merge(PropValue),
}

impl InertiaProp {
    pub fn plain(value: impl Into<PropValue>) -> Self {
        InertiaProp::Plain(value.into())
    }

    pub fn optional(value: impl Into<PropValue>) -> Self {
        InertiaProp::Optional(value.into())
    }

    #[deprecated(note = "use `InertiaProp::optional` instead")]
    pub fn lazy(value: impl Into<PropValue>) -> Self {
        Self::optional(value)
    }

    pub fn defer(value: impl Into<PropValue>) -> Self {
        InertiaProp::Deferred {
            value: value.into(),
            group: DEFAULT_DEFER_GROUP.to_string(),
            merge: false,
        }
    }

    pub fn merge(value: impl Into<PropValue>) -> Self {
        InertiaProp::Merge(value.into())
    }

    /// Moves a deferred prop into another fetch group. Other variants are returned as they are.
    pub fn group(self, name: impl Into<String>) -> Self {
        match self {
            InertiaProp::Deferred { value, merge, .. } => InertiaProp::Deferred {
                value,
                group: name.into(),
                merge,
            },
            other => other,
        }
    }

    /// Flags the prop to be merged client-side. A plain prop becomes [`InertiaProp::Merge`];
    /// optional props cannot merge and are returned as they are.
    pub fn merging(self) -> Self {
        match self {
            InertiaProp::Deferred { value, group, .. } => InertiaProp::Deferred {
                value,
                group,
                merge: true,
            },
            InertiaProp::Plain(value) => InertiaProp::Merge(value),
            other => other,
        }
    }

    #[inline]
    pub fn ignore_on_first_load(&self) -> bool {
        matches!(
            self,
            InertiaProp::Optional(_) | InertiaProp::Deferred { .. }
        )
    }

    #[inline]
    pub fn should_merge(&self) -> bool {
        match self {
            InertiaProp::Merge(_) => true,
            InertiaProp::Deferred { merge, .. } => *merge,
            InertiaProp::Plain(_) | InertiaProp::Optional(_) => false,
        }
    }

    #[inline]
    pub(crate) fn deferred_group(&self) -> Option<&str> {
        match self {
            InertiaProp::Deferred { group, .. } => Some(group),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn resolve(self) -> Value {
        match self {
            InertiaProp::Plain(value)
            | InertiaProp::Optional(value)
            | InertiaProp::Merge(value)
            | InertiaProp::Deferred { value, .. } => value.resolve(),
        }
    }
}

impl From<Value> for InertiaProp {
    fn from(value: Value) -> Self {
        InertiaProp::Plain(value.into())
    }
}

impl From<PropValue> for InertiaProp {
    fn from(value: PropValue) -> Self {
        InertiaProp::Plain(value)
    }
}

pub type InertiaProps = IndexMap<String, InertiaProp>;
