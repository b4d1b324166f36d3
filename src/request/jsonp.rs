//! JSONP callback bookkeeping.
//!
//! The page side of JSONP (injecting a script element) is the caller's job. The
//! registry assigns each request an id, builds the URL naming its callback, and
//! delivers the payload to the right callback exactly once.

use crate::util::{KeygenError, Keygen};
use crate::value::Value;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_CB_PARAM: &str = "callback";
const DEFAULT_NAMESPACE: &str = "_TUL_jsonp";

/// Options for one JSONP request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonpOptions {
    pub url: String,
    /// Query parameter carrying the callback name. Defaults to `callback`.
    #[serde(default)]
    pub cb_param: Option<String>,
}

impl JsonpOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cb_param: None,
        }
    }

    pub fn cb_param(mut self, name: impl Into<String>) -> Self {
        self.cb_param = Some(name.into());
        self
    }
}

/// A registered request: its id and the URL to load.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonpRequest {
    pub id: String,
    pub url: String,
}

type Callback = Box<dyn FnOnce(Value)>;

/// Pending JSONP callbacks, keyed by request id.
pub struct JsonpRegistry {
    namespace: String,
    keys: Keygen,
    pending: IndexMap<String, Callback>,
}

impl JsonpRegistry {
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    /// Callbacks are addressed as `namespace['id']` in generated URLs.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            keys: Keygen::new(),
            pending: IndexMap::new(),
        }
    }

    /// Stores `callback` under a fresh id and returns the id with the callback URL.
    pub fn register(
        &mut self,
        options: &JsonpOptions,
        callback: impl FnOnce(Value) + 'static,
    ) -> Result<JsonpRequest, KeygenError> {
        let id = self.keys.next_key()?;
        let cb_param = options.cb_param.as_deref().unwrap_or(DEFAULT_CB_PARAM);
        let url = callback_url(&options.url, cb_param, &format!("{}['{id}']", self.namespace));

        self.pending.insert(id.clone(), Box::new(callback));
        debug!(%id, %url, "Registered JSONP callback");
        Ok(JsonpRequest { id, url })
    }

    /// Delivers `payload` to the callback for `id` and forgets it.
    ///
    /// Returns `false` if no callback is pending under `id`, including when it was
    /// already dispatched.
    pub fn dispatch(&mut self, id: &str, payload: Value) -> bool {
        match self.pending.shift_remove(id) {
            Some(callback) => {
                debug!(%id, "Dispatching JSONP payload");
                callback(payload);
                true
            }
            None => {
                warn!(%id, "No pending JSONP callback");
                false
            }
        }
    }

    /// Forgets the callback for `id` without invoking it.
    pub fn cancel(&mut self, id: &str) -> bool {
        self.pending.shift_remove(id).is_some()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for JsonpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JsonpRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonpRegistry")
            .field("namespace", &self.namespace)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Appends `cb_param=callback` to `url`.
///
/// A `?` is added when the URL has none; a `&` is added only when the query string
/// already has content.
pub fn callback_url(url: &str, cb_param: &str, callback: &str) -> String {
    let (separator, joiner) = match url.split_once('?') {
        None => ("?", ""),
        Some((_, "")) => ("", ""),
        Some(_) => ("", "&"),
    };
    format!("{url}{separator}{joiner}{cb_param}={callback}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_callback_url_joining() {
        assert_eq!(callback_url("http://x/a", "callback", "f"), "http://x/a?callback=f");
        assert_eq!(callback_url("http://x/a?", "callback", "f"), "http://x/a?callback=f");
        assert_eq!(callback_url("http://x/a?q=1", "cb", "f"), "http://x/a?q=1&cb=f");
    }

    #[test]
    fn test_register_builds_url() {
        let mut registry = JsonpRegistry::new();
        let req = registry
            .register(&JsonpOptions::new("http://api/people?q=1"), |_| {})
            .unwrap();

        assert!(req.id.ends_with("-1"));
        assert_eq!(
            req.url,
            format!("http://api/people?q=1&callback=_TUL_jsonp['{}']", req.id)
        );
        assert!(registry.is_pending(&req.id));
    }

    #[test]
    fn test_dispatches_once() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut registry = JsonpRegistry::with_namespace("cbs");

        let sink = received.clone();
        let req = registry
            .register(&JsonpOptions::new("/feed").cb_param("jsonp"), move |v| {
                sink.borrow_mut().push(v)
            })
            .unwrap();
        assert!(req.url.starts_with("/feed?jsonp=cbs['"));

        assert!(registry.dispatch(&req.id, Value::from(1)));
        assert!(!registry.dispatch(&req.id, Value::from(2)));
        assert_eq!(*received.borrow(), vec![Value::from(1)]);
        assert_eq!(registry.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut registry = JsonpRegistry::new();
        let req = registry.register(&JsonpOptions::new("/feed"), |_| {}).unwrap();
        assert!(registry.cancel(&req.id));
        assert!(!registry.dispatch(&req.id, Value::Null));
    }

    #[test]
    fn test_ids_are_unique_per_registry() {
        let mut registry = JsonpRegistry::new();
        let a = registry.register(&JsonpOptions::new("/a"), |_| {}).unwrap();
        let b = registry.register(&JsonpOptions::new("/b"), |_| {}).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(registry.pending(), 2);
    }
}
