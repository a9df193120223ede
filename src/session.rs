//! Per-request session state
//!
//! Models the session mapping the hosting framework has already
//! materialized for the duration of a request. All access is synchronous;
//! persistence, expiry, and cookie handling belong to the session
//! middleware, not to this crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Session data as key-value pairs, scoped to one authenticated user session.
///
/// # Examples
///
/// ```
/// use licence_forms::Session;
///
/// let session = Session::new();
/// assert!(session.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
	data: HashMap<String, serde_json::Value>,
}

impl Session {
	/// Create a new empty session.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::Session;
	///
	/// let session = Session::new();
	/// assert!(session.is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			data: HashMap::new(),
		}
	}

	/// Get a value from the session.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("user_id", json!("123"));
	/// assert_eq!(session.get("user_id"), Some(&json!("123")));
	/// assert_eq!(session.get("missing"), None);
	/// ```
	pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
		self.data.get(key)
	}

	/// Set a value in the session.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("user_id", json!("123"));
	/// assert_eq!(session.get("user_id"), Some(&json!("123")));
	/// ```
	pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
		self.data.insert(key.into(), value);
	}

	/// Remove a value from the session, returning it if present.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("user_id", json!("123"));
	/// assert_eq!(session.remove("user_id"), Some(json!("123")));
	/// assert_eq!(session.get("user_id"), None);
	/// ```
	pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
		self.data.remove(key)
	}

	/// Check if the session holds no data.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Clear all session data.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("key", json!("value"));
	/// session.clear();
	/// assert!(session.is_empty());
	/// ```
	pub fn clear(&mut self) {
		self.data.clear();
	}
}
