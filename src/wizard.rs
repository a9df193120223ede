//! Session-backed wizard state
//!
//! Multi-step form flows persist their intermediate answers under a
//! namespaced session key. The stored value is a JSON object with four
//! verbs: get, set, merge, clear. An absent key and a cleared key are
//! observationally identical (both read back as an empty object).
//!
//! Concurrent requests on the same session are last-write-wins; this
//! store does not arbitrate lost updates.

use crate::session::Session;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
	#[error("Wizard state serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Accessor for one wizard namespace within a session.
///
/// # Examples
///
/// ```
/// use licence_forms::{Session, WizardStore};
/// use serde_json::{json, Map};
///
/// let store = WizardStore::new("notificationsSearch");
/// let mut session = Session::new();
///
/// let mut step = Map::new();
/// step.insert("step1".to_string(), json!("A"));
/// store.merge(&mut session, step);
///
/// assert_eq!(store.get(&session)["step1"], json!("A"));
/// ```
#[derive(Debug, Clone)]
pub struct WizardStore {
	key: String,
}

impl WizardStore {
	/// Create a store for the given namespace key.
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	/// The namespace key within the session.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Read the namespace, normalizing an absent key to an empty map.
	///
	/// A stored value that is not a JSON object is shape drift from
	/// outside this store; it is logged and read as empty.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{Session, WizardStore};
	///
	/// let store = WizardStore::new("returnsFlow");
	/// let session = Session::new();
	///
	/// assert!(store.get(&session).is_empty());
	/// ```
	pub fn get(&self, session: &Session) -> Map<String, Value> {
		match session.get(&self.key) {
			None => Map::new(),
			Some(Value::Object(map)) => map.clone(),
			Some(_) => {
				warn!(key = %self.key, "wizard state is not an object; reading as empty");
				Map::new()
			}
		}
	}

	/// Replace the whole namespace map.
	pub fn set(&self, session: &mut Session, data: Map<String, Value>) {
		session.set(&self.key, Value::Object(data));
	}

	/// Shallow-merge `data` over the stored map; incoming keys win.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{Session, WizardStore};
	/// use serde_json::{json, Map};
	///
	/// let store = WizardStore::new("returnsFlow");
	/// let mut session = Session::new();
	///
	/// let mut first = Map::new();
	/// first.insert("a".to_string(), json!(1));
	/// store.merge(&mut session, first);
	///
	/// let mut second = Map::new();
	/// second.insert("b".to_string(), json!(2));
	/// store.merge(&mut session, second);
	///
	/// let data = store.get(&session);
	/// assert_eq!(data["a"], json!(1));
	/// assert_eq!(data["b"], json!(2));
	/// ```
	pub fn merge(&self, session: &mut Session, data: Map<String, Value>) {
		let mut merged = self.get(session);
		for (key, value) in data {
			merged.insert(key, value);
		}
		self.set(session, merged);
	}

	/// Reset the namespace to an empty map.
	pub fn clear(&self, session: &mut Session) {
		self.set(session, Map::new());
	}

	/// Read the namespace into a declared state type, defaulting when
	/// the key is absent.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{Session, WizardStore};
	/// use serde::{Deserialize, Serialize};
	///
	/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
	/// struct SearchState {
	/// 	#[serde(default)]
	/// 	licence_number: String,
	/// }
	///
	/// let store = WizardStore::new("licenceSearch");
	/// let mut session = Session::new();
	///
	/// let state: SearchState = store.get_as(&session).unwrap();
	/// assert_eq!(state, SearchState::default());
	///
	/// store.set_from(&mut session, &SearchState { licence_number: "AN/03/28".into() }).unwrap();
	/// let state: SearchState = store.get_as(&session).unwrap();
	/// assert_eq!(state.licence_number, "AN/03/28");
	/// ```
	pub fn get_as<T>(&self, session: &Session) -> Result<T, WizardError>
	where
		T: DeserializeOwned + Default,
	{
		match session.get(&self.key) {
			None => Ok(T::default()),
			Some(value) => Ok(serde_json::from_value(value.clone())?),
		}
	}

	/// Write a declared state type into the namespace.
	pub fn set_from<T: Serialize>(&self, session: &mut Session, state: &T) -> Result<(), WizardError> {
		session.set(&self.key, serde_json::to_value(state)?);
		Ok(())
	}
}
