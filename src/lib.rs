//! Form definition and validation for the licensing portal
//!
//! This crate provides the form toolkit shared by the portal's
//! user-facing and internal-staff sites:
//! - serializable field descriptors with widget-specific defaults
//! - form assembly with an action/method target and ordered fields
//! - validation schema composition with collect-all-errors defaults
//! - session-bound CSRF token issuance and constant-time verification
//! - error-to-field decoration for re-rendering failed submissions
//! - session-backed wizard state for multi-step flows
//!
//! Routing, view templating, and backend REST clients are external
//! collaborators; handlers build a [`Form`] per request, bind a token
//! with [`CsrfBinder`], process POSTs through [`submission::submit`],
//! and persist accepted step data through a [`WizardStore`].

pub mod csrf;
pub mod field;
pub mod form;
pub mod schema;
pub mod session;
pub mod submission;
pub mod wizard;

pub use csrf::{CsrfBinder, DEFAULT_TOKEN_KEY};
pub use field::{FieldChoice, FieldDescriptor, FieldOptions, Widget};
pub use form::{Form, FormError, FormResult, Method};
pub use schema::{SchemaError, SchemaOptions, ValidationError, ValidationSchema};
pub use session::Session;
pub use submission::Submission;
pub use wizard::{WizardError, WizardStore};
