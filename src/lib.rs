//! Password policy and account validation for the Mainframe admin console
//!
//! This library checks passwords against the Mainframe composition policy and
//! validates the account, role, user and session records exchanged with the
//! backend. The same checks run in the console before a request is sent and
//! on the server when it is received.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `MAINFRAME_ALLOWED_SPECIALS`: Characters that count as special
//!   (default: `!@#$%^&*()-_=+?`)
//!
//! # Example
//!
//! ```rust,no_run
//! use mainframe_validation::{Outcome, init_allowed_specials, validate_password};
//! use secrecy::SecretString;
//!
//! // Install the allowed specials set (call once at startup)
//! init_allowed_specials().expect("Invalid allowed specials");
//!
//! let password = SecretString::new("AAbb11!!".to_string().into());
//! match validate_password(&password) {
//!     Outcome::Accepted => println!("ok"),
//!     Outcome::Rejected(violations) => {
//!         for v in violations {
//!             println!("{}", v.message);
//!         }
//!     }
//! }
//! ```

pub mod charclass;
mod outcome;
mod policy;
mod rules;
pub mod schema;
mod specials;

// Public API
pub use outcome::{FieldErrors, Outcome, PasswordOutcome, SchemaOutcome, Violation};
pub use policy::{secrets_match, validate_password};
pub use rules::{MIN_CLASS_COUNT, PolicyRule};
pub use schema::{
    AuthenticatedUser, CreateUserRequest, DecodeError, LoginRequest, LoginResponse, Role,
    RoleName, Schema, SessionSummary, User, UserBase,
};
pub use specials::{
    AllowedSpecials, DEFAULT_ALLOWED_SPECIALS, SPECIALS_ENV_VAR, SpecialsError,
    allowed_specials, init_allowed_specials, init_allowed_specials_from,
};
