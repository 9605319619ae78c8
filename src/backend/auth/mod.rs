//! Authentication Module
//!
//! Token verification and user lookups. Issuing tokens (sign-up, login) is
//! the account service's job; this module only checks what it issued.
//!
//! ```rust,no_run
//! use marketchat::backend::auth::sessions::{create_token, verify_token};
//!
//! let token = create_token(7, None, "secret").unwrap();
//! let claims = verify_token(&token, "secret").unwrap();
//! assert_eq!(claims.user_id(), Some(7));
//! ```

/// User lookups
pub mod users;

/// JWT verification
pub mod sessions;

pub use sessions::{bearer_token, create_token, verify_token, Claims};
pub use users::{get_user_by_id, user_exists, User};
