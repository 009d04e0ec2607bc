//! Record schema - normalization and field rules for user records
//!
//! Candidates come in raw from the outside world. [`normalize_new`] and
//! [`normalize_patch`] trim every string, lowercase the email, fill defaults and
//! check the field rules in priority order (required, then length, then
//! pattern). Email uniqueness needs storage and is checked by the caller once
//! everything here has passed.

mod candidate;
mod rules;

pub use candidate::{AddressCandidate, UserCandidate};
pub use rules::{
    normalize_new, normalize_patch, AddressPatch, FieldError, NewUser, UserPatch, FIELD_ORDER,
    NAME_MAX_LENGTH,
};
