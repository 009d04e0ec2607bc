//! Field rules and normalization

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use super::candidate::{AddressCandidate, UserCandidate};
use crate::entities::{Address, User, DEFAULT_COUNTRY};

/// Maximum number of characters in a name
pub const NAME_MAX_LENGTH: u64 = 100;

/// Order in which violations are reported
pub const FIELD_ORDER: [&str; 3] = ["name", "email", "phone"];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("EMAIL_REGEX is a valid regex pattern")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s()\-]+$").expect("PHONE_REGEX is a valid regex pattern")
});

/// One violated rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn required(field: &str) -> Self {
        let message = match field {
            "name" => "Name is required",
            "email" => "Email is required",
            "phone" => "Phone number is required",
            _ => "Field is required",
        };
        Self::new(field, message)
    }
}

/// Length and pattern rules, run on fields that are present after trimming
#[derive(Debug, Validate)]
struct FieldChecks {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    name: Option<String>,

    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email"))]
    email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Please enter a valid phone number"))]
    phone: Option<String>,
}

impl FieldChecks {
    fn run(self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => flatten(&errors),
        }
    }
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string);
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}

fn sort_by_field(errors: &mut [FieldError]) {
    errors.sort_by_key(|e| {
        FIELD_ORDER
            .iter()
            .position(|f| *f == e.field)
            .unwrap_or(FIELD_ORDER.len())
    });
}

/// Trim a string, treating whitespace-only input as absent
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_email(value: Option<String>) -> Option<String> {
    clean(value).map(|v| v.to_lowercase())
}

/// Normalized, fully valid input for a new record (uniqueness not yet checked)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub is_active: bool,
}

impl NewUser {
    /// Turn the validated input into a record with fresh timestamps
    pub fn into_user(self, id: crate::value_objects::RecordId) -> User {
        let mut user = User::new(id, self.name, self.email, self.phone);
        user.address = self.address;
        user.is_active = self.is_active;
        user
    }
}

/// Validate a full candidate for creation.
///
/// Every violated field is reported, ordered name, email, phone. A field that
/// is missing only gets its "required" error; length and pattern rules are
/// not run on it.
pub fn normalize_new(candidate: UserCandidate) -> Result<NewUser, Vec<FieldError>> {
    let name = clean(candidate.name);
    let email = clean_email(candidate.email);
    let phone = clean(candidate.phone);

    let mut errors: Vec<FieldError> = [("name", &name), ("email", &email), ("phone", &phone)]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| FieldError::required(field))
        .collect();

    errors.extend(
        FieldChecks {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
        }
        .run(),
    );

    match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) if errors.is_empty() => Ok(NewUser {
            name,
            email,
            phone,
            address: new_address(candidate.address.unwrap_or_default()),
            is_active: candidate.is_active.unwrap_or(true),
        }),
        _ => {
            sort_by_field(&mut errors);
            Err(errors)
        }
    }
}

fn new_address(candidate: AddressCandidate) -> Address {
    Address {
        street: clean(candidate.street),
        city: clean(candidate.city),
        state: clean(candidate.state),
        zip_code: clean(candidate.zip_code),
        country: clean(candidate.country).or_else(|| Some(DEFAULT_COUNTRY.to_string())),
    }
}

/// Change to a single address part
///
/// `None` keeps the stored part, `Some(None)` clears it, `Some(Some(_))`
/// replaces it. A cleared country already holds the default here, so the
/// patch carries exactly the values to store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub street: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub zip_code: Option<Option<String>>,
    pub country: Option<Option<String>>,
}

impl AddressPatch {
    fn from_candidate(candidate: AddressCandidate) -> Self {
        let part = |value: Option<String>| value.map(|v| clean(Some(v)));
        Self {
            street: part(candidate.street),
            city: part(candidate.city),
            state: part(candidate.state),
            zip_code: part(candidate.zip_code),
            country: part(candidate.country)
                .map(|c| c.or_else(|| Some(DEFAULT_COUNTRY.to_string()))),
        }
    }

    fn apply_to(&self, address: &mut Address) -> bool {
        let mut changed = false;
        let mut set = |slot: &mut Option<String>, value: &Option<Option<String>>| {
            if let Some(value) = value {
                if *slot != *value {
                    slot.clone_from(value);
                    changed = true;
                }
            }
        };

        set(&mut address.street, &self.street);
        set(&mut address.city, &self.city);
        set(&mut address.state, &self.state);
        set(&mut address.zip_code, &self.zip_code);
        set(&mut address.country, &self.country);

        changed
    }
}

/// Normalized, valid partial update (uniqueness not yet checked)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressPatch>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Whether the patch names no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.is_active.is_none()
    }

    /// Merge the patch into a stored record, returning whether anything changed.
    ///
    /// Touches `updated_at` only when a value actually changed.
    pub fn apply_to(&self, user: &mut User) -> bool {
        let mut changed = false;

        for (slot, value) in [
            (&mut user.name, &self.name),
            (&mut user.email, &self.email),
            (&mut user.phone, &self.phone),
        ] {
            if let Some(value) = value {
                if *slot != *value {
                    slot.clone_from(value);
                    changed = true;
                }
            }
        }

        if let Some(address) = &self.address {
            changed |= address.apply_to(&mut user.address);
        }

        if let Some(active) = self.is_active {
            if user.is_active != active {
                user.is_active = active;
                changed = true;
            }
        }

        if changed {
            user.touch();
        }
        changed
    }
}

/// Validate a partial candidate for update.
///
/// Only fields that are present are checked. Blank strings count as absent
/// and leave the stored value untouched, so required rules never fire here.
pub fn normalize_patch(candidate: UserCandidate) -> Result<UserPatch, Vec<FieldError>> {
    let patch = UserPatch {
        name: clean(candidate.name),
        email: clean_email(candidate.email),
        phone: clean(candidate.phone),
        address: candidate.address.map(AddressPatch::from_candidate),
        is_active: candidate.is_active,
    };

    let mut errors = FieldChecks {
        name: patch.name.clone(),
        email: patch.email.clone(),
        phone: patch.phone.clone(),
    }
    .run();

    if errors.is_empty() {
        Ok(patch)
    } else {
        sort_by_field(&mut errors);
        Err(errors)
    }
}
