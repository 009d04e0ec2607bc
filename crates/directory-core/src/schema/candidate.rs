//! Raw, unvalidated user input

/// Address parts as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCandidate {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// User fields as supplied by a caller.
///
/// `None` means the caller did not send the field. On create that makes
/// required fields fail; on update it leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressCandidate>,
    pub is_active: Option<bool>,
}
