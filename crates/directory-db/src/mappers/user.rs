//! User entity <-> model mapper

use directory_core::entities::{Address, User};
use directory_core::value_objects::RecordId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: RecordId::new(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: Address {
                street: model.street,
                city: model.city,
                state: model.state,
                zip_code: model.zip_code,
                country: model.country,
            },
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values of a User, ready to bind for insert
pub struct UserRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub country: Option<&'a str>,
    pub is_active: bool,
}

impl<'a> UserRow<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            email: &user.email,
            phone: &user.phone,
            street: user.address.street.as_deref(),
            city: user.address.city.as_deref(),
            state: user.address.state.as_deref(),
            zip_code: user.address.zip_code.as_deref(),
            country: user.address.country.as_deref(),
            is_active: user.is_active,
        }
    }
}
