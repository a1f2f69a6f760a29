//! Users Repository

use jiff::Timestamp;

use crate::{
    database::{Store, Tx},
    domain::users::models::{NewUser, User, UserUuid},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct UsersRepository;

impl UsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_user(&self, store: &Store, user: UserUuid) -> Option<User> {
        store.users.get(&user).cloned()
    }

    pub(crate) fn find_by_email(&self, store: &Store, email: &str) -> Option<User> {
        store.users.values().find(|u| u.email == email).cloned()
    }

    pub(crate) fn insert_user(&self, tx: &mut Tx, user: NewUser) -> User {
        let row = User {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            created_at: Timestamp::now(),
        };

        tx.users.insert(row.uuid, row.clone());

        row
    }
}
