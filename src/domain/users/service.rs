//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, User, UserUuid},
        repository::UsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct MemUsersService {
    db: Db,
    repository: UsersRepository,
}

impl MemUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: UsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for MemUsersService {
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await;

        if self.repository.find_by_email(&tx, &user.email).is_some() {
            return Err(UsersServiceError::AlreadyExists);
        }

        let created = self.repository.insert_user(&mut tx, user);

        tx.commit();

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let store = self.db.read().await;

        self.repository
            .get_user(&store, user)
            .ok_or(UsersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user record.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;
}
