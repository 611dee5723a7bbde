//! Startup seeding of roles and fixed accounts

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{NewUser, Role},
    repository::UserStore,
};

use super::auth::hash_password;

struct SeedAccount {
    username: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    password: &'static str,
    role: Role,
}

const SEED_ACCOUNTS: [SeedAccount; 5] = [
    SeedAccount {
        username: "admin",
        email: "admin@bookstore.com",
        first_name: "System",
        last_name: "Admin",
        password: "P@ssword1",
        role: Role::Administrator,
    },
    SeedAccount {
        username: "manager",
        email: "manager@bookstore.com",
        first_name: "Store",
        last_name: "Manager",
        password: "P@ssword1",
        role: Role::Administrator,
    },
    SeedAccount {
        username: "alice",
        email: "alice@bookstore.com",
        first_name: "Alice",
        last_name: "Martin",
        password: "P@ssword1",
        role: Role::Customer,
    },
    SeedAccount {
        username: "bob",
        email: "bob@bookstore.com",
        first_name: "Bob",
        last_name: "Chen",
        password: "P@ssword1",
        role: Role::Customer,
    },
    SeedAccount {
        username: "carol",
        email: "carol@bookstore.com",
        first_name: "Carol",
        last_name: "Davis",
        password: "P@ssword1",
        role: Role::Customer,
    },
];

/// What a seeding run changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub users_created: usize,
}

#[derive(Clone)]
pub struct SeedService {
    users: Arc<dyn UserStore>,
}

impl SeedService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Ensure both roles and the five fixed accounts exist. Safe to run on every startup.
    pub async fn seed(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for role in Role::ALL {
            if !self.users.role_exists(role).await? {
                self.users.create_role(role).await?;
                tracing::info!("Seeded role {}", role);
                report.roles_created += 1;
            }
        }

        for account in &SEED_ACCOUNTS {
            let user = match self.users.find_by_username(account.username).await? {
                Some(user) => user,
                None => {
                    let user = self
                        .users
                        .create(&NewUser {
                            username: account.username.to_string(),
                            email: account.email.to_string(),
                            password_hash: hash_password(account.password)?,
                            first_name: Some(account.first_name.to_string()),
                            last_name: Some(account.last_name.to_string()),
                        })
                        .await?;
                    tracing::info!("Seeded user {} ({})", account.username, account.role);
                    report.users_created += 1;
                    user
                }
            };

            let roles = self.users.roles_of(user.id).await?;
            if !roles.contains(&account.role) {
                self.users.add_to_role(user.id, account.role).await?;
            }
        }

        Ok(report)
    }
}
