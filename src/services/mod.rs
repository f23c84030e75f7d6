//! Business logic services

pub mod auth;
pub mod books;
pub mod circulation;
pub mod members;
pub mod session;
pub mod transactions;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub transactions: transactions::TransactionsService,
    pub session: session::SessionService,
    pub auth: auth::AuthService,
    pub circulation: circulation::CirculationService,
}

impl Services {
    /// Create all services over one repository and one session
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let books = books::BooksService::new(repository.clone());
        let members = members::MembersService::new(repository.clone());
        let transactions = transactions::TransactionsService::new(repository);
        let session = session::SessionService::new();

        Self {
            auth: auth::AuthService::new(members.clone(), session.clone()),
            circulation: circulation::CirculationService::new(
                books.clone(),
                members.clone(),
                transactions.clone(),
                session.clone(),
                config.loans.default_duration_days,
            ),
            books,
            members,
            transactions,
            session,
        }
    }
}
