use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use kernel::interface::database::QueryDatabaseConnection;
use kernel::interface::query::{DependOnBookQuery, DependOnLoanQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnLoanModifier};
use kernel::prelude::entity::{Book, Loan};
use kernel::KernelError;

pub use self::{book::*, loan::*};

mod book;
mod loan;

/// In-memory rendition of both stores. Clones share state, which makes it
/// suitable for unit tests and for exercising concurrent borrows without a
/// running database.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    books: Arc<RwLock<HashMap<Uuid, Book>>>,
    loans: Arc<RwLock<Vec<Loan>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryConnection {
    pub(in crate::database) books: Arc<RwLock<HashMap<Uuid, Book>>>,
    pub(in crate::database) loans: Arc<RwLock<Vec<Loan>>>,
}

#[async_trait::async_trait]
impl QueryDatabaseConnection<MemoryConnection> for MemoryDatabase {
    async fn transact(&self) -> error_stack::Result<MemoryConnection, KernelError> {
        Ok(MemoryConnection {
            books: Arc::clone(&self.books),
            loans: Arc::clone(&self.loans),
        })
    }
}

impl DependOnBookQuery<MemoryConnection> for MemoryDatabase {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier<MemoryConnection> for MemoryDatabase {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

impl DependOnLoanQuery<MemoryConnection> for MemoryDatabase {
    type LoanQuery = MemoryLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &MemoryLoanRepository
    }
}

impl DependOnLoanModifier<MemoryConnection> for MemoryDatabase {
    type LoanModifier = MemoryLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &MemoryLoanRepository
    }
}
