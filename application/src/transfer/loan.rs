use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructLoan, Loan};

#[derive(Debug, Clone, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub borrower_name: String,
    pub borrower_email: String,
    pub due_date: String,
    pub created_at: OffsetDateTime,
}

impl From<Loan> for LoanDto {
    fn from(value: Loan) -> Self {
        let DestructLoan {
            id,
            book_id,
            borrower_name,
            borrower_email,
            due_date,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            borrower_name: borrower_name.into(),
            borrower_email: borrower_email.into(),
            due_date: due_date.into(),
            created_at: created_at.into(),
        }
    }
}

pub struct BorrowBookDto {
    pub book_id: Uuid,
    pub borrower_name: String,
    pub borrower_email: String,
    pub due_date: String,
}

pub struct ReturnBookDto {
    pub book_id: Uuid,
    pub borrower_email: String,
}

pub struct GetLoansDto {
    pub book_id: Uuid,
}
