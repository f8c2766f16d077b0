mod borrower_email;
mod borrower_name;
mod due_date;
mod id;

pub use self::{borrower_email::*, borrower_name::*, due_date::*, id::*};
use destructure::Destructure;
use vodca::References;

use crate::entity::{BookId, CreatedAt};

/// One borrower holding one unit of one book. The record only exists while
/// the loan is active; returning deletes it.
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct Loan {
    id: LoanId,
    book_id: BookId,
    borrower_name: BorrowerName,
    borrower_email: BorrowerEmail,
    due_date: ReturnDueDate,
    created_at: CreatedAt<Loan>,
}

impl Loan {
    pub fn new(
        id: LoanId,
        book_id: BookId,
        borrower_name: BorrowerName,
        borrower_email: BorrowerEmail,
        due_date: ReturnDueDate,
        created_at: CreatedAt<Loan>,
    ) -> Self {
        Self {
            id,
            book_id,
            borrower_name,
            borrower_email,
            due_date,
            created_at,
        }
    }
}
