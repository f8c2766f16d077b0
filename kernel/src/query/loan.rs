use crate::entity::{BookId, BorrowerEmail, Loan};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanQuery<Connection: 'static + Send>: Sync + Send + 'static {
    /// Oldest matching loan when the borrower holds several for one book.
    async fn find_active(
        &self,
        con: &mut Connection,
        book_id: &BookId,
        borrower_email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Loan>, KernelError>;
    async fn find_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;
}

pub trait DependOnLoanQuery<Connection: 'static + Send>: Sync + Send + 'static {
    type LoanQuery: LoanQuery<Connection>;
    fn loan_query(&self) -> &Self::LoanQuery;
}
