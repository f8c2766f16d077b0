use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookId, BorrowerEmail, Loan, LoanId};
use kernel::KernelError;

use crate::database::memory::MemoryConnection;

pub struct MemoryLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<MemoryConnection> for MemoryLoanRepository {
    async fn find_active(
        &self,
        con: &mut MemoryConnection,
        book_id: &BookId,
        borrower_email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        // Insertion order doubles as loan age, so the first hit is the
        // oldest outstanding loan.
        Ok(con
            .loans
            .read()
            .iter()
            .find(|loan| loan.book_id() == book_id && loan.borrower_email() == borrower_email)
            .cloned())
    }

    async fn find_by_book_id(
        &self,
        con: &mut MemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .loans
            .read()
            .iter()
            .filter(|loan| loan.book_id() == book_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LoanModifier<MemoryConnection> for MemoryLoanRepository {
    async fn create(
        &self,
        con: &mut MemoryConnection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        con.loans.write().push(loan.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        loan_id: &LoanId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut loans = con.loans.write();
        match loans.iter().position(|loan| loan.id() == loan_id) {
            Some(index) => {
                loans.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::QueryDatabaseConnection;
    use kernel::interface::query::LoanQuery;
    use kernel::interface::update::LoanModifier;
    use kernel::prelude::entity::{
        BookId, BorrowerEmail, BorrowerName, CreatedAt, Loan, LoanId, ReturnDueDate,
    };
    use kernel::KernelError;
    use time::OffsetDateTime;

    use crate::database::memory::{MemoryDatabase, MemoryLoanRepository};

    fn loan(book_id: BookId, email: &str) -> Loan {
        Loan::new(
            LoanId::new(uuid::Uuid::new_v4()),
            book_id,
            BorrowerName::new("reader".to_string()),
            BorrowerEmail::new(email.to_string()),
            ReturnDueDate::new("2024-06-01".to_string()),
            CreatedAt::new(OffsetDateTime::now_utc()),
        )
    }

    #[tokio::test]
    async fn find_active_matches_book_and_email() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let book_id = BookId::new(uuid::Uuid::new_v4());
        let email = BorrowerEmail::new("reader@example.com".to_string());

        let loan = loan(book_id.clone(), "reader@example.com");
        MemoryLoanRepository.create(&mut con, &loan).await?;

        let found = MemoryLoanRepository
            .find_active(&mut con, &book_id, &email)
            .await?;
        assert_eq!(found, Some(loan.clone()));

        let other = BorrowerEmail::new("other@example.com".to_string());
        let found = MemoryLoanRepository
            .find_active(&mut con, &book_id, &other)
            .await?;
        assert!(found.is_none());

        assert!(MemoryLoanRepository.delete(&mut con, loan.id()).await?);
        assert!(!MemoryLoanRepository.delete(&mut con, loan.id()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn find_active_returns_oldest_duplicate() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let book_id = BookId::new(uuid::Uuid::new_v4());
        let email = BorrowerEmail::new("reader@example.com".to_string());

        let first = loan(book_id.clone(), "reader@example.com");
        let second = loan(book_id.clone(), "reader@example.com");
        MemoryLoanRepository.create(&mut con, &first).await?;
        MemoryLoanRepository.create(&mut con, &second).await?;

        let found = MemoryLoanRepository
            .find_active(&mut con, &book_id, &email)
            .await?;
        assert_eq!(found.as_ref().map(Loan::id), Some(first.id()));

        let listed = MemoryLoanRepository
            .find_by_book_id(&mut con, &book_id)
            .await?;
        assert_eq!(listed.len(), 2);
        Ok(())
    }
}
