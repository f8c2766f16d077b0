use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DependOnDatabaseConnection, QueryDatabaseConnection};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, LoanQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnLoanModifier, LoanModifier,
};
use kernel::prelude::entity::{
    BookId, BorrowerEmail, BorrowerName, CreatedAt, Loan, LoanId, ReturnDueDate,
};
use kernel::KernelError;

use crate::transfer::{BorrowBookDto, GetLoansDto, LoanDto, ReturnBookDto};

#[async_trait::async_trait]
pub trait BorrowBookService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanModifier<Connection>
{
    async fn borrow_book(&self, dto: BorrowBookDto) -> error_stack::Result<Uuid, KernelError> {
        if dto.borrower_name.trim().is_empty()
            || dto.borrower_email.trim().is_empty()
            || dto.due_date.trim().is_empty()
        {
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable("borrower name, email and return date are required"));
        }

        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("unknown book id"))?;
        if *book.quantity().as_ref() < 1 {
            return Err(Report::new(KernelError::OutOfStock));
        }

        // The conditional adjust is the authoritative stock check. Under
        // concurrent borrows the read above may be stale, so a rejected
        // guard here is still OutOfStock, never a double decrement.
        let adjusted = self
            .book_modifier()
            .adjust_quantity(&mut connection, &book_id, -1)
            .await?;
        if adjusted.is_none() {
            return Err(Report::new(KernelError::OutOfStock));
        }

        let loan_id = Uuid::new_v4();
        let loan = Loan::new(
            LoanId::new(loan_id),
            book_id.clone(),
            BorrowerName::new(dto.borrower_name),
            BorrowerEmail::new(dto.borrower_email),
            ReturnDueDate::new(dto.due_date),
            CreatedAt::new(OffsetDateTime::now_utc()),
        );
        if let Err(report) = self.loan_modifier().create(&mut connection, &loan).await {
            // Undo the decrement so stock stays consistent with the loans
            // that actually exist.
            let restored = self
                .book_modifier()
                .adjust_quantity(&mut connection, &book_id, 1)
                .await;
            if !matches!(restored, Ok(Some(_))) {
                tracing::error!(
                    book_id = %dto.book_id,
                    "quantity not restored after loan creation failure"
                );
            }
            return Err(report.change_context(KernelError::Internal));
        }

        Ok(loan_id)
    }
}

impl<Connection: 'static + Send, T> BorrowBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait ReturnBookService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnLoanModifier<Connection>
{
    async fn return_book(&self, dto: ReturnBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let borrower_email = BorrowerEmail::new(dto.borrower_email);
        let loan = self
            .loan_query()
            .find_active(&mut connection, &book_id, &borrower_email)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("no active loan for this book and email")
            })?;

        let deleted = self.loan_modifier().delete(&mut connection, loan.id()).await?;
        if !deleted {
            // A concurrent return already consumed the loan.
            return Err(Report::new(KernelError::NotFound).attach_printable("loan already returned"));
        }

        // The loan is gone; a failure from here on leaves the book
        // understocked and must surface, not be swallowed.
        match self
            .book_modifier()
            .adjust_quantity(&mut connection, &book_id, 1)
            .await
        {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                tracing::error!(
                    book_id = %dto.book_id,
                    "loan deleted but quantity not restored"
                );
                Err(Report::new(KernelError::Internal)
                    .attach_printable("stock restore rejected after loan deletion"))
            }
            Err(report) => {
                tracing::error!(
                    book_id = %dto.book_id,
                    "loan deleted but quantity not restored"
                );
                Err(report.change_context(KernelError::Internal))
            }
        }
    }
}

impl<Connection: 'static + Send, T> ReturnBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait GetLoanService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnLoanQuery<Connection>
{
    async fn get_loans_for_book(
        &self,
        dto: GetLoansDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let loans = self
            .loan_query()
            .find_by_book_id(&mut connection, &book_id)
            .await?;
        Ok(loans.into_iter().map(LoanDto::from).collect())
    }
}

impl<Connection: 'static + Send, T> GetLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnLoanQuery<Connection>
{
}

#[cfg(test)]
mod test {
    use driver::database::MemoryDatabase;
    use kernel::KernelError;

    use crate::service::{BorrowBookService, CreateBookService, GetBookService, GetLoanService, ReturnBookService};
    use crate::transfer::{BorrowBookDto, CreateBookDto, GetBookDto, GetLoansDto, ReturnBookDto};

    fn create_dto(quantity: i32) -> CreateBookDto {
        CreateBookDto {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Desert planet".to_string(),
            category: "Sci-Fi".to_string(),
            image: "dune.png".to_string(),
            publication_year: 1965,
            rating: 4.8,
            quantity,
        }
    }

    fn borrow_dto(book_id: uuid::Uuid, email: &str) -> BorrowBookDto {
        BorrowBookDto {
            book_id,
            borrower_name: "Reader".to_string(),
            borrower_email: email.to_string(),
            due_date: "2024-06-01".to_string(),
        }
    }

    async fn quantity_of(db: &MemoryDatabase, id: uuid::Uuid) -> i32 {
        db.get_book(GetBookDto { id })
            .await
            .expect("store reachable")
            .expect("book exists")
            .quantity
    }

    #[tokio::test]
    async fn borrow_decrements_and_creates_loan() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(2)).await?;

        db.borrow_book(borrow_dto(id, "a@x.com")).await?;

        assert_eq!(quantity_of(&db, id).await, 1);
        let loans = db.get_loans_for_book(GetLoansDto { book_id: id }).await?;
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].borrower_email, "a@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn borrow_with_missing_fields_is_invalid_input() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(1)).await?;

        let mut dto = borrow_dto(id, "a@x.com");
        dto.borrower_email = String::new();
        let report = db
            .borrow_book(dto)
            .await
            .expect_err("empty email must be rejected");
        assert!(matches!(report.current_context(), KernelError::InvalidInput));

        // Nothing changed.
        assert_eq!(quantity_of(&db, id).await, 1);
        assert!(db
            .get_loans_for_book(GetLoansDto { book_id: id })
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn borrow_unknown_book_is_not_found() {
        let db = MemoryDatabase::new();
        let report = db
            .borrow_book(borrow_dto(uuid::Uuid::new_v4(), "a@x.com"))
            .await
            .expect_err("unknown book must be rejected");
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn borrow_out_of_stock_leaves_state_unchanged() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(0)).await?;

        let report = db
            .borrow_book(borrow_dto(id, "a@x.com"))
            .await
            .expect_err("zero stock must be rejected");
        assert!(matches!(report.current_context(), KernelError::OutOfStock));

        assert_eq!(quantity_of(&db, id).await, 0);
        assert!(db
            .get_loans_for_book(GetLoansDto { book_id: id })
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn borrow_then_return_restores_quantity() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(1)).await?;

        db.borrow_book(borrow_dto(id, "a@x.com")).await?;
        assert_eq!(quantity_of(&db, id).await, 0);

        // Second borrower hits the empty shelf.
        let report = db
            .borrow_book(borrow_dto(id, "b@x.com"))
            .await
            .expect_err("no stock left");
        assert!(matches!(report.current_context(), KernelError::OutOfStock));

        db.return_book(ReturnBookDto {
            book_id: id,
            borrower_email: "a@x.com".to_string(),
        })
        .await?;

        assert_eq!(quantity_of(&db, id).await, 1);
        assert!(db
            .get_loans_for_book(GetLoansDto { book_id: id })
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn return_without_loan_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(1)).await?;

        let report = db
            .return_book(ReturnBookDto {
                book_id: id,
                borrower_email: "a@x.com".to_string(),
            })
            .await
            .expect_err("nothing to return");
        assert!(matches!(report.current_context(), KernelError::NotFound));
        assert_eq!(quantity_of(&db, id).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn same_borrower_may_hold_two_loans() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(2)).await?;

        db.borrow_book(borrow_dto(id, "a@x.com")).await?;
        db.borrow_book(borrow_dto(id, "a@x.com")).await?;

        assert_eq!(quantity_of(&db, id).await, 0);
        let loans = db.get_loans_for_book(GetLoansDto { book_id: id }).await?;
        assert_eq!(loans.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_borrows_never_oversell() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let stock = 3;
        let tasks = 16;
        let id = db.create_book(create_dto(stock)).await?;

        let mut handles = Vec::new();
        for i in 0..tasks {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                let email = format!("reader-{i}@example.com");
                db.borrow_book(BorrowBookDto {
                    book_id: id,
                    borrower_name: format!("reader-{i}"),
                    borrower_email: email,
                    due_date: "2024-06-01".to_string(),
                })
                .await
            }));
        }

        let mut successes = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.expect("borrow task panicked") {
                Ok(_) => successes += 1,
                Err(report) => {
                    assert!(matches!(report.current_context(), KernelError::OutOfStock));
                    rejected += 1;
                }
            }
        }

        assert_eq!(successes, stock);
        assert_eq!(rejected, tasks - stock);
        assert_eq!(quantity_of(&db, id).await, 0);
        Ok(())
    }
}
