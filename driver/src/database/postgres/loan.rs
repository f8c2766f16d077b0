use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{
    BookId, BorrowerEmail, BorrowerName, CreatedAt, Loan, LoanId, ReturnDueDate,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<PoolConnection<Postgres>> for PostgresLoanRepository {
    async fn find_active(
        &self,
        con: &mut PoolConnection<Postgres>,
        book_id: &BookId,
        borrower_email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_active(con, book_id, borrower_email)
            .await
            .convert_error()
    }

    async fn find_by_book_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_book_id(con, book_id)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl LoanModifier<PoolConnection<Postgres>> for PostgresLoanRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con, loan).await.convert_error()
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        loan_id: &LoanId,
    ) -> error_stack::Result<bool, KernelError> {
        PgLoanInternal::delete(con, loan_id).await.convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    book_id: Uuid,
    borrower_name: String,
    borrower_email: String,
    due_date: String,
    created_at: OffsetDateTime,
}

impl From<LoanRow> for Loan {
    fn from(value: LoanRow) -> Self {
        Loan::new(
            LoanId::new(value.id),
            BookId::new(value.book_id),
            BorrowerName::new(value.borrower_name),
            BorrowerEmail::new(value.borrower_email),
            ReturnDueDate::new(value.due_date),
            CreatedAt::new(value.created_at),
        )
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_active(
        con: &mut PgConnection,
        book_id: &BookId,
        borrower_email: &BorrowerEmail,
    ) -> Result<Option<Loan>, DriverError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, borrower_name, borrower_email, due_date, created_at
            FROM book_loans
            WHERE book_id = $1 AND borrower_email = $2
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(book_id.as_ref())
        .bind(borrower_email.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Loan::from))
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> Result<Vec<Loan>, DriverError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, borrower_name, borrower_email, due_date, created_at
            FROM book_loans
            WHERE book_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO book_loans (id, book_id, borrower_name, borrower_email, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.borrower_name().as_ref())
        .bind(loan.borrower_email().as_ref())
        .bind(loan.due_date().as_ref())
        .bind(loan.created_at().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, loan_id: &LoanId) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_loans
            WHERE id = $1
            "#,
        )
        .bind(loan_id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
