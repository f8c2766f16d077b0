use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookDescription, BookId, BookImage, BookQuantity, BookRating,
    BookTitle, PublicationYear,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PoolConnection<Postgres>> for PostgresBookRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PoolConnection<Postgres>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await.convert_error()
    }
}

#[async_trait::async_trait]
impl BookModifier<PoolConnection<Postgres>> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await.convert_error()
    }

    async fn update(
        &self,
        con: &mut PoolConnection<Postgres>,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await.convert_error()
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::delete(con, book_id).await.convert_error()
    }

    async fn adjust_quantity(
        &self,
        con: &mut PoolConnection<Postgres>,
        book_id: &BookId,
        delta: i32,
    ) -> error_stack::Result<Option<BookQuantity>, KernelError> {
        PgBookInternal::adjust_quantity(con, book_id, delta)
            .await
            .convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    description: String,
    category: String,
    image: String,
    publication_year: i32,
    rating: f64,
    quantity: i32,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookDescription::new(value.description),
            BookCategory::new(value.category),
            BookImage::new(value.image),
            PublicationYear::new(value.publication_year),
            BookRating::new(value.rating),
            BookQuantity::new(value.quantity),
        )
    }
}

#[derive(sqlx::FromRow)]
struct QuantityRow {
    quantity: i32,
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(con: &mut PgConnection, id: &BookId) -> Result<Option<Book>, DriverError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, category, image, publication_year, rating, quantity
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        let found = row.map(Book::from);
        Ok(found)
    }

    async fn find_all(con: &mut PgConnection) -> Result<Vec<Book>, DriverError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, category, image, publication_year, rating, quantity
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, description, category, image, publication_year, rating, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_ref())
        .bind(book.category().as_ref())
        .bind(book.image().as_ref())
        .bind(book.publication_year().as_ref())
        .bind(book.rating().as_ref())
        .bind(book.quantity().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, category = $5, image = $6,
                publication_year = $7, rating = $8, quantity = $9
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_ref())
        .bind(book.category().as_ref())
        .bind(book.image().as_ref())
        .bind(book.publication_year().as_ref())
        .bind(book.rating().as_ref())
        .bind(book.quantity().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> Result<bool, DriverError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // The guard lives in the statement itself so concurrent borrows cannot
    // interleave a read-then-write on quantity.
    async fn adjust_quantity(
        con: &mut PgConnection,
        book_id: &BookId,
        delta: i32,
    ) -> Result<Option<BookQuantity>, DriverError> {
        let row = sqlx::query_as::<_, QuantityRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET quantity = quantity + $2
            WHERE id = $1 AND quantity + $2 >= 0
            RETURNING quantity
            "#,
        )
        .bind(book_id.as_ref())
        .bind(delta)
        .fetch_optional(con)
        .await?;
        if row.is_none() {
            tracing::debug!(book_id = %book_id.as_ref(), delta, "quantity adjust rejected");
        }
        Ok(row.map(|row| BookQuantity::new(row.quantity)))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::QueryDatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookCategory, BookDescription, BookId, BookImage, BookQuantity,
        BookRating, BookTitle, PublicationYear,
    };
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;

    fn book(id: BookId, quantity: i32) -> Book {
        Book::new(
            id,
            BookTitle::new("test".to_string()),
            BookAuthor::new("author".to_string()),
            BookDescription::new("description".to_string()),
            BookCategory::new("category".to_string()),
            BookImage::new("image".to_string()),
            PublicationYear::new(1999),
            BookRating::new(4.5),
            BookQuantity::new(quantity),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = BookId::new(uuid::Uuid::new_v4());

        let book = book(id.clone(), 1);
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2".to_string()));
        PostgresBookRepository.update(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        let deleted = PostgresBookRepository.delete(&mut con, &id).await?;
        assert!(deleted);
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn adjust_quantity_guards_zero() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = BookId::new(uuid::Uuid::new_v4());

        PostgresBookRepository
            .create(&mut con, &book(id.clone(), 1))
            .await?;

        let adjusted = PostgresBookRepository
            .adjust_quantity(&mut con, &id, -1)
            .await?;
        assert_eq!(adjusted, Some(BookQuantity::new(0)));

        let rejected = PostgresBookRepository
            .adjust_quantity(&mut con, &id, -1)
            .await?;
        assert!(rejected.is_none());

        PostgresBookRepository.delete(&mut con, &id).await?;
        Ok(())
    }
}
