use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DependOnDatabaseConnection, QueryDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookDescription, BookId, BookImage, BookQuantity, BookRating,
    BookTitle, PublicationYear,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait GetBookService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<Connection: 'static + Send, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateBookService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let uuid = Uuid::new_v4();
        let book = Book::new(
            BookId::new(uuid),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookDescription::new(dto.description),
            BookCategory::new(dto.category),
            BookImage::new(dto.image),
            PublicationYear::new(dto.publication_year),
            BookRating::new(dto.rating),
            BookQuantity::new(dto.quantity),
        );
        self.book_modifier().create(&mut connection, &book).await?;

        Ok(uuid)
    }
}

impl<Connection: 'static + Send, T> CreateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateBookService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("unknown book id"))?;

        book.substitute(|b| {
            if let Some(title) = dto.title {
                *b.title = BookTitle::new(title);
            }
            if let Some(author) = dto.author {
                *b.author = BookAuthor::new(author);
            }
            if let Some(description) = dto.description {
                *b.description = BookDescription::new(description);
            }
            if let Some(category) = dto.category {
                *b.category = BookCategory::new(category);
            }
            if let Some(image) = dto.image {
                *b.image = BookImage::new(image);
            }
            if let Some(publication_year) = dto.publication_year {
                *b.publication_year = PublicationYear::new(publication_year);
            }
            if let Some(rating) = dto.rating {
                *b.rating = BookRating::new(rating);
            }
            if let Some(quantity) = dto.quantity {
                *b.quantity = BookQuantity::new(quantity);
            }
        });
        self.book_modifier().update(&mut connection, &book).await?;
        Ok(())
    }
}

impl<Connection: 'static + Send, T> UpdateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteBookService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let deleted = self.book_modifier().delete(&mut connection, &id).await?;
        if !deleted {
            return Err(Report::new(KernelError::NotFound).attach_printable("unknown book id"));
        }
        Ok(())
    }
}

impl<Connection: 'static + Send, T> DeleteBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use driver::database::MemoryDatabase;
    use kernel::KernelError;

    use crate::service::{CreateBookService, DeleteBookService, GetBookService, UpdateBookService};
    use crate::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

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

    #[tokio::test]
    async fn create_and_get() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(2)).await?;

        let book = db
            .get_book(GetBookDto { id })
            .await?
            .expect("created book should be found");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.quantity, 2);

        let all = db.get_all_books().await?;
        assert_eq!(all.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_partial_fields() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(2)).await?;

        db.update_book(UpdateBookDto {
            id,
            title: None,
            author: None,
            description: None,
            category: None,
            image: None,
            publication_year: None,
            rating: None,
            quantity: Some(7),
        })
        .await?;

        let book = db.get_book(GetBookDto { id }).await?.expect("book exists");
        assert_eq!(book.quantity, 7);
        assert_eq!(book.title, "Dune");
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_book_is_not_found() {
        let db = MemoryDatabase::new();
        let result = db
            .update_book(UpdateBookDto {
                id: uuid::Uuid::new_v4(),
                title: Some("Nope".to_string()),
                author: None,
                description: None,
                category: None,
                image: None,
                publication_year: None,
                rating: None,
                quantity: None,
            })
            .await;
        let report = result.expect_err("update of unknown id should fail");
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn delete_unknown_book_is_not_found() {
        let db = MemoryDatabase::new();
        let result = db
            .delete_book(DeleteBookDto {
                id: uuid::Uuid::new_v4(),
            })
            .await;
        let report = result.expect_err("delete of unknown id should fail");
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_book() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let id = db.create_book(create_dto(1)).await?;

        db.delete_book(DeleteBookDto { id }).await?;
        assert!(db.get_book(GetBookDto { id }).await?.is_none());
        Ok(())
    }
}
