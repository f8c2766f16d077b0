use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId, BookQuantity};
use kernel::KernelError;

use crate::database::memory::MemoryConnection;

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery<MemoryConnection> for MemoryBookRepository {
    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books.read().get(id.as_ref()).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = con.books.read().values().cloned().collect::<Vec<_>>();
        books.sort_by(|a, b| a.title().as_ref().cmp(b.title().as_ref()));
        Ok(books)
    }
}

#[async_trait::async_trait]
impl BookModifier<MemoryConnection> for MemoryBookRepository {
    async fn create(
        &self,
        con: &mut MemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.books
            .write()
            .insert(*book.id().as_ref(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write();
        if let Some(stored) = books.get_mut(book.id().as_ref()) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.books.write().remove(book_id.as_ref()).is_some())
    }

    async fn adjust_quantity(
        &self,
        con: &mut MemoryConnection,
        book_id: &BookId,
        delta: i32,
    ) -> error_stack::Result<Option<BookQuantity>, KernelError> {
        // One write lock covers check and mutation, mirroring the
        // conditional UPDATE of the postgres repository.
        let mut books = con.books.write();
        let Some(book) = books.get_mut(book_id.as_ref()) else {
            return Ok(None);
        };
        let next = *book.quantity().as_ref() + delta;
        if next < 0 {
            return Ok(None);
        }
        book.substitute(|b| *b.quantity = BookQuantity::new(next));
        Ok(Some(BookQuantity::new(next)))
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

    use crate::database::memory::{MemoryBookRepository, MemoryDatabase};

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

    #[tokio::test]
    async fn round_trip() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = BookId::new(uuid::Uuid::new_v4());

        let book = book(id.clone(), 2);
        MemoryBookRepository.create(&mut con, &book).await?;

        let found = MemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2".to_string()));
        MemoryBookRepository.update(&mut con, &book).await?;
        let found = MemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        assert!(MemoryBookRepository.delete(&mut con, &id).await?);
        assert!(!MemoryBookRepository.delete(&mut con, &id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn adjust_quantity_guards_zero() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = BookId::new(uuid::Uuid::new_v4());
        MemoryBookRepository
            .create(&mut con, &book(id.clone(), 1))
            .await?;

        let adjusted = MemoryBookRepository
            .adjust_quantity(&mut con, &id, -1)
            .await?;
        assert_eq!(adjusted, Some(BookQuantity::new(0)));

        let rejected = MemoryBookRepository
            .adjust_quantity(&mut con, &id, -1)
            .await?;
        assert!(rejected.is_none());

        let restored = MemoryBookRepository
            .adjust_quantity(&mut con, &id, 1)
            .await?;
        assert_eq!(restored, Some(BookQuantity::new(1)));
        Ok(())
    }

    #[tokio::test]
    async fn adjust_quantity_unknown_book() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = BookId::new(uuid::Uuid::new_v4());

        let adjusted = MemoryBookRepository
            .adjust_quantity(&mut con, &id, 1)
            .await?;
        assert!(adjusted.is_none());
        Ok(())
    }
}
