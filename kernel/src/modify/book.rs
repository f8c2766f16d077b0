use crate::entity::{Book, BookId, BookQuantity};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier<Connection: 'static + Send>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    /// `false` when no book with the given id exists.
    async fn delete(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Single conditional update guarded by `quantity + delta >= 0`.
    /// Returns the new quantity, or `None` when the guard rejects or the
    /// book is missing. Implementations must not read-then-write.
    async fn adjust_quantity(
        &self,
        con: &mut Connection,
        book_id: &BookId,
        delta: i32,
    ) -> error_stack::Result<Option<BookQuantity>, KernelError>;
}

pub trait DependOnBookModifier<Connection: 'static + Send>: 'static + Sync + Send {
    type BookModifier: BookModifier<Connection>;
    fn book_modifier(&self) -> &Self::BookModifier;
}
