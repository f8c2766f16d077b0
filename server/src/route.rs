mod book;
mod loan;

pub use self::{book::BookRouter, loan::LoanRouter};
