use crate::controller::Intake;
use application::transfer::{BorrowBookDto, GetLoansDto, ReturnBookDto};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    user_name: Option<String>,
    user_email: Option<String>,
    return_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    email: Option<String>,
}

#[derive(Debug)]
pub struct GetLoansRequest {
    book_id: Uuid,
}

impl GetLoansRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

pub struct Transformer;

impl Intake<(Uuid, BorrowRequest)> for Transformer {
    type To = BorrowBookDto;
    fn emit(&self, (book_id, input): (Uuid, BorrowRequest)) -> Self::To {
        // Missing fields surface as empty strings; the lending service owns
        // presence validation.
        BorrowBookDto {
            book_id,
            borrower_name: input.user_name.unwrap_or_default(),
            borrower_email: input.user_email.unwrap_or_default(),
            due_date: input.return_date.unwrap_or_default(),
        }
    }
}

impl Intake<(Uuid, ReturnRequest)> for Transformer {
    type To = ReturnBookDto;
    fn emit(&self, (book_id, input): (Uuid, ReturnRequest)) -> Self::To {
        ReturnBookDto {
            book_id,
            borrower_email: input.email.unwrap_or_default(),
        }
    }
}

impl Intake<GetLoansRequest> for Transformer {
    type To = GetLoansDto;
    fn emit(&self, input: GetLoansRequest) -> Self::To {
        GetLoansDto {
            book_id: input.book_id,
        }
    }
}
