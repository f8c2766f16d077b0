use crate::controller::Exhaust;
use application::transfer::LoanDto;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedResponse {
    loan_id: Uuid,
}

impl IntoResponse for BorrowedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    id: Uuid,
    book_id: Uuid,
    borrower_name: String,
    borrower_email: String,
    due_date: String,
    created_at: OffsetDateTime,
}

impl From<LoanDto> for LoanResponse {
    fn from(value: LoanDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_id,
            borrower_name: value.borrower_name,
            borrower_email: value.borrower_email,
            due_date: value.due_date,
            created_at: value.created_at,
        }
    }
}

pub struct Presenter;

impl Exhaust<Uuid> for Presenter {
    type To = BorrowedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        BorrowedResponse { loan_id: input }
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _input: ()) -> Self::To {
        StatusCode::OK
    }
}

impl Exhaust<Vec<LoanDto>> for Presenter {
    type To = Json<Vec<LoanResponse>>;
    fn emit(&self, input: Vec<LoanDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(LoanResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}
