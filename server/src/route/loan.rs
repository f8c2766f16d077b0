mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::loan::request::{BorrowRequest, GetLoansRequest, ReturnRequest, Transformer};
use crate::route::loan::response::Presenter;
use application::service::{BorrowBookService, GetLoanService, ReturnBookService};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/borrow/:id",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<BorrowRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().borrow_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/return-book/:id",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ReturnRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().return_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/loans",
            get(|State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                Controller::new(Transformer, Presenter)
                    .intake(GetLoansRequest::new(id))
                    .handle(|dto| async move { module.pgpool().get_loans_for_book(dto).await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
