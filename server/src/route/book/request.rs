use crate::controller::{Intake, TryIntake};
use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author_name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
    publication_year: Option<i32>,
    rating: Option<f64>,
    quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author_name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
    publication_year: Option<i32>,
    rating: Option<f64>,
    quantity: Option<i32>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: Uuid,
}

impl GetBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: Uuid,
}

impl DeleteBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, Report<KernelError>> {
    value.ok_or_else(|| {
        Report::new(KernelError::InvalidInput).attach_printable(format!("{field} is required"))
    })
}

pub struct Transformer;

impl TryIntake<CreateBookRequest> for Transformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        let quantity = require(input.quantity, "quantity")?;
        if quantity < 0 {
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable("quantity must be a non-negative integer"));
        }
        Ok(CreateBookDto {
            title: require(input.title, "title")?,
            author: require(input.author_name, "authorName")?,
            description: require(input.description, "description")?,
            category: require(input.category, "category")?,
            image: require(input.image, "image")?,
            publication_year: require(input.publication_year, "publicationYear")?,
            rating: require(input.rating, "rating")?,
            quantity,
        })
    }
}

impl TryIntake<(Uuid, UpdateBookRequest)> for Transformer {
    type To = UpdateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (Uuid, UpdateBookRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        if matches!(input.quantity, Some(quantity) if quantity < 0) {
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable("quantity must be a non-negative integer"));
        }
        Ok(UpdateBookDto {
            id,
            title: input.title,
            author: input.author_name,
            description: input.description,
            category: input.category,
            image: input.image,
            publication_year: input.publication_year,
            rating: input.rating,
            quantity: input.quantity,
        })
    }
}

impl Intake<GetBookRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}
