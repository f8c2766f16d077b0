use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub publication_year: i32,
    pub rating: f64,
    pub quantity: i32,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            description,
            category,
            image,
            publication_year,
            rating,
            quantity,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: description.into(),
            category: category.into(),
            image: image.into(),
            publication_year: publication_year.into(),
            rating: rating.into(),
            quantity: quantity.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub publication_year: i32,
    pub rating: f64,
    pub quantity: i32,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub publication_year: Option<i32>,
    pub rating: Option<f64>,
    pub quantity: Option<i32>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
