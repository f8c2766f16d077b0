mod author;
mod category;
mod description;
mod id;
mod image;
mod publication_year;
mod quantity;
mod rating;
mod title;

pub use self::{
    author::*, category::*, description::*, id::*, image::*, publication_year::*, quantity::*,
    rating::*, title::*,
};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    description: BookDescription,
    category: BookCategory,
    image: BookImage,
    publication_year: PublicationYear,
    rating: BookRating,
    quantity: BookQuantity,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        description: BookDescription,
        category: BookCategory,
        image: BookImage,
        publication_year: PublicationYear,
        rating: BookRating,
        quantity: BookQuantity,
    ) -> Self {
        Self {
            id,
            title,
            author,
            description,
            category,
            image,
            publication_year,
            rating,
            quantity,
        }
    }
}
