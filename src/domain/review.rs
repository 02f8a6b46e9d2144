use crate::domain::{Book, User};
use crate::ModelError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};
use tracing::debug;

/// 리뷰 내용이 없을 때 대신 사용하는 값
pub const MISSING_REVIEW_TEXT: &str = "N/A";

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// 리뷰
///
/// 생성 이후 변경되지 않는다. 생성 시각이 동등성에 포함되므로 같은 내용으로 작성된 리뷰라도
/// 작성 시각이 다르면 서로 다른 리뷰로 취급한다.
#[derive(Debug)]
pub struct Review {
    book: Option<Weak<Book>>,
    review_text: String,
    rating: u8,
    user: Option<Weak<User>>,
    timestamp: chrono::NaiveDateTime,
}

impl Review {

    /// 리뷰를 생성한다. 도서나 사용자, 리뷰 내용이 없어도 실패하지 않으며 리뷰 내용은 [`MISSING_REVIEW_TEXT`]로 대체된다.
    ///
    /// # Errors
    /// - `rating`이 [`MIN_RATING`] ~ [`MAX_RATING`] 범위를 벗어난 경우
    pub fn new(book: Option<&Rc<Book>>, review_text: Option<&str>, rating: i64, user: Option<&Rc<User>>) -> Result<Self, ModelError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ModelError::InvalidArgument(format!("rating must be between {} and {}: {}", MIN_RATING, MAX_RATING, rating)));
        }

        let review_text = match review_text {
            Some(text) => text.trim().to_owned(),
            None => {
                debug!("Review without text, fallback to {}", MISSING_REVIEW_TEXT);
                MISSING_REVIEW_TEXT.to_owned()
            }
        };

        Ok(Self {
            book: book.map(Rc::downgrade),
            review_text,
            rating: rating as u8,
            user: user.map(Rc::downgrade),
            timestamp: chrono::Local::now().naive_local(),
        })
    }

    pub fn book(&self) -> Option<Rc<Book>> {
        self.book.as_ref().and_then(Weak::upgrade)
    }

    pub fn user(&self) -> Option<Rc<User>> {
        self.user.as_ref().and_then(Weak::upgrade)
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn timestamp(&self) -> chrono::NaiveDateTime {
        self.timestamp
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.book() == other.book()
            && self.review_text == other.review_text
            && self.rating == other.rating
            && self.timestamp == other.timestamp
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.book() {
            Some(book) => write!(f, "<Review of book {}, rating = {}, timestamp = {}>", book, self.rating, self.timestamp),
            None => write!(f, "<Review of book none, rating = {}, timestamp = {}>", self.rating, self.timestamp),
        }
    }
}
