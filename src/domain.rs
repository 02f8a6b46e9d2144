//! 도서 카탈로그 도메인 모델
//!
//! 모든 엔티티는 `Rc<엔티티>`로 공유되며 변경 가능한 상태는 내부의 `RefCell`/`Cell`에 보관한다.
//! 엔티티 사이의 연결(도서 ⇄ 사용자, 도서 ⇄ 태그 등)은 [`Links`]를 통해 소유권 없이(`Weak`) 유지되므로
//! 서로를 참조하는 엔티티가 순환 참조를 만들지 않는다.
//! 엔티티의 수명은 엔티티를 생성한 쪽(예: [`crate::catalog::Catalog`])이 관리한다.
//!
//! 리뷰([`Review`])만은 예외로 리뷰가 연결된 도서와 사용자가 `Rc`로 소유한다.

mod author;
mod book;
mod publisher;
mod review;
mod tag;
mod user;

pub use author::Author;
pub use book::Book;
pub use publisher::{Publisher, UNKNOWN_PUBLISHER};
pub use review::{Review, MAX_RATING, MIN_RATING, MISSING_REVIEW_TEXT};
pub use tag::Tag;
pub use user::{User, MIN_PASSWORD_LENGTH};

use crate::raw::RawValue;
use crate::ModelError;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Formatter;
use std::rc::{Rc, Weak};

/// 문자열 공통 검증 규칙: 앞뒤 공백을 제거하고, 비어 있으면 [`None`]
///
/// 검증 실패 시 어떻게 처리할지(실패, 센티넬 대체)는 호출하는 쪽이 결정한다.
///
/// # Example
/// ```
/// use book_catalogue::domain::trim_non_empty;
///
/// assert_eq!(trim_non_empty("  Dune  "), Some(String::from("Dune")));
/// assert_eq!(trim_non_empty("   "), None);
/// ```
pub fn trim_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// 음수가 아닌 식별자를 검증한다.
pub(crate) fn non_negative_id(value: i64, name: &str) -> Result<u64, ModelError> {
    u64::try_from(value)
        .map_err(|_| ModelError::InvalidArgument(format!("{} must be a non-negative integer: {}", name, value)))
}

/// 외부 데이터의 식별자를 검증한다. 정수가 아니거나 음수이면 실패한다.
pub(crate) fn raw_id(value: &RawValue, name: &str) -> Result<u64, ModelError> {
    match (value.as_uint(), value.as_int()) {
        (Some(id), _) => Ok(id),
        (None, Some(id)) => non_negative_id(id, name),
        (None, None) => Err(ModelError::InvalidArgument(format!("{} must be an integer: {}", name, value))),
    }
}

/// 소유권 없이 다른 엔티티들을 삽입 순서대로 가리키는 목록
///
/// 조회 시에는 아직 살아 있는 엔티티만 반환한다.
/// 목록은 엔티티를 소유하지 않으므로 추가한 엔티티의 `Rc`는 호출하는 쪽이 보관해야 하며,
/// 마지막 `Rc`가 해제된 엔티티는 목록에서 사라진다.
pub struct Links<T> {
    items: RefCell<Vec<Weak<T>>>,
}

impl<T> Links<T> {
    pub fn new() -> Self {
        Self { items: RefCell::new(Vec::new()) }
    }

    /// 중복 여부와 관계없이 뒤에 추가한다.
    pub fn push(&self, item: &Rc<T>) {
        self.items.borrow_mut().push(Rc::downgrade(item));
    }

    /// 목록 전체를 교체한다.
    pub fn replace(&self, items: &[Rc<T>]) {
        *self.items.borrow_mut() = items.iter().map(Rc::downgrade).collect();
    }

    pub fn to_vec(&self) -> Vec<Rc<T>> {
        self.items.borrow().iter().filter_map(Weak::upgrade).collect()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: PartialEq> Links<T> {

    pub fn contains(&self, item: &T) -> bool {
        self.items.borrow().iter()
            .filter_map(Weak::upgrade)
            .any(|linked| *linked == *item)
    }

    /// 같은 엔티티가 없을 때만 추가하고 추가 여부를 반환한다.
    pub fn push_unique(&self, item: &Rc<T>) -> bool {
        if self.contains(item) {
            return false;
        }
        self.push(item);
        true
    }

    /// 처음으로 일치하는 엔티티 하나를 제거하고 제거 여부를 반환한다.
    pub fn remove(&self, item: &T) -> bool {
        let mut items = self.items.borrow_mut();
        let position = items.iter()
            .position(|w| w.upgrade().is_some_and(|linked| *linked == *item));
        match position {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Links({})", self.len())
    }
}

/// 리뷰를 생성하고 리뷰를 작성한 사용자와 리뷰 대상 도서 양쪽에 연결한다.
///
/// 리뷰가 양쪽에 일관되게 연결되는 것이 보장되는 유일한 경로로, 별도로 생성한 리뷰는
/// 호출하는 쪽에서 직접 [`User::add_review`]와 [`Book::add_review`]를 호출해야 한다.
///
/// # Errors
/// - 평점이 1 ~ 5 범위를 벗어나면 [`ModelError::InvalidArgument`]
///
/// # Example
/// ```
/// use std::rc::Rc;
/// use book_catalogue::domain::{make_review, Book, User};
///
/// let user = Rc::new(User::new("Alice", "pass1234"));
/// let book = Rc::new(Book::new(1, "Dune").unwrap());
///
/// let review = make_review("  Great read  ", &user, &book, 5).unwrap();
/// assert_eq!(review.review_text(), "Great read");
/// assert!(Rc::ptr_eq(&user.reviews()[0], &review));
/// assert!(Rc::ptr_eq(&book.reviews()[0], &review));
/// ```
pub fn make_review(review_text: &str, user: &Rc<User>, book: &Rc<Book>, rating: i64) -> Result<Rc<Review>, ModelError> {
    let review = Rc::new(Review::new(Some(book), Some(review_text), rating, Some(user))?);
    user.add_review(Rc::clone(&review));
    book.add_review(Rc::clone(&review));

    Ok(review)
}
