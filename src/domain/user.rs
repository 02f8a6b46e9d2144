use crate::domain::{trim_non_empty, Book, Links, Review, Tag};
use crate::raw::RawValue;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::debug;

/// 비밀번호 최소 길이
pub const MIN_PASSWORD_LENGTH: usize = 7;

/// 사용자
///
/// 생성은 실패하지 않는다. 사용자명이나 비밀번호가 유효하지 않으면 해당 필드는 [`None`]으로 저장된다.
/// 비밀번호는 길이만 검증하며 해싱은 이 계층의 책임이 아니다.
///
/// 동등성, 정렬, 해시는 모두 사용자명을 기준으로 한다.
#[derive(Debug)]
pub struct User {
    user_name: Option<String>,
    password: Option<String>,

    read_books: Links<Book>,
    reviews: RefCell<Vec<Rc<Review>>>,
    favourite: Links<Book>,
    tags: Links<Tag>,
}

impl User {

    /// # Example
    /// ```
    /// use book_catalogue::domain::User;
    ///
    /// let user = User::new("  Alice ", "short");
    /// assert_eq!(user.user_name(), Some("alice"));
    /// assert_eq!(user.password(), None);
    /// ```
    pub fn new(user_name: &str, password: &str) -> Self {
        let user_name = trim_non_empty(user_name).map(|name| name.to_lowercase());
        if user_name.is_none() {
            debug!("Empty user name, stored as none");
        }

        let password = if password.chars().count() < MIN_PASSWORD_LENGTH {
            debug!("Password shorter than {} characters, stored as none", MIN_PASSWORD_LENGTH);
            None
        } else {
            Some(password.to_owned())
        };

        Self {
            user_name,
            password,
            read_books: Links::new(),
            reviews: RefCell::new(Vec::new()),
            favourite: Links::new(),
            tags: Links::new(),
        }
    }

    /// 외부 데이터로 사용자를 생성한다. 문자열이 아닌 값은 [`None`]으로 저장된다.
    pub fn from_raw(user_name: &RawValue, password: &RawValue) -> Self {
        Self::new(user_name.as_text().unwrap_or(""), password.as_text().unwrap_or(""))
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn read_books(&self) -> Vec<Rc<Book>> {
        self.read_books.to_vec()
    }

    /// 읽은 도서 목록 전체를 교체한다.
    pub fn set_read_books(&self, books: &[Rc<Book>]) {
        self.read_books.replace(books);
    }

    pub fn read_a_book(&self, book: &Rc<Book>) {
        self.read_books.push(book);
    }

    pub fn reviews(&self) -> Vec<Rc<Review>> {
        self.reviews.borrow().clone()
    }

    pub fn add_review(&self, review: Rc<Review>) {
        self.reviews.borrow_mut().push(review);
    }

    pub fn favourite(&self) -> Vec<Rc<Book>> {
        self.favourite.to_vec()
    }

    /// 즐겨찾기 도서 목록 전체를 교체한다.
    pub fn set_favourite(&self, books: &[Rc<Book>]) {
        self.favourite.replace(books);
    }

    pub fn tags(&self) -> Vec<Rc<Tag>> {
        self.tags.to_vec()
    }

    /// 태그를 추가한다. 같은 이름의 태그가 이미 있으면 추가하지 않는다.
    pub fn add_tag(&self, tag: &Rc<Tag>) {
        self.tags.push_unique(tag);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
    }
}

impl Eq for User {}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.user_name.cmp(&other.user_name)
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_name.hash(state);
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<User {}>", self.user_name.as_deref().unwrap_or("none"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_is_trimmed_and_lowercased() {
        let user = User::new("  Shyamli ", "pw12345");
        assert_eq!(user.user_name(), Some("shyamli"));
        assert_eq!(user.password(), Some("pw12345"));
        assert_eq!(user.to_string(), "<User shyamli>");
    }

    #[test]
    fn invalid_fields_become_none_without_failing() {
        let user = User::new("", "");
        assert_eq!(user.user_name(), None);
        assert_eq!(user.password(), None);

        assert_eq!(User::new("Alice", "short").password(), None);
        assert_eq!(User::new("Alice", "123456").password(), None);
        assert_eq!(User::new("Alice", "1234567").password(), Some("1234567"));
    }

    #[test]
    fn from_raw_treats_non_text_as_none() {
        let user = User::from_raw(&RawValue::from(12), &RawValue::from(12345678));
        assert_eq!(user.user_name(), None);
        assert_eq!(user.password(), None);

        let user = User::from_raw(&RawValue::from("Bob"), &RawValue::from("secret-pw"));
        assert_eq!(user.user_name(), Some("bob"));
        assert_eq!(user.password(), Some("secret-pw"));
    }

    #[test]
    fn equality_uses_user_name() {
        assert_eq!(User::new("Alice", "pass1234"), User::new("alice", "different"));
        assert!(User::new("alice", "pass1234") < User::new("bob", "pass1234"));
    }

    #[test]
    fn hash_uses_user_name() {
        use std::collections::HashSet;
        use std::collections::hash_map::DefaultHasher;

        let hash_of = |user: &User| {
            let mut hasher = DefaultHasher::new();
            user.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash_of(&User::new("Alice", "pass1234")), hash_of(&User::new("alice", "other-pw")));

        let set: HashSet<User> = [User::new("Alice", "pass1234"), User::new(" alice", ""), User::new("bob", "")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn read_books_can_be_appended_or_replaced() {
        let user = User::new("alice", "pass1234");
        let a = Rc::new(Book::new(1, "A").unwrap());
        let b = Rc::new(Book::new(2, "B").unwrap());
        user.read_a_book(&a);
        user.read_a_book(&a);
        assert_eq!(user.read_books().len(), 2);

        user.set_read_books(&[Rc::clone(&b)]);
        assert_eq!(user.read_books(), vec![b]);
    }

    #[test]
    fn favourite_is_replaced_wholesale() {
        let user = User::new("alice", "pass1234");
        let a = Rc::new(Book::new(1, "A").unwrap());
        let b = Rc::new(Book::new(2, "B").unwrap());
        user.set_favourite(&[Rc::clone(&a), Rc::clone(&b)]);
        assert_eq!(user.favourite().len(), 2);
        user.set_favourite(&[]);
        assert!(user.favourite().is_empty());
    }

    #[test]
    fn add_tag_skips_duplicates() {
        let user = User::new("alice", "pass1234");
        let tag = Rc::new(Tag::new("horror"));
        user.add_tag(&tag);
        user.add_tag(&tag);
        let same_name = Rc::new(Tag::new("horror"));
        let comic = Rc::new(Tag::new("comic"));
        user.add_tag(&same_name);
        user.add_tag(&comic);
        assert_eq!(user.tags().len(), 2);
    }

    #[test]
    fn add_review_appends() {
        let user = Rc::new(User::new("alice", "pass1234"));
        let book = Rc::new(Book::new(1, "A").unwrap());
        user.add_review(Rc::new(Review::new(Some(&book), Some("ok"), 3, Some(&user)).unwrap()));
        assert_eq!(user.reviews().len(), 1);
    }
}
