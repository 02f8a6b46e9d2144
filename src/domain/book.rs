use crate::domain::{non_negative_id, raw_id, trim_non_empty, Author, Links, Publisher, Review, Tag, User};
use crate::raw::RawValue;
use crate::ModelError;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use tracing::debug;

/// 도서
///
/// 출판사, 저자, 태그, 리뷰, 읽은/즐겨찾기 사용자 목록을 모으는 중심 엔티티.
/// 동등성, 정렬, 해시는 모두 `book_id`를 기준으로 한다.
///
/// 필드마다 검증 실패 시 정책이 다르다.
/// - `title`, `release_year`: 실패([`ModelError::InvalidArgument`])
/// - `num_pages`: 잘못된 값은 무시하고 이전 값을 유지
/// - `publisher`: 없음으로 초기화
#[derive(Debug)]
pub struct Book {
    book_id: u64,
    title: RefCell<String>,
    description: RefCell<Option<String>>,
    publisher: RefCell<Option<Weak<Publisher>>>,
    authors: Links<Author>,

    release_year: Cell<Option<u64>>,
    ebook: Cell<Option<bool>>,
    num_pages: Cell<Option<u64>>,

    reviews: RefCell<Vec<Rc<Review>>>,
    tags: Links<Tag>,
    image_url: RefCell<String>,

    read_list_user: Links<User>,
    favourite_list_user: Links<User>,
}

impl Book {

    /// # Errors
    /// - `book_id`가 음수인 경우
    /// - `title`이 공백을 제거하면 빈 문자열인 경우
    pub fn new(book_id: i64, title: &str) -> Result<Self, ModelError> {
        Self::with_id(non_negative_id(book_id, "book id")?, title)
    }

    fn with_id(book_id: u64, title: &str) -> Result<Self, ModelError> {
        let title = validate_title(title)?;

        Ok(Self {
            book_id,
            title: RefCell::new(title),
            description: RefCell::new(None),
            publisher: RefCell::new(None),
            authors: Links::new(),
            release_year: Cell::new(None),
            ebook: Cell::new(None),
            num_pages: Cell::new(None),
            reviews: RefCell::new(Vec::new()),
            tags: Links::new(),
            image_url: RefCell::new(String::new()),
            read_list_user: Links::new(),
            favourite_list_user: Links::new(),
        })
    }

    /// 외부 데이터(객체)로 도서를 생성한다.
    ///
    /// `id`, `title`은 필수로 타입이 맞지 않으면 실패한다. 선택 속성은 각 setter의 정책을 따른다.
    /// - `release_year`: 정수가 아니면 실패
    /// - `ebook`, `num_pages`, `description`, `image_url`: 타입이 맞지 않으면 무시
    ///
    /// 출판사, 저자, 태그 등 다른 엔티티와의 연결은 설정하지 않는다.
    ///
    /// # Example
    /// ```
    /// use book_catalogue::raw::RawValue;
    /// use book_catalogue::domain::Book;
    ///
    /// let raw = RawValue::from(serde_json::json!({
    ///     "id": 1, "title": "Dune", "num_pages": "many", "ebook": true
    /// }));
    /// let book = Book::from_raw(&raw).unwrap();
    /// assert_eq!(book.title(), "Dune");
    /// assert_eq!(book.num_pages(), None);
    /// assert_eq!(book.ebook(), Some(true));
    /// ```
    pub fn from_raw(raw: &RawValue) -> Result<Self, ModelError> {
        let book_id = raw_id(raw.field("id"), "book id")?;
        let title = raw.field("title");
        let title = title.as_text()
            .ok_or_else(|| ModelError::InvalidArgument(format!("book title must be a text: {}", title)))?;

        let book = Self::with_id(book_id, title)?;

        if let Some(description) = raw.get("description").and_then(RawValue::as_text) {
            book.set_description(description);
        }
        if let Some(release_year) = raw.get("release_year").filter(|v| !v.is_null()) {
            let year = release_year.as_int()
                .ok_or_else(|| ModelError::InvalidArgument(format!("release year must be an integer: {}", release_year)))?;
            book.set_release_year(year)?;
        }
        match raw.get("ebook").map(RawValue::as_bool) {
            Some(Some(ebook)) => book.set_ebook(ebook),
            Some(None) => debug!("Ignore non boolean ebook flag of book {}", book.book_id),
            None => {}
        }
        match raw.get("num_pages").map(RawValue::as_int) {
            Some(Some(pages)) => book.set_num_pages(pages),
            Some(None) => debug!("Ignore non integer page count of book {}", book.book_id),
            None => {}
        }
        if let Some(image_url) = raw.get("image_url").and_then(RawValue::as_text) {
            book.set_image_url(image_url);
        }

        Ok(book)
    }

    pub fn book_id(&self) -> u64 {
        self.book_id
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn set_title(&self, title: &str) -> Result<(), ModelError> {
        *self.title.borrow_mut() = validate_title(title)?;
        Ok(())
    }

    pub fn description(&self) -> Option<String> {
        self.description.borrow().clone()
    }

    pub fn set_description(&self, description: &str) {
        *self.description.borrow_mut() = Some(description.trim().to_owned());
    }

    pub fn publisher(&self) -> Option<Rc<Publisher>> {
        self.publisher.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// 출판사를 설정한다. [`None`]을 전달하면 출판사가 없는 상태로 초기화 된다.
    pub fn set_publisher(&self, publisher: Option<&Rc<Publisher>>) {
        *self.publisher.borrow_mut() = publisher.map(Rc::downgrade);
    }

    pub fn authors(&self) -> Vec<Rc<Author>> {
        self.authors.to_vec()
    }

    /// 저자를 추가하고 추가 여부를 반환한다. 이미 추가된 저자라면 아무것도 하지 않는다.
    pub fn add_author(&self, author: &Rc<Author>) -> bool {
        self.authors.push_unique(author)
    }

    /// 저자를 제거한다. 추가되지 않은 저자라면 아무것도 하지 않는다.
    pub fn remove_author(&self, author: &Author) {
        self.authors.remove(author);
    }

    pub fn release_year(&self) -> Option<u64> {
        self.release_year.get()
    }

    /// # Errors
    /// - `release_year`가 음수인 경우, 이전 값은 유지된다.
    pub fn set_release_year(&self, release_year: i64) -> Result<(), ModelError> {
        let year = u64::try_from(release_year)
            .map_err(|_| ModelError::InvalidArgument(format!("release year must be a non-negative integer: {}", release_year)))?;
        self.release_year.set(Some(year));
        Ok(())
    }

    pub fn ebook(&self) -> Option<bool> {
        self.ebook.get()
    }

    pub fn set_ebook(&self, ebook: bool) {
        self.ebook.set(Some(ebook));
    }

    pub fn num_pages(&self) -> Option<u64> {
        self.num_pages.get()
    }

    /// 페이지 수를 설정한다. 음수는 오류 없이 무시하고 이전 값을 유지한다.
    pub fn set_num_pages(&self, num_pages: i64) {
        match u64::try_from(num_pages) {
            Ok(pages) => self.num_pages.set(Some(pages)),
            Err(_) => debug!("Ignore negative page count {} of book {}", num_pages, self.book_id),
        }
    }

    pub fn image_url(&self) -> String {
        self.image_url.borrow().clone()
    }

    pub fn set_image_url(&self, url: &str) {
        *self.image_url.borrow_mut() = url.to_owned();
    }

    pub fn reviews(&self) -> Vec<Rc<Review>> {
        self.reviews.borrow().clone()
    }

    pub fn number_of_reviews(&self) -> usize {
        self.reviews.borrow().len()
    }

    /// 리뷰를 추가한다. 사용자 쪽 연결은 하지 않으므로 [`crate::domain::make_review`] 사용을 권장한다.
    pub fn add_review(&self, review: Rc<Review>) {
        self.reviews.borrow_mut().push(review);
    }

    pub fn tags(&self) -> Vec<Rc<Tag>> {
        self.tags.to_vec()
    }

    pub fn number_of_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn add_tag(&self, tag: &Rc<Tag>) {
        self.tags.push(tag);
    }

    pub fn is_tagged_by(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// 태그명들을 추가된 순서대로 `", "`로 이어 붙인다.
    pub fn tag_string(&self) -> String {
        self.tags.to_vec()
            .iter()
            .map(|tag| tag.tag_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn read_list_user(&self) -> Vec<Rc<User>> {
        self.read_list_user.to_vec()
    }

    pub fn add_read_list_user(&self, user: &Rc<User>) {
        self.read_list_user.push(user);
    }

    pub fn favourite_list_user(&self) -> Vec<Rc<User>> {
        self.favourite_list_user.to_vec()
    }

    pub fn add_favourite_list_user(&self, user: &Rc<User>) {
        self.favourite_list_user.push(user);
    }
}

fn validate_title(title: &str) -> Result<String, ModelError> {
    trim_non_empty(title)
        .ok_or_else(|| ModelError::InvalidArgument("book title must not be empty".to_owned()))
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.book_id == other.book_id
    }
}

impl Eq for Book {}

impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Book {
    fn cmp(&self, other: &Self) -> Ordering {
        self.book_id.cmp(&other.book_id)
    }
}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.book_id.hash(state);
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<Book {}, book id = {}>", self.title.borrow(), self.book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(book: &Book) -> u64 {
        let mut hasher = DefaultHasher::new();
        book.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn construction_validates_identity() {
        let book = Book::new(84765876, "  Harry Potter ").unwrap();
        assert_eq!(book.book_id(), 84765876);
        assert_eq!(book.title(), "Harry Potter");
        assert_eq!(book.to_string(), "<Book Harry Potter, book id = 84765876>");

        assert!(matches!(Book::new(-1, "Title"), Err(ModelError::InvalidArgument(_))));
        assert!(matches!(Book::new(1, " "), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn same_id_means_same_book() {
        let a = Book::new(1, "First title").unwrap();
        let b = Book::new(1, "Second title").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(a < Book::new(2, "First title").unwrap());
    }

    #[test]
    fn set_title_fails_on_empty() {
        let book = Book::new(1, "Title").unwrap();
        assert!(book.set_title("").is_err());
        assert_eq!(book.title(), "Title");
    }

    #[test]
    fn release_year_fails_but_num_pages_ignores_invalid_values() {
        let book = Book::new(1, "Title").unwrap();
        book.set_release_year(2008).unwrap();
        assert!(matches!(book.set_release_year(-1), Err(ModelError::InvalidArgument(_))));
        assert_eq!(book.release_year(), Some(2008));

        book.set_num_pages(150);
        book.set_num_pages(-3);
        assert_eq!(book.num_pages(), Some(150));

        assert_eq!(book.ebook(), None);
        book.set_ebook(true);
        assert_eq!(book.ebook(), Some(true));
    }

    #[test]
    fn from_raw_applies_field_policies() {
        let bad_id = RawValue::from(serde_json::json!({"id": "1", "title": "Dune"}));
        assert!(Book::from_raw(&bad_id).is_err());

        let bad_year = RawValue::from(serde_json::json!({"id": 1, "title": "Dune", "release_year": "1965"}));
        assert!(matches!(Book::from_raw(&bad_year), Err(ModelError::InvalidArgument(_))));

        let raw = RawValue::from(serde_json::json!({
            "id": 1, "title": "Dune", "release_year": 1965, "ebook": "yes",
            "num_pages": -1, "description": "  Spice  ", "image_url": "http://img"
        }));
        let book = Book::from_raw(&raw).unwrap();
        assert_eq!(book.release_year(), Some(1965));
        assert_eq!(book.ebook(), None);
        assert_eq!(book.num_pages(), None);
        assert_eq!(book.description().as_deref(), Some("Spice"));
        assert_eq!(book.image_url(), "http://img");
    }

    #[test]
    fn publisher_can_be_reset() {
        let book = Book::new(1, "Title").unwrap();
        let publisher = Rc::new(Publisher::new("Avatar"));
        book.set_publisher(Some(&publisher));
        assert_eq!(book.publisher().map(|p| p.name()).as_deref(), Some("Avatar"));

        book.set_publisher(None);
        assert!(book.publisher().is_none());
    }

    #[test]
    fn add_and_remove_author_are_idempotent() {
        let book = Book::new(1, "Title").unwrap();
        let a = Rc::new(Author::new(1, "A").unwrap());
        let b = Rc::new(Author::new(2, "B").unwrap());

        assert!(book.add_author(&a));
        assert!(!book.add_author(&a));
        assert!(book.add_author(&b));
        assert_eq!(book.authors().len(), 2);

        book.remove_author(&a);
        book.remove_author(&a);
        book.remove_author(&Author::new(3, "C").unwrap());
        let ids: Vec<u64> = book.authors().iter().map(|a| a.unique_id()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn from_raw_accepts_ids_beyond_signed_range() {
        let raw = RawValue::from(serde_json::json!({"id": u64::MAX, "title": "Crossed"}));
        assert_eq!(Book::from_raw(&raw).unwrap().book_id(), u64::MAX);

        let raw = RawValue::from(serde_json::json!({"id": -1, "title": "Crossed"}));
        assert!(matches!(Book::from_raw(&raw), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn tag_string_joins_in_insertion_order() {
        let book = Book::new(1, "Title").unwrap();
        assert!(!book.is_tagged());
        assert_eq!(book.tag_string(), "");

        let horror = Rc::new(Tag::new("horror"));
        let comic = Rc::new(Tag::new("comic"));
        book.add_tag(&horror);
        book.add_tag(&comic);

        assert_eq!(book.tag_string(), "horror, comic");
        assert_eq!(book.number_of_tags(), 2);
        assert!(book.is_tagged_by(&Tag::new("comic")));
        assert!(!book.is_tagged_by(&Tag::new("drama")));
    }

    #[test]
    fn add_review_appends_without_user_link() {
        let book = Rc::new(Book::new(1, "Title").unwrap());
        let review = Rc::new(Review::new(Some(&book), Some("Nice"), 4, None).unwrap());
        book.add_review(Rc::clone(&review));
        book.add_review(review);
        assert_eq!(book.number_of_reviews(), 2);
    }

    #[test]
    fn user_lists_append() {
        let book = Book::new(1, "Title").unwrap();
        let user = Rc::new(User::new("alice", "pass1234"));
        book.add_read_list_user(&user);
        book.add_favourite_list_user(&user);
        book.add_favourite_list_user(&user);

        assert_eq!(book.read_list_user().len(), 1);
        assert_eq!(book.favourite_list_user().len(), 2);
    }
}
