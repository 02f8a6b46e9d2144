use crate::domain::{make_review, Author, Book, Publisher, Tag, User, MISSING_REVIEW_TEXT};
use crate::inventory::BooksInventory;
use crate::raw::RawValue;
use crate::ModelError;
use std::collections::HashMap;
use std::io::Read;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// 카탈로그
///
/// 모든 엔티티의 소유자로, 엔티티 사이의 연결은 각 엔티티의 추가/연결 연산을 통해서만 만든다.
#[derive(Debug, Default)]
pub struct Catalog {
    publishers: Vec<Rc<Publisher>>,
    authors: HashMap<u64, Rc<Author>>,
    books: HashMap<u64, Rc<Book>>,
    users: Vec<Rc<User>>,
    tags: Vec<Rc<Tag>>,
    inventory: BooksInventory,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 시드 문서를 읽어 카탈로그를 만든다.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let value: serde_json::Value = serde_json::from_reader(reader)
            .map_err(|e| ModelError::MalformedSeed(e.to_string()))?;
        Self::from_json(&value)
    }

    /// JSON 시드 문서로 카탈로그를 만든다.
    ///
    /// 문서는 `publishers`, `authors`, `books`, `users`, `reviews` 배열로 구성되며 모두 생략할 수 있다.
    /// 도서와 사용자, 리뷰는 앞서 정의된 엔티티를 아이디(저자, 도서) 혹은 이름(출판사, 사용자, 태그)으로 참조한다.
    ///
    /// # Errors
    /// - 문서의 구조가 올바르지 않으면 [`ModelError::MalformedSeed`]
    /// - 정의되지 않은 저자, 도서, 사용자를 참조하면 [`ModelError::NotFound`]
    /// - 엔티티 생성 규칙을 위반하면 [`ModelError::InvalidArgument`]
    ///
    /// # Example
    /// ```
    /// use book_catalogue::catalog::Catalog;
    ///
    /// let seed = serde_json::json!({
    ///     "authors": [{"id": 1, "name": "Frank Herbert"}],
    ///     "books": [{"id": 10, "title": "Dune", "authors": [1], "price": 10, "stock": 3}],
    ///     "users": [{"user_name": "Alice", "password": "pass1234"}],
    ///     "reviews": [{"book": 10, "user": "alice", "text": "Great", "rating": 5}]
    /// });
    /// let catalog = Catalog::from_json(&seed).unwrap();
    ///
    /// assert_eq!(catalog.book(10).unwrap().reviews().len(), 1);
    /// assert_eq!(catalog.inventory().find_price(10), Some(10));
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ModelError> {
        let seed = RawValue::from(value.clone());
        if seed.as_object().is_none() {
            return Err(ModelError::MalformedSeed("seed document must be an object".to_owned()));
        }

        let mut catalog = Self::new();
        for raw in array(&seed, "publishers")? {
            catalog.load_publisher(raw);
        }
        for raw in array(&seed, "authors")? {
            catalog.load_author(raw)?;
        }
        for raw in array(&seed, "books")? {
            catalog.load_book(raw)?;
        }
        for raw in array(&seed, "users")? {
            catalog.load_user(raw)?;
        }
        for raw in array(&seed, "reviews")? {
            catalog.load_review(raw)?;
        }

        info!(
            publishers = catalog.publishers.len(),
            authors = catalog.authors.len(),
            books = catalog.books.len(),
            users = catalog.users.len(),
            tags = catalog.tags.len(),
            "catalogue loaded"
        );
        Ok(catalog)
    }

    fn load_publisher(&mut self, raw: &RawValue) -> Rc<Publisher> {
        let candidate = Publisher::from_raw(raw);
        if let Some(found) = self.publishers.iter().find(|p| ***p == candidate) {
            return Rc::clone(found);
        }

        let publisher = Rc::new(candidate);
        self.publishers.push(Rc::clone(&publisher));
        publisher
    }

    fn load_author(&mut self, raw: &RawValue) -> Result<(), ModelError> {
        let author = Author::from_raw(raw.field("id"), raw.field("name"))?;
        if self.authors.contains_key(&author.unique_id()) {
            warn!("Duplicated author id {}, keep the first one", author.unique_id());
            return Ok(());
        }

        debug!("Author loaded: {}", author);
        self.authors.insert(author.unique_id(), Rc::new(author));
        Ok(())
    }

    fn load_book(&mut self, raw: &RawValue) -> Result<(), ModelError> {
        let book = Rc::new(Book::from_raw(raw)?);
        if self.books.contains_key(&book.book_id()) {
            warn!("Duplicated book id {}, keep the first one", book.book_id());
            return Ok(());
        }

        if let Some(name) = raw.get("publisher").filter(|v| !v.is_null()) {
            let publisher = self.load_publisher(name);
            publisher.add_book(&book);
            book.set_publisher(Some(&publisher));
        }

        let mut authors = Vec::new();
        for id in array(raw, "authors")? {
            let author = self.find_author(id)?;
            if book.add_author(&author) {
                author.add_book(&book);
                authors.push(author);
            }
        }
        for author in &authors {
            for coauthor in &authors {
                author.add_coauthor(coauthor);
            }
        }

        for name in array(raw, "tags")? {
            let tag = self.tag_or_create(name)?;
            book.add_tag(&tag);
            tag.add_book(&book);
            tag.update_size();
        }

        match (integer(raw, "price")?, integer(raw, "stock")?) {
            (Some(price), Some(stock)) => self.inventory.add_book(&book, price, stock),
            (None, None) => {}
            _ => warn!("Book {} needs both price and stock to be stocked", book.book_id()),
        }

        debug!("Book loaded: {}", book);
        self.books.insert(book.book_id(), book);
        Ok(())
    }

    fn load_user(&mut self, raw: &RawValue) -> Result<(), ModelError> {
        let user = Rc::new(User::from_raw(raw.field("user_name"), raw.field("password")));
        if user.user_name().is_none() {
            warn!("User without a valid name cannot be referenced by reviews");
        } else if self.users.iter().any(|u| **u == *user) {
            warn!("Duplicated user {}, keep the first one", user);
            return Ok(());
        }

        for id in array(raw, "read")? {
            let book = self.find_book(id)?;
            user.read_a_book(&book);
            book.add_read_list_user(&user);
        }

        let mut favourite = Vec::new();
        for id in array(raw, "favourite")? {
            let book = self.find_book(id)?;
            book.add_favourite_list_user(&user);
            favourite.push(book);
        }
        user.set_favourite(&favourite);

        for name in array(raw, "tags")? {
            let tag = self.tag_or_create(name)?;
            user.add_tag(&tag);
            tag.add_user(&user);
        }

        debug!("User loaded: {}", user);
        self.users.push(user);
        Ok(())
    }

    fn load_review(&mut self, raw: &RawValue) -> Result<(), ModelError> {
        let book = self.find_book(raw.field("book"))?;
        let user_name = raw.field("user");
        let user = user_name.as_text()
            .and_then(|name| self.user(name))
            .ok_or_else(|| ModelError::NotFound(format!("user {}", user_name)))?;
        let rating = raw.field("rating");
        let rating = rating.as_int()
            .ok_or_else(|| ModelError::InvalidArgument(format!("rating must be an integer: {}", rating)))?;

        let text = raw.field("text").as_text().unwrap_or(MISSING_REVIEW_TEXT);
        let review = make_review(text, &user, &book, rating)?;
        debug!("Review loaded: {}", review);
        Ok(())
    }

    fn find_author(&self, id: &RawValue) -> Result<Rc<Author>, ModelError> {
        id.as_uint()
            .and_then(|id| self.author(id))
            .ok_or_else(|| ModelError::NotFound(format!("author {}", id)))
    }

    fn find_book(&self, id: &RawValue) -> Result<Rc<Book>, ModelError> {
        id.as_uint()
            .and_then(|id| self.book(id))
            .ok_or_else(|| ModelError::NotFound(format!("book {}", id)))
    }

    fn tag_or_create(&mut self, name: &RawValue) -> Result<Rc<Tag>, ModelError> {
        let name = name.as_text()
            .ok_or_else(|| ModelError::MalformedSeed(format!("tag name must be a text: {}", name)))?;
        if let Some(tag) = self.tag(name) {
            return Ok(tag);
        }

        let tag = Rc::new(Tag::new(name));
        self.tags.push(Rc::clone(&tag));
        Ok(tag)
    }
}

impl Catalog {

    pub fn publisher(&self, name: &str) -> Option<Rc<Publisher>> {
        self.publishers.iter().find(|p| p.name() == name).cloned()
    }

    pub fn author(&self, unique_id: u64) -> Option<Rc<Author>> {
        self.authors.get(&unique_id).cloned()
    }

    pub fn book(&self, book_id: u64) -> Option<Rc<Book>> {
        self.books.get(&book_id).cloned()
    }

    /// 사용자명으로 사용자를 찾는다. 사용자명은 저장 규칙과 같이 공백 제거, 소문자로 비교한다.
    pub fn user(&self, user_name: &str) -> Option<Rc<User>> {
        let user_name = user_name.trim().to_lowercase();
        self.users.iter()
            .find(|u| u.user_name() == Some(user_name.as_str()))
            .cloned()
    }

    pub fn tag(&self, tag_name: &str) -> Option<Rc<Tag>> {
        self.tags.iter().find(|t| t.tag_name() == tag_name).cloned()
    }

    pub fn publishers(&self) -> &[Rc<Publisher>] {
        &self.publishers
    }

    /// 저자 목록을 `unique_id` 순으로 반환한다.
    pub fn authors(&self) -> Vec<Rc<Author>> {
        let mut authors: Vec<Rc<Author>> = self.authors.values().cloned().collect();
        authors.sort();
        authors
    }

    /// 도서 목록을 `book_id` 순으로 반환한다.
    pub fn books(&self) -> Vec<Rc<Book>> {
        let mut books: Vec<Rc<Book>> = self.books.values().cloned().collect();
        books.sort();
        books
    }

    pub fn users(&self) -> &[Rc<User>] {
        &self.users
    }

    pub fn tags(&self) -> &[Rc<Tag>] {
        &self.tags
    }

    pub fn inventory(&self) -> &BooksInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut BooksInventory {
        &mut self.inventory
    }
}

fn array<'a>(raw: &'a RawValue, key: &str) -> Result<&'a [RawValue], ModelError> {
    match raw.get(key) {
        None | Some(RawValue::Null) => Ok(&[]),
        Some(value) => value.as_array()
            .ok_or_else(|| ModelError::MalformedSeed(format!("{} must be an array", key))),
    }
}

fn integer(raw: &RawValue, key: &str) -> Result<Option<i64>, ModelError> {
    match raw.get(key) {
        None | Some(RawValue::Null) => Ok(None),
        Some(value) => value.as_int()
            .map(Some)
            .ok_or_else(|| ModelError::MalformedSeed(format!("{} must be an integer: {}", key, value))),
    }
}
