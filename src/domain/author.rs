use crate::domain::{non_negative_id, raw_id, trim_non_empty, Book, Links};
use crate::raw::RawValue;
use crate::ModelError;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// 저자
///
/// 동등성, 정렬, 해시는 모두 `unique_id`를 기준으로 한다.
#[derive(Debug)]
pub struct Author {
    unique_id: u64,
    full_name: RefCell<String>,

    // 공저자 집합 (unique_id -> 저자)
    coauthors: RefCell<HashMap<u64, Weak<Author>>>,
    authored_books: Links<Book>,
}

impl Author {

    /// # Errors
    /// - `unique_id`가 음수인 경우
    /// - `full_name`이 공백을 제거하면 빈 문자열인 경우
    pub fn new(unique_id: i64, full_name: &str) -> Result<Self, ModelError> {
        Self::with_id(non_negative_id(unique_id, "author id")?, full_name)
    }

    fn with_id(unique_id: u64, full_name: &str) -> Result<Self, ModelError> {
        let full_name = validate_full_name(full_name)?;

        Ok(Self {
            unique_id,
            full_name: RefCell::new(full_name),
            coauthors: RefCell::new(HashMap::new()),
            authored_books: Links::new(),
        })
    }

    /// 외부 데이터로 저자를 생성한다. 정수가 아닌 아이디, 문자열이 아닌 이름은 실패로 처리한다.
    pub fn from_raw(unique_id: &RawValue, full_name: &RawValue) -> Result<Self, ModelError> {
        let unique_id = raw_id(unique_id, "author id")?;
        let full_name = full_name.as_text()
            .ok_or_else(|| ModelError::InvalidArgument(format!("author name must be a text: {}", full_name)))?;

        Self::with_id(unique_id, full_name)
    }

    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }

    pub fn full_name(&self) -> String {
        self.full_name.borrow().clone()
    }

    pub fn set_full_name(&self, full_name: &str) -> Result<(), ModelError> {
        *self.full_name.borrow_mut() = validate_full_name(full_name)?;
        Ok(())
    }

    /// 공저자를 추가한다. 자기 자신(같은 `unique_id`)은 추가되지 않는다.
    ///
    /// 관계는 한 방향으로만 기록 되므로 서로를 공저자로 기록하려면 양쪽 모두 호출해야 한다.
    pub fn add_coauthor(&self, coauthor: &Rc<Author>) {
        if coauthor.unique_id == self.unique_id {
            return;
        }
        self.coauthors.borrow_mut()
            .insert(coauthor.unique_id, Rc::downgrade(coauthor));
    }

    pub fn has_coauthored_with(&self, author: &Author) -> bool {
        self.coauthors.borrow()
            .get(&author.unique_id)
            .is_some_and(|c| c.strong_count() > 0)
    }

    /// 공저자 목록을 `unique_id` 순으로 반환한다.
    pub fn coauthors(&self) -> Vec<Rc<Author>> {
        let mut coauthors: Vec<Rc<Author>> = self.coauthors.borrow()
            .values()
            .filter_map(Weak::upgrade)
            .collect();
        coauthors.sort();
        coauthors
    }

    pub fn authored_books(&self) -> Vec<Rc<Book>> {
        self.authored_books.to_vec()
    }

    pub fn add_book(&self, book: &Rc<Book>) {
        self.authored_books.push(book);
    }
}

fn validate_full_name(full_name: &str) -> Result<String, ModelError> {
    trim_non_empty(full_name)
        .ok_or_else(|| ModelError::InvalidArgument("author name must not be empty".to_owned()))
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id == other.unique_id
    }
}

impl Eq for Author {}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unique_id.cmp(&other.unique_id)
    }
}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_id.hash(state);
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<Author {}, author id = {}>", self.full_name.borrow(), self.unique_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_author_round_trips() {
        let author = Author::new(3675, "  J.R.R. Tolkien ").unwrap();
        assert_eq!(author.unique_id(), 3675);
        assert_eq!(author.full_name(), "J.R.R. Tolkien");
        assert_eq!(author.to_string(), "<Author J.R.R. Tolkien, author id = 3675>");
    }

    #[test]
    fn invalid_identity_fails() {
        assert!(matches!(Author::new(-1, "Name"), Err(ModelError::InvalidArgument(_))));
        assert!(matches!(Author::new(1, ""), Err(ModelError::InvalidArgument(_))));
        assert!(matches!(Author::new(1, "   "), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn from_raw_rejects_non_integer_id() {
        let name = RawValue::from("Name");
        assert!(Author::from_raw(&RawValue::from("1"), &name).is_err());
        assert!(Author::from_raw(&RawValue::from(1.5), &name).is_err());
        assert!(Author::from_raw(&RawValue::from(1), &RawValue::from(5)).is_err());
        assert_eq!(Author::from_raw(&RawValue::from(1), &name).unwrap().unique_id(), 1);
        assert_eq!(Author::from_raw(&RawValue::from(u64::MAX), &name).unwrap().unique_id(), u64::MAX);
        assert!(matches!(Author::from_raw(&RawValue::from(-1), &name), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn set_full_name_keeps_previous_on_failure() {
        let author = Author::new(1, "Before").unwrap();
        assert!(author.set_full_name(" ").is_err());
        assert_eq!(author.full_name(), "Before");
        author.set_full_name(" After ").unwrap();
        assert_eq!(author.full_name(), "After");
    }

    #[test]
    fn equality_hash_and_ordering_use_id() {
        use std::collections::HashSet;

        let a = Author::new(1, "A").unwrap();
        let b = Author::new(1, "B").unwrap();
        let c = Author::new(2, "A").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);

        let set: HashSet<Author> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn add_coauthor_is_irreflexive() {
        let author = Rc::new(Author::new(1, "A").unwrap());
        author.add_coauthor(&author);
        author.add_coauthor(&Rc::new(Author::new(1, "Same id").unwrap()));

        assert!(author.coauthors().is_empty());
        assert!(!author.has_coauthored_with(&author));
    }

    #[test]
    fn add_coauthor_is_one_directional() {
        let a = Rc::new(Author::new(1, "A").unwrap());
        let b = Rc::new(Author::new(2, "B").unwrap());
        a.add_coauthor(&b);
        a.add_coauthor(&b);

        assert!(a.has_coauthored_with(&b));
        assert!(!b.has_coauthored_with(&a));
        assert_eq!(a.coauthors().len(), 1);
    }
}
