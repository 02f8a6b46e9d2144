use crate::domain::{trim_non_empty, Book, Links};
use crate::raw::RawValue;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::debug;

/// 이름이 유효하지 않을 때 대신 사용하는 출판사명
pub const UNKNOWN_PUBLISHER: &str = "N/A";

/// 출판사
///
/// 다른 엔티티와 달리 이름이 유효하지 않아도 생성에 실패하지 않고 [`UNKNOWN_PUBLISHER`]로 대체한다.
/// 동등성, 정렬, 해시는 모두 출판사명(대소문자 구분)을 기준으로 한다.
#[derive(Debug)]
pub struct Publisher {
    name: RefCell<String>,
    books: Links<Book>,
}

impl Publisher {
    pub fn new(name: &str) -> Self {
        let publisher = Self {
            name: RefCell::new(UNKNOWN_PUBLISHER.to_owned()),
            books: Links::new(),
        };
        publisher.set_name(name);
        publisher
    }

    /// 외부 데이터로 출판사를 생성한다. 문자열이 아닌 값은 [`UNKNOWN_PUBLISHER`]로 대체 된다.
    pub fn from_raw(name: &RawValue) -> Self {
        match name.as_text() {
            Some(name) => Self::new(name),
            None => {
                debug!("Publisher name is not a text: {}", name);
                Self::new("")
            }
        }
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        let name = trim_non_empty(name).unwrap_or_else(|| {
            debug!("Empty publisher name, fallback to {}", UNKNOWN_PUBLISHER);
            UNKNOWN_PUBLISHER.to_owned()
        });
        *self.name.borrow_mut() = name;
    }

    pub fn books(&self) -> Vec<Rc<Book>> {
        self.books.to_vec()
    }

    pub fn add_book(&self, book: &Rc<Book>) {
        self.books.push(book);
    }
}

impl PartialEq for Publisher {
    fn eq(&self, other: &Self) -> bool {
        *self.name.borrow() == *other.name.borrow()
    }
}

impl Eq for Publisher {}

impl PartialOrd for Publisher {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Publisher {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.borrow().cmp(&other.name.borrow())
    }
}

impl Hash for Publisher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.borrow().hash(state);
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<Publisher {}>", self.name.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let publisher = Publisher::new("  Avatar Press ");
        assert_eq!(publisher.name(), "Avatar Press");
        assert_eq!(publisher.to_string(), "<Publisher Avatar Press>");
    }

    #[test]
    fn invalid_name_falls_back_to_sentinel() {
        assert_eq!(Publisher::new("").name(), UNKNOWN_PUBLISHER);
        assert_eq!(Publisher::new("    ").name(), UNKNOWN_PUBLISHER);
        assert_eq!(Publisher::from_raw(&RawValue::from(42)).name(), UNKNOWN_PUBLISHER);
        assert_eq!(Publisher::from_raw(&RawValue::from("DC")).name(), "DC");
    }

    #[test]
    fn set_name_replaces_previous_name() {
        let publisher = Publisher::new("Marvel");
        publisher.set_name("");
        assert_eq!(publisher.name(), UNKNOWN_PUBLISHER);
        publisher.set_name(" Image ");
        assert_eq!(publisher.name(), "Image");
    }

    #[test]
    fn equality_and_ordering_use_name() {
        let a = Publisher::new("Avatar");
        let b = Publisher::new("Boom");
        assert_eq!(a, Publisher::new("Avatar"));
        assert_ne!(a, Publisher::new("avatar"));
        assert!(a < b);
    }

    #[test]
    fn hash_uses_name() {
        use std::collections::HashSet;
        use std::collections::hash_map::DefaultHasher;

        let hash_of = |publisher: &Publisher| {
            let mut hasher = DefaultHasher::new();
            publisher.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash_of(&Publisher::new("Avatar")), hash_of(&Publisher::new(" Avatar ")));

        let set: HashSet<Publisher> = [Publisher::new("Avatar"), Publisher::new("Avatar"), Publisher::new("Boom")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn add_book_keeps_insertion_order() {
        let publisher = Publisher::new("Avatar");
        let first = Rc::new(Book::new(2, "Crossed").unwrap());
        let second = Rc::new(Book::new(1, "Uber").unwrap());
        publisher.add_book(&first);
        publisher.add_book(&second);

        let ids: Vec<u64> = publisher.books().iter().map(|b| b.book_id()).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
