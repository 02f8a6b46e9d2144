use crate::domain::{Book, Links, User};
use std::cell::Cell;
use std::rc::Rc;

/// 태그
///
/// 태그명은 가공 없이 그대로 저장되며 동등성은 태그명으로만 판단한다.
#[derive(Debug)]
pub struct Tag {
    tag_name: String,
    tagged_books: Links<Book>,
    users: Links<User>,

    // 태그된 도서 수와 자동으로 맞춰지지 않는다. [`Tag::update_size`] 참고
    size: Cell<usize>,
}

impl Tag {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_owned(),
            tagged_books: Links::new(),
            users: Links::new(),
            size: Cell::new(0),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tagged_books(&self) -> Vec<Rc<Book>> {
        self.tagged_books.to_vec()
    }

    pub fn number_of_tagged_books(&self) -> usize {
        self.tagged_books.len()
    }

    /// 도서를 태그 목록에 추가한다. 중복 검사는 하지 않는다.
    pub fn add_book(&self, book: &Rc<Book>) {
        self.tagged_books.push(book);
    }

    pub fn is_applied_to(&self, book: &Book) -> bool {
        self.tagged_books.contains(book)
    }

    pub fn users(&self) -> Vec<Rc<User>> {
        self.users.to_vec()
    }

    pub fn add_user(&self, user: &Rc<User>) {
        self.users.push(user);
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// 태그 크기를 1 증가 시킨다.
    ///
    /// [`Tag::add_book`]은 크기를 변경하지 않으므로, 크기를 태그된 도서 수와 맞추려면
    /// 도서를 추가할 때마다 호출하는 쪽에서 직접 호출해야 한다.
    pub fn update_size(&self) {
        self.size.set(self.size.get() + 1);
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.tag_name == other.tag_name
    }
}
