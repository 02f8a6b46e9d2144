use crate::domain::Book;
use crate::ModelError;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug)]
struct Stock {
    book: Rc<Book>,
    price: i64,
    count: i64,
}

/// 도서 재고 저장소
///
/// `book_id`를 키로 도서, 가격, 재고 수량을 함께 보관한다.
/// 세 값은 하나의 항목으로 저장되므로 추가, 삭제 시 항상 함께 변경된다.
/// 조회 순서는 처음 추가된 순서를 따른다.
#[derive(Debug, Default)]
pub struct BooksInventory {
    entries: HashMap<u64, Stock>,
    order: Vec<u64>,
}

impl BooksInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 도서를 추가한다. 같은 `book_id`가 이미 있으면 가격과 재고를 포함해 덮어쓴다.
    pub fn add_book(&mut self, book: &Rc<Book>, price: i64, stock_count: i64) {
        let book_id = book.book_id();
        let stock = Stock { book: Rc::clone(book), price, count: stock_count };
        if self.entries.insert(book_id, stock).is_none() {
            self.order.push(book_id);
        }
    }

    /// 도서를 재고에서 제거한다.
    ///
    /// # Errors
    /// - 해당 `book_id`의 도서가 없으면 [`ModelError::NotFound`], 이 때 재고는 변경되지 않는다.
    pub fn remove_book(&mut self, book_id: u64) -> Result<(), ModelError> {
        self.entries.remove(&book_id)
            .ok_or_else(|| ModelError::NotFound(format!("book {} is not in the inventory", book_id)))?;
        self.order.retain(|id| *id != book_id);
        Ok(())
    }

    pub fn find_book(&self, book_id: u64) -> Option<Rc<Book>> {
        self.entries.get(&book_id).map(|s| Rc::clone(&s.book))
    }

    pub fn find_price(&self, book_id: u64) -> Option<i64> {
        self.entries.get(&book_id).map(|s| s.price)
    }

    pub fn find_stock_count(&self, book_id: u64) -> Option<i64> {
        self.entries.get(&book_id).map(|s| s.count)
    }

    /// 제목이 정확히 일치(대소문자 구분)하는 첫 번째 도서를 찾는다.
    pub fn search_book_by_title(&self, title: &str) -> Option<Rc<Book>> {
        let found = self.order.iter()
            .filter_map(|id| self.entries.get(id))
            .find(|s| s.book.title() == title)
            .map(|s| Rc::clone(&s.book));
        if found.is_none() {
            debug!("No book titled {:?} in the inventory", title);
        }
        found
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
