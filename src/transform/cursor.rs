//! Pull-based entity cursors
//!
//! A cursor yields entities one at a time and finishes with a
//! [`PageSummary`] carrying the pagination metadata of the page it walked.

use crate::core::entity::HalEntity;
use serde_json::Value;

/// Pagination metadata read once the cursor is exhausted
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    /// Number of entities matching the query across all pages
    pub total_count: u64,

    /// Opaque offset of the next page; null (or any falsy value) on the
    /// last page
    pub offset: Value,

    /// Number of entities in this page
    pub page_count: u64,
}

impl PageSummary {
    pub fn new(total_count: u64, offset: impl Into<Value>, page_count: u64) -> Self {
        Self {
            total_count,
            offset: offset.into(),
            page_count,
        }
    }
}

/// One step of a cursor walk
#[derive(Debug, Clone, PartialEq)]
pub enum CursorStep<E> {
    /// The next entity
    Entity(E),
    /// The cursor is exhausted
    Done(PageSummary),
}

/// A cursor over a page of entities
///
/// Each call to [`EntityCursor::advance`] completes before the next one is
/// issued; once `Done` is returned the walk is over.
pub trait EntityCursor {
    type Entity: HalEntity;

    fn advance(&mut self) -> CursorStep<Self::Entity>;
}

impl<C: EntityCursor + ?Sized> EntityCursor for &mut C {
    type Entity = C::Entity;

    fn advance(&mut self) -> CursorStep<Self::Entity> {
        (**self).advance()
    }
}

/// An in-memory page of entities
#[derive(Debug, Clone)]
pub struct PagedEntities<E> {
    items: std::vec::IntoIter<E>,
    summary: PageSummary,
}

impl<E: HalEntity> PagedEntities<E> {
    /// Create a cursor with an explicit summary
    pub fn new(items: Vec<E>, summary: PageSummary) -> Self {
        Self {
            items: items.into_iter(),
            summary,
        }
    }

    /// Create a cursor whose page count is the number of items
    pub fn from_page(items: Vec<E>, total_count: u64, offset: impl Into<Value>) -> Self {
        let page_count = items.len() as u64;
        Self::new(items, PageSummary::new(total_count, offset, page_count))
    }
}

impl<E: HalEntity> EntityCursor for PagedEntities<E> {
    type Entity = E;

    fn advance(&mut self) -> CursorStep<E> {
        match self.items.next() {
            Some(entity) => CursorStep::Entity(entity),
            None => CursorStep::Done(self.summary.clone()),
        }
    }
}
