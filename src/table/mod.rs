//! Users table - column schema plus the filter/sort/paginate state machine
//!
//! The controller never owns records; it is handed the store's slice on
//! every call and derives the visible page from it.

pub mod column;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod sort;

pub use column::{CellValue, Column, ColumnKind, TableRow};
pub use controller::UserTableController;
pub use filter::UserFilter;
pub use pagination::PaginationState;
pub use sort::{SortDirection, SortState};
