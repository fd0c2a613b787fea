//! Generic tabular view logic shared by the users, products and orders screens.
//!
//! - [`data_view`]: [`DataView`], the filter, sort, paginate and select pipeline
//! - [`column`]: Column definitions and validation
//! - [`sort`]: Sort cycle and value comparator
//! - [`selection`]: Selected-id bookkeeping and checkbox state

pub mod column;
pub mod data_view;
pub mod selection;
pub mod sort;

pub use column::{validate_columns, ColumnDef};
pub use data_view::{DataView, SelectionCallback};
pub use selection::{CheckState, SelectionController};
pub use sort::{compare_values, SortDirection, SortState};
