pub mod aggregate;
pub mod date;
pub mod error;
pub mod genre;
pub mod row;
pub mod table;

pub use aggregate::{count_by_decade_genre, dedup_by_key};
pub use date::{decade_of, year_from_date};
pub use error::TableError;
pub use genre::{CoarseGenre, Genre};
pub use row::{AggregateCount, ClassifiedRow, FlatRow};
pub use table::{read_rows, read_rows_from, write_rows, write_rows_to};
