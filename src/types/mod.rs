pub mod report;

pub use report::{InitReport, TableReport};
