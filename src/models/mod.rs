mod expense;
mod month;

pub use expense::ExpenseRecord;
pub use month::{InvalidMonth, MonthName, RECORD_YEAR};

#[cfg(test)]
mod tests;
