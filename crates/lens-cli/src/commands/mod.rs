pub mod analyze;
pub mod assess;
pub mod classify;
pub mod dispatch;
pub mod flatten;
pub mod rank;
pub mod report;
pub mod rows;
pub mod schema;
