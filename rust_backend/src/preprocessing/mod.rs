pub mod pipeline;
pub mod validator;

pub use pipeline::{analyze_csv_text, analyze_records, describe_summary, AnalysisPipeline};
pub use validator::{filter_reservations, ReservationValidator, ValidationOutcome, ValidationStats};
