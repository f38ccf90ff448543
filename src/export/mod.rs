mod csv;
mod sink;

pub use self::csv::to_delimited_text;
pub use sink::ExportSink;
