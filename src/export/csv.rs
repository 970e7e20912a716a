use std::io::Write;

use spending_domain::Transaction;

use crate::errors::AppError;

pub const CSV_HEADER: [&str; 5] = ["Date", "Category", "Description", "Type", "Amount"];

/// Writes one row per transaction, newest entered first. Dates are
/// `dd/mm/yyyy`; amounts are signed with expenses negative.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), AppError> {
    let mut csv = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for txn in transactions.iter().rev() {
        csv.write_record([
            txn.date.format("%d/%m/%Y").to_string().as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            txn.kind.as_str(),
            txn.signed_amount().normalize().to_string().as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
