use std::path::{Path, PathBuf};

use tracing::debug;

use super::{write_atomic, StoreError};
use crate::domain::coerce::parse_int_text;
use crate::domain::Bill;

/// Header written when the billing file does not exist yet.
pub const DEFAULT_BILLING_HEADERS: [&str; 5] = ["billid", "Customer", "Date", "Amount", "Sweet"];

const BILLING_COLUMNS: usize = DEFAULT_BILLING_HEADERS.len();

/// The billing table in on-file order, plus the header row it was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingTable {
    headers: Vec<String>,
    bills: Vec<Bill>,
}

impl Default for BillingTable {
    fn default() -> Self {
        Self {
            headers: DEFAULT_BILLING_HEADERS.iter().map(|h| h.to_string()).collect(),
            bills: Vec::new(),
        }
    }
}

impl BillingTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, billid: u32) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.billid == billid)
    }

    /// Stores `bill` under its id. An existing bill with the same id is
    /// overwritten in place and returned; otherwise the bill is appended.
    pub fn insert(&mut self, bill: Bill) -> Option<Bill> {
        match self.bills.iter_mut().find(|existing| existing.billid == bill.billid) {
            Some(existing) => Some(std::mem::replace(existing, bill)),
            None => {
                self.bills.push(bill);
                None
            }
        }
    }
}

/// Billing store backed by the customer CSV file.
///
/// Unlike the inventory store, a file that exists but cannot be parsed is
/// reported as an error rather than replaced by an empty table.
#[derive(Debug, Clone)]
pub struct BillingStore {
    path: PathBuf,
}

impl BillingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<BillingTable, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Billing file absent, starting empty");
                return Ok(BillingTable::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        self.parse(&bytes)
    }

    fn parse(&self, bytes: &[u8]) -> Result<BillingTable, StoreError> {
        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.len() != BILLING_COLUMNS {
            return Err(StoreError::malformed(
                &self.path,
                format!("expected {BILLING_COLUMNS} columns, found header {headers:?}"),
            ));
        }

        let mut bills = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let billid = record[0]
                .trim()
                .parse::<u32>()
                .map_err(|_| self.bad_cell(line, "billid", &record[0]))?;
            let amount =
                parse_int_text(&record[3]).ok_or_else(|| self.bad_cell(line, "amount", &record[3]))?;
            bills.push(Bill {
                billid,
                customer_name: record[1].to_string(),
                date: record[2].to_string(),
                amount,
                sweet_name: record[4].to_string(),
            });
        }

        Ok(BillingTable { headers, bills })
    }

    fn bad_cell(&self, line: u64, column: &str, value: &str) -> StoreError {
        StoreError::malformed(&self.path, format!("line {line}: invalid {column} {value:?}"))
    }

    pub async fn save(&self, table: &BillingTable) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(table.headers())?;
        for bill in table.bills() {
            writer.write_record([
                bill.billid.to_string().as_str(),
                bill.customer_name.as_str(),
                bill.date.as_str(),
                bill.amount.to_string().as_str(),
                bill.sweet_name.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StoreError::io(&self.path, e.into_error()))?;
        write_atomic(&self.path, &bytes).await?;
        debug!(bills = table.len(), "Billing table saved");
        Ok(())
    }
}
