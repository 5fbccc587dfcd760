use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{write_atomic, StoreError};
use crate::domain::Sweet;

pub const INVENTORY_HEADERS: [&str; 4] = ["Name", "Cost", "Quantity", "Ingredient"];

/// The inventory table in on-file row order. A row's index is its `code`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTable {
    rows: Vec<Sweet>,
}

impl InventoryTable {
    pub fn from_rows(rows: Vec<Sweet>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Sweet] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Sweet> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, code: usize) -> Option<&Sweet> {
        self.rows.get(code)
    }

    /// Appends a row and returns its code.
    pub fn push(&mut self, sweet: Sweet) -> usize {
        self.rows.push(sweet);
        self.rows.len() - 1
    }

    /// Overwrites the row at `code`, returning the previous contents.
    pub fn replace(&mut self, code: usize, sweet: Sweet) -> Option<Sweet> {
        self.rows
            .get_mut(code)
            .map(|row| std::mem::replace(row, sweet))
    }

    /// Removes the row at `code`; later rows move down by one.
    pub fn remove(&mut self, code: usize) -> Option<Sweet> {
        (code < self.rows.len()).then(|| self.rows.remove(code))
    }
}

/// Record store backed by the inventory CSV file.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole table. A missing, empty or malformed file yields an
    /// empty table instead of an error.
    pub async fn load(&self) -> InventoryTable {
        match self.try_load().await {
            Ok(table) => {
                debug!(rows = table.len(), "Inventory loaded");
                table
            }
            Err(StoreError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "Inventory file absent, starting empty");
                InventoryTable::default()
            }
            Err(e) => {
                warn!(error = %e, "Inventory file unreadable, starting empty");
                InventoryTable::default()
            }
        }
    }

    async fn try_load(&self) -> Result<InventoryTable, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        self.parse(&bytes)
    }

    fn parse(&self, bytes: &[u8]) -> Result<InventoryTable, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader.headers()?;
        if headers.iter().ne(INVENTORY_HEADERS) {
            return Err(StoreError::malformed(
                &self.path,
                format!("unexpected header row {:?}", headers),
            ));
        }

        let rows = reader
            .deserialize::<Sweet>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InventoryTable::from_rows(rows))
    }

    /// Replaces the file with the table's rows, header first.
    pub async fn save(&self, table: &InventoryTable) -> Result<(), StoreError> {
        let bytes = self.encode(table)?;
        write_atomic(&self.path, &bytes).await?;
        debug!(rows = table.len(), "Inventory saved");
        Ok(())
    }

    fn encode(&self, table: &InventoryTable) -> Result<Vec<u8>, StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(INVENTORY_HEADERS)?;
        for sweet in table.rows() {
            writer.serialize(sweet)?;
        }
        writer
            .into_inner()
            .map_err(|e| StoreError::io(&self.path, e.into_error()))
    }
}
