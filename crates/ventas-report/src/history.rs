//! # JSON Sale History
//!
//! [`SaleHistory`] backed by a local JSON file holding an array of sales,
//! the same shape the POS backend returns for its sales listing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};
use ventas_core::Sale;

use crate::collaborators::SaleHistory;
use crate::error::{ReportError, ReportResult};

/// Sale history read from a JSON file.
///
/// The snapshot is replaced wholesale on every [`refresh`](SaleHistory::refresh);
/// a failed refresh keeps the previous snapshot.
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    sales: RwLock<Vec<Sale>>,
}

impl JsonFileHistory {
    /// Opens the file and loads the first snapshot.
    pub async fn open(path: impl Into<PathBuf>) -> ReportResult<Self> {
        let history = JsonFileHistory {
            path: path.into(),
            sales: RwLock::new(Vec::new()),
        };
        history.refresh().await?;
        Ok(history)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SaleHistory for JsonFileHistory {
    fn current_sales(&self) -> Vec<Sale> {
        match self.sales.read() {
            Ok(sales) => sales.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn refresh(&self) -> ReportResult<()> {
        debug!(path = ?self.path, "Reading sale history");

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ReportError::io(&self.path, e))?;
        let sales: Vec<Sale> = serde_json::from_str(&contents)?;

        info!(path = ?self.path, count = sales.len(), "Sale history loaded");

        let mut guard = match self.sales.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = sales;
        Ok(())
    }
}
