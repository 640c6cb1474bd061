//! `/reports` endpoints.

use bytes::Bytes;

use super::{ClientError, CronosClient, check_status};

/// File name the admin report is saved under.
pub const ADMIN_REPORT_FILE_NAME: &str = "Laporan_Admin_CRONOS.pdf";

impl CronosClient {
    /// `GET /reports/admin` – the rendered PDF as raw bytes.
    pub async fn admin_report(&self) -> Result<Bytes, ClientError> {
        let url = self.endpoint("reports/admin")?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.bytes().await?)
    }
}
