//! Typed seam for invoice PDF rendering.
//!
//! The renderer is an external collaborator behind a trait; the service
//! performs its asynchronous initialization exactly once and holds an
//! explicit resolved/rejected state, so rendering against a renderer
//! that failed to initialize is a normal error rather than a crash.

use async_trait::async_trait;
use tallyboard_core::invoice::Invoice;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Initialization has not resolved, or resolved rejected.
    #[error("PDF renderer is not ready: {0}")]
    NotReady(String),

    /// The renderer failed while producing the document.
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// An external PDF-rendering collaborator.
#[async_trait]
pub trait InvoicePdfRenderer: Send + Sync {
    /// Render one invoice into PDF bytes.
    async fn build_invoice_pdf(&self, invoice: &Invoice) -> Result<Vec<u8>, PdfError>;
}

/// Holds the renderer behind its one-time initialization outcome.
pub struct PdfService {
    renderer: Result<Box<dyn InvoicePdfRenderer>, String>,
}

impl PdfService {
    /// Run the renderer's async initialization once and capture the
    /// resolved or rejected outcome.
    pub async fn initialize<F, Fut>(init: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Box<dyn InvoicePdfRenderer>, PdfError>>,
    {
        let renderer = match init().await {
            Ok(renderer) => Ok(renderer),
            Err(error) => {
                tracing::warn!(%error, "PDF renderer initialization rejected");
                Err(error.to_string())
            }
        };
        Self { renderer }
    }

    pub fn is_ready(&self) -> bool {
        self.renderer.is_ok()
    }

    /// Render an invoice, failing with [`PdfError::NotReady`] when
    /// initialization was rejected.
    pub async fn render(&self, invoice: &Invoice) -> Result<Vec<u8>, PdfError> {
        match &self.renderer {
            Ok(renderer) => renderer.build_invoice_pdf(invoice).await,
            Err(reason) => Err(PdfError::NotReady(reason.clone())),
        }
    }
}
