//! The seam between use cases and whatever renders them.

use async_trait::async_trait;
use spotilove_core::navigation::Notice;

/// Receives notices and answers questions on behalf of the user.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Shows a notice. Must not block on user input.
    fn notify(&self, notice: Notice);

    /// Asks whether a failed request should be tried once more.
    ///
    /// `false` means the user declined; the caller leaves state untouched.
    async fn confirm_retry(&self, title: &str, message: &str) -> bool;
}
