//! Commands as seen by application handlers.

use uuid::Uuid;

/// An intent addressed to one aggregate, handled by retrieve -> act -> persist.
///
/// The engine never inspects commands; handlers read these two values into
/// their span fields.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name such as `ledger.deposit_money`.
    fn command_type(&self) -> &'static str;

    /// Shared by every log line the handling of this command emits.
    fn correlation_id(&self) -> Uuid;
}
