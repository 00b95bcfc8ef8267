/// The display side of the client: owns the widgets, never the dispatch.
///
/// For every accepted submit or health check the core calls
/// `on_dispatch_started` exactly once and later `on_outcome` exactly once,
/// unless the session is torn down first, in which case `on_outcome` is never
/// called. Implementors disable their input controls on start and re-enable
/// them on outcome.
pub trait UiCoordinator {
    fn on_dispatch_started(&mut self, status: &str);
    fn on_outcome(&mut self, report: &str, status: &str);
    /// Input refused before any dispatch (empty text, empty host).
    fn on_rejected(&mut self, message: &str);
    /// Informational update that is not tied to a dispatch.
    fn on_notice(&mut self, report: &str, status: &str);
}
