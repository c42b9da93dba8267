#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Loading,
    NeedsVerification,
    Form,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: ScreenKind,
    pub promotion: String,
    pub targeting: String,
    /// Loading indicator: gate read, saved-input read or request in flight.
    pub is_loading: bool,
    /// Fields accept edits.
    pub form_enabled: bool,
    /// "Generate Link" is available.
    pub can_submit: bool,
    pub result_url: Option<String>,
    pub dirty: bool,
}
