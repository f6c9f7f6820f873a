use crate::label::Label;
use crate::locale::Locale;
use crate::state::LanguageState;

/// A translated string held by a consumer that renders it repeatedly.
///
/// The string is resolved once and reused until the language state reports
/// a different locale or a forced refresh.
#[derive(Clone, Debug)]
pub struct LocalizedText {
    label: Label,
    cached: String,
    seen: (Locale, u64),
}

impl LocalizedText {
    pub fn new(state: &LanguageState, label: impl Into<Label>) -> Self {
        let label = label.into();
        let snap = state.snapshot();
        Self {
            cached: state.translate_label(&label),
            label,
            seen: (snap.locale, snap.revision),
        }
    }

    /// Whether the next [`LocalizedText::get`] will re-resolve.
    pub fn is_stale(&self, state: &LanguageState) -> bool {
        let snap = state.snapshot();
        (snap.locale, snap.revision) != self.seen
    }

    pub fn get(&mut self, state: &LanguageState) -> &str {
        let snap = state.snapshot();
        let current = (snap.locale, snap.revision);
        if current != self.seen {
            self.cached = state.translate_label(&self.label);
            self.seen = current;
        }
        &self.cached
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}
