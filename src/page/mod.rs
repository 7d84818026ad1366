// SPDX-License-Identifier: MPL-2.0
//! Document model of a server-rendered storefront page.
//!
//! Only the parts the presenter interacts with are modelled: status banners
//! (elements carrying the `alert` class) and forms with their submit
//! control. See [`Document::parse`] for how the model is built from HTML.

mod parser;

use crate::error::Result;
use crate::ui::notifications::Severity;
use std::fmt;
use std::path::Path;

/// Class shared by every server-rendered status banner.
pub const ALERT_CLASS: &str = "alert";

/// Class markers per severity, in precedence order.
const SEVERITY_MARKERS: [(Severity, [&str; 2]); 4] = [
    (Severity::Success, ["alert-success", "success"]),
    (Severity::Error, ["alert-danger", "error"]),
    (Severity::Warning, ["alert-warning", "warning"]),
    (Severity::Info, ["alert-info", "info"]),
];

/// A status banner rendered by the server into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusElement {
    classes: Vec<String>,
    text: String,
    hidden: bool,
}

impl StatusElement {
    /// Creates a banner from its class list and text content.
    ///
    /// Whitespace runs in the text collapse to single spaces.
    pub fn new<I, S>(classes: I, text: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            text: collapse_whitespace(text),
            hidden: false,
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Trimmed text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Severity derived from the class list; `Info` when no marker matches.
    #[must_use]
    pub fn severity(&self) -> Severity {
        SEVERITY_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| self.has_class(m)))
            .map_or(Severity::Info, |(severity, _)| *severity)
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hides the banner without removing it from the page.
    pub fn hide(&mut self) {
        self.hidden = true;
    }
}

/// Identifier of a form within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(usize);

impl FormId {
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form-{}", self.0)
    }
}

/// Element kind of a submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    /// `<button type="submit">`; the label is its text content.
    Button,
    /// `<input type="submit">`; the label is its `value` attribute.
    Input,
}

/// The control that submits a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub kind: SubmitKind,
    pub label: String,
    pub disabled: bool,
}

impl SubmitControl {
    #[must_use]
    pub fn new(kind: SubmitKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            disabled: false,
        }
    }
}

/// A form on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    id: FormId,
    method: String,
    action: Option<String>,
    submit: Option<SubmitControl>,
}

impl Form {
    #[must_use]
    pub fn id(&self) -> FormId {
        self.id
    }

    /// Method attribute as written; HTML defaults to `get`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Whether the method is `post`, ignoring case.
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method.trim().eq_ignore_ascii_case("post")
    }

    #[must_use]
    pub fn submit_control(&self) -> Option<&SubmitControl> {
        self.submit.as_ref()
    }

    pub fn submit_control_mut(&mut self) -> Option<&mut SubmitControl> {
        self.submit.as_mut()
    }
}

/// The page model: status banners and forms in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: Option<String>,
    status_elements: Vec<StatusElement>,
    forms: Vec<Form>,
    next_form: usize,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans server-rendered HTML.
    ///
    /// The scan is tolerant of HTML that is not well-formed XML: void
    /// elements need no closing tag, end tag names are not checked and
    /// unmatched end tags are ignored. Named HTML entities common in
    /// storefront copy are decoded.
    pub fn parse(html: &str) -> Result<Self> {
        parser::parse(html)
    }

    /// Reads and scans an HTML file.
    pub fn load(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Self::parse(&html)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn push_status(&mut self, element: StatusElement) {
        self.status_elements.push(element);
    }

    /// Adds a form and returns its id.
    pub fn push_form(
        &mut self,
        method: impl Into<String>,
        action: Option<String>,
        submit: Option<SubmitControl>,
    ) -> FormId {
        let id = FormId(self.next_form);
        self.next_form += 1;
        self.forms.push(Form {
            id,
            method: method.into(),
            action,
            submit,
        });
        id
    }

    #[must_use]
    pub fn status_elements(&self) -> &[StatusElement] {
        &self.status_elements
    }

    pub fn status_elements_mut(&mut self) -> &mut [StatusElement] {
        &mut self.status_elements
    }

    #[must_use]
    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    #[must_use]
    pub fn form(&self, id: FormId) -> Option<&Form> {
        self.forms.iter().find(|form| form.id == id)
    }

    pub fn form_mut(&mut self, id: FormId) -> Option<&mut Form> {
        self.forms.iter_mut().find(|form| form.id == id)
    }

    /// Removes a form from the page.
    pub fn remove_form(&mut self, id: FormId) -> Option<Form> {
        let pos = self.forms.iter().position(|form| form.id == id)?;
        Some(self.forms.remove(pos))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_marker_precedence() {
        let cases: [(&[&str], Severity); 7] = [
            (&["alert", "alert-success"], Severity::Success),
            (&["alert", "success"], Severity::Success),
            (&["alert", "alert-danger"], Severity::Error),
            (&["alert", "error", "warning"], Severity::Error),
            (&["alert", "alert-warning", "info"], Severity::Warning),
            (&["alert", "alert-info"], Severity::Info),
            (&["alert", "alert-dismissible"], Severity::Info),
        ];
        for (classes, expected) in cases {
            let element = StatusElement::new(classes.iter().copied(), "x");
            assert_eq!(element.severity(), expected, "classes {:?}", classes);
        }
    }

    #[test]
    fn success_beats_error_when_both_present() {
        let element = StatusElement::new(["alert", "alert-danger", "success"], "x");
        assert_eq!(element.severity(), Severity::Success);
    }

    #[test]
    fn status_text_is_trimmed_and_collapsed() {
        let element = StatusElement::new(["alert"], "\n   Order\n   placed  ");
        assert_eq!(element.text(), "Order placed");
    }

    #[test]
    fn hide_keeps_element_in_document() {
        let mut doc = Document::new();
        doc.push_status(StatusElement::new(["alert"], "x"));
        doc.status_elements_mut()[0].hide();
        assert_eq!(doc.status_elements().len(), 1);
        assert!(doc.status_elements()[0].is_hidden());
    }

    #[test]
    fn post_detection_ignores_case() {
        let mut doc = Document::new();
        let upper = doc.push_form("POST", None, None);
        let get = doc.push_form("get", None, None);
        assert!(doc.form(upper).is_some_and(Form::is_post));
        assert!(!doc.form(get).is_some_and(Form::is_post));
    }

    #[test]
    fn form_ids_survive_removal() {
        let mut doc = Document::new();
        let a = doc.push_form("post", None, None);
        let b = doc.push_form("post", Some("/cart/".into()), None);
        assert!(doc.remove_form(a).is_some());
        assert!(doc.form(a).is_none());
        assert_eq!(doc.form(b).and_then(Form::action), Some("/cart/"));
        assert!(doc.remove_form(a).is_none());
    }
}
