// SPDX-License-Identifier: MPL-2.0
//! Tolerant HTML scanner built on `quick-xml`.

use super::{Document, StatusElement, SubmitControl, SubmitKind, ALERT_CLASS};
use crate::error::{Error, Result};
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// What an open element contributes to the model.
#[derive(Debug)]
enum Role {
    Plain,
    /// Status banner being collected.
    Alert { classes: Vec<String>, text: String },
    /// Form, with its index in `Scan::forms`.
    Form(usize),
    /// Submit button whose label is being collected.
    SubmitButton { disabled: bool, label: String },
}

#[derive(Debug)]
struct Frame {
    name: String,
    role: Role,
}

#[derive(Debug, Default)]
struct PendingForm {
    method: String,
    action: Option<String>,
    submit: Option<SubmitControl>,
}

#[derive(Debug, Default)]
struct Scan {
    stack: Vec<Frame>,
    title: Option<String>,
    in_title: bool,
    alerts: Vec<StatusElement>,
    forms: Vec<PendingForm>,
}

pub(super) fn parse(html: &str) -> Result<Document> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    let decoder = reader.decoder();

    let mut scan = Scan::default();
    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Markup(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;
        match event {
            Event::Start(ref e) => {
                let name = tag_name(e);
                if VOID_ELEMENTS.contains(&name.as_str()) {
                    scan.empty_element(&name, e);
                } else {
                    scan.open(name, e);
                }
            }
            Event::Empty(ref e) => {
                let name = tag_name(e);
                scan.empty_element(&name, e);
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                scan.close(&name);
            }
            Event::Text(ref e) => {
                let raw = decoder
                    .decode(e)
                    .map_err(|err| Error::Markup(err.to_string()))?;
                let text = unescape_with(&raw, resolve_html_entity)
                    .map(|t| t.into_owned())
                    .unwrap_or_else(|_| raw.into_owned());
                scan.text(&text);
            }
            Event::CData(ref e) => {
                scan.text(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Elements left open at end of input still count.
    while !scan.stack.is_empty() {
        scan.pop();
    }

    let mut document = Document::new();
    if let Some(title) = scan.title {
        document.set_title(title.trim());
    }
    for alert in scan.alerts {
        document.push_status(alert);
    }
    for form in scan.forms {
        document.push_form(form.method, form.action, form.submit);
    }
    Ok(document)
}

impl Scan {
    fn open(&mut self, name: String, e: &BytesStart<'_>) {
        let role = match name.as_str() {
            "form" => {
                self.forms.push(PendingForm {
                    method: attribute(e, "method").unwrap_or_else(|| "get".to_string()),
                    action: attribute(e, "action"),
                    submit: None,
                });
                Role::Form(self.forms.len() - 1)
            }
            "button" if is_submit(e) && self.current_form_needs_submit() => Role::SubmitButton {
                disabled: has_attribute(e, "disabled"),
                label: String::new(),
            },
            "title" => {
                self.in_title = true;
                Role::Plain
            }
            _ => {
                let classes = class_list(e);
                if classes.iter().any(|c| c == ALERT_CLASS) {
                    Role::Alert {
                        classes,
                        text: String::new(),
                    }
                } else {
                    Role::Plain
                }
            }
        };
        self.stack.push(Frame { name, role });
    }

    fn empty_element(&mut self, name: &str, e: &BytesStart<'_>) {
        if name == "input" && is_submit(e) && self.current_form_needs_submit() {
            let control = SubmitControl {
                kind: SubmitKind::Input,
                label: attribute(e, "value").unwrap_or_default(),
                disabled: has_attribute(e, "disabled"),
            };
            self.set_current_submit(control);
        } else if name == "br" {
            // Line breaks separate words; whitespace is collapsed later.
            self.text(" ");
        }
    }

    fn close(&mut self, name: &str) {
        // Unmatched end tags are ignored; implicitly closed children are
        // finished along with their parent.
        if !self.stack.iter().any(|frame| frame.name == name) {
            return;
        }
        while let Some(frame_name) = self.pop() {
            if frame_name == name {
                break;
            }
        }
    }

    fn pop(&mut self) -> Option<String> {
        let frame = self.stack.pop()?;
        match frame.role {
            Role::Alert { classes, text } => {
                self.alerts.push(StatusElement::new(classes, &text));
            }
            Role::SubmitButton { disabled, label } => {
                let control = SubmitControl {
                    kind: SubmitKind::Button,
                    label: label.split_whitespace().collect::<Vec<_>>().join(" "),
                    disabled,
                };
                self.set_current_submit(control);
            }
            Role::Plain if frame.name == "title" => self.in_title = false,
            Role::Plain | Role::Form(_) => {}
        }
        Some(frame.name)
    }

    fn text(&mut self, text: &str) {
        if self.in_title {
            self.title.get_or_insert_with(String::new).push_str(text);
        }
        for frame in &mut self.stack {
            match &mut frame.role {
                Role::Alert { text: buf, .. } | Role::SubmitButton { label: buf, .. } => {
                    buf.push_str(text);
                }
                Role::Plain | Role::Form(_) => {}
            }
        }
    }

    fn current_form(&self) -> Option<usize> {
        self.stack.iter().rev().find_map(|frame| match frame.role {
            Role::Form(index) => Some(index),
            _ => None,
        })
    }

    /// Only the first submit control of a form is recorded.
    fn current_form_needs_submit(&self) -> bool {
        self.current_form()
            .is_some_and(|index| self.forms[index].submit.is_none())
            && !self
                .stack
                .iter()
                .any(|frame| matches!(frame.role, Role::SubmitButton { .. }))
    }

    fn set_current_submit(&mut self, control: SubmitControl) {
        if let Some(index) = self.current_form() {
            let form = &mut self.forms[index];
            if form.submit.is_none() {
                form.submit = Some(control);
            }
        }
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))
        .map(|a| {
            a.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&a.value).into_owned())
        })
}

fn has_attribute(e: &BytesStart<'_>, key: &str) -> bool {
    e.html_attributes()
        .flatten()
        .any(|a| a.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))
}

fn is_submit(e: &BytesStart<'_>) -> bool {
    attribute(e, "type").is_some_and(|t| t.trim().eq_ignore_ascii_case("submit"))
}

fn class_list(e: &BytesStart<'_>) -> Vec<String> {
    attribute(e, "class")
        .map(|classes| classes.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Resolves XML entities plus the named HTML entities found in storefront
/// templates.
fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or(match entity {
        "nbsp" => Some("\u{a0}"),
        "times" => Some("\u{d7}"),
        "hellip" => Some("\u{2026}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        "rsquo" => Some("\u{2019}"),
        "lsquo" => Some("\u{2018}"),
        "euro" => Some("\u{20ac}"),
        "copy" => Some("\u{a9}"),
        "middot" => Some("\u{b7}"),
        "agrave" => Some("\u{e0}"),
        "acirc" => Some("\u{e2}"),
        "ccedil" => Some("\u{e7}"),
        "eacute" => Some("\u{e9}"),
        "egrave" => Some("\u{e8}"),
        "ecirc" => Some("\u{ea}"),
        "icirc" => Some("\u{ee}"),
        "ocirc" => Some("\u{f4}"),
        "ugrave" => Some("\u{f9}"),
        "ucirc" => Some("\u{fb}"),
        "Eacute" => Some("\u{c9}"),
        _ => None,
    })
}
