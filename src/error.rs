// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Markup(String),
    Event(EventError),
}

/// Reasons an inbound application event could not be turned into a
/// notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The payload is not valid JSON or does not have the expected shape.
    Malformed(String),

    /// No listener is registered for this event name.
    Unknown(String),

    /// A required detail field is absent.
    MissingField {
        event: String,
        field: &'static str,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Malformed(msg) => write!(f, "Malformed event payload: {}", msg),
            EventError::Unknown(name) => write!(f, "No listener for event: {}", name),
            EventError::MissingField { event, field } => {
                write!(f, "Event {} is missing field {}", event, field)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Markup(e) => write!(f, "Markup Error: {}", e),
            Error::Event(e) => write!(f, "Event Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<EventError> for Error {
    fn from(err: EventError) -> Self {
        Error::Event(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Event(EventError::Malformed(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn json_error_becomes_malformed_event() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Event(EventError::Malformed(_))));
    }

    #[test]
    fn missing_field_display_names_event_and_field() {
        let err = EventError::MissingField {
            event: "cart:item-added".into(),
            field: "productName",
        };
        let text = format!("{}", err);
        assert!(text.contains("cart:item-added"));
        assert!(text.contains("productName"));
    }
}
