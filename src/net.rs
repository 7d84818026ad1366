// SPDX-License-Identifier: MPL-2.0
//! Response middleware for outbound requests.
//!
//! [`Fetch`] abstracts "send a request, get a response". [`NotifyingFetch`]
//! decorates any implementation: responses carrying the notification
//! headers post a toast through a [`Notifier`], then reach the caller
//! unchanged. Failures pass through untouched.
//!
//! # Example
//!
//! ```no_run
//! use storefront_toasts::net::{Fetch, NotifyingFetch};
//! use storefront_toasts::ui::notifications::Manager;
//!
//! # async fn demo() -> Result<(), reqwest::Error> {
//! let manager = Manager::new();
//! let client = reqwest::Client::new();
//! let fetch = NotifyingFetch::new(client.clone(), manager.notifier());
//!
//! let request = client.post("https://shop.example/cart/add/3/").build()?;
//! let response = fetch.fetch(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

use crate::config::{NetworkConfig, MESSAGE_HEADER, TYPE_HEADER};
use crate::ui::notifications::Notifier;
use std::borrow::Cow;
use std::future::Future;

/// Read access to response metadata.
pub trait ResponseMeta {
    /// Returns the value of a header, looked up case-insensitively.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl ResponseMeta for reqwest::Response {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers()
            .get(name)
            .map(|value| decode_header_value(value.as_bytes()))
    }
}

/// Decodes a raw header value.
///
/// Valid UTF-8 is borrowed as is. Anything else is read as Latin-1, one
/// char per byte, which is how servers that predate UTF-8 headers encode
/// accented text.
#[must_use]
pub fn decode_header_value(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect()),
    }
}

/// An outbound request primitive.
pub trait Fetch {
    type Request: Send;
    type Response: ResponseMeta + Send;
    type Error: Send;

    fn fetch(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

impl Fetch for reqwest::Client {
    type Request = reqwest::Request;
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    fn fetch(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        self.execute(request)
    }
}

/// Decorator posting a notification for every response that carries the
/// message header.
#[derive(Debug, Clone)]
pub struct NotifyingFetch<F> {
    inner: F,
    notifier: Notifier,
    message_header: String,
    type_header: String,
}

impl<F> NotifyingFetch<F> {
    /// Wraps `inner` using the standard header names.
    pub fn new(inner: F, notifier: Notifier) -> Self {
        Self::with_headers(inner, notifier, MESSAGE_HEADER, TYPE_HEADER)
    }

    pub fn with_headers(
        inner: F,
        notifier: Notifier,
        message_header: impl Into<String>,
        type_header: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            notifier,
            message_header: message_header.into(),
            type_header: type_header.into(),
        }
    }

    /// Wraps `inner` using the header names from the `[network]` section.
    pub fn from_config(inner: F, notifier: Notifier, config: &NetworkConfig) -> Self {
        Self::with_headers(
            inner,
            notifier,
            config.message_header.as_deref().unwrap_or(MESSAGE_HEADER),
            config.type_header.as_deref().unwrap_or(TYPE_HEADER),
        )
    }

    #[must_use]
    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn inspect<R: ResponseMeta>(&self, response: &R) {
        let Some(message) = response
            .header(&self.message_header)
            .filter(|message| !message.is_empty())
        else {
            return;
        };
        let kind = response
            .header(&self.type_header)
            .filter(|kind| !kind.is_empty());
        self.notifier
            .show_from_response(message.into_owned(), kind.as_deref().unwrap_or("info"));
    }
}

impl<F> Fetch for NotifyingFetch<F>
where
    F: Fetch + Sync,
{
    type Request = F::Request;
    type Response = F::Response;
    type Error = F::Error;

    fn fetch(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        async move {
            let response = self.inner.fetch(request).await?;
            self.inspect(&response);
            Ok(response)
        }
    }
}
