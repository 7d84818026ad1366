// SPDX-License-Identifier: MPL-2.0
//! Application root state for the demo storefront window.
//!
//! The `App` struct owns one page [`Session`] and the diagnostics collector,
//! and translates messages into session calls. Ticks only run while the
//! session has pending timers or queued requests.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};
pub use view::SAMPLE_PRODUCT;

use crate::clock;
use crate::config::{self, Config, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY};
use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
use crate::page::Document;
use crate::session::Session;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::Path;

/// Page shown when no `--page` is given.
pub const DEMO_PAGE: &str = include_str!("../../demos/storefront.html");

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 600;

/// Root Iced application state.
pub struct App {
    session: Session,
    diagnostics: DiagnosticsCollector,
    /// Shown on the page when the config file could not be read.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("toasts", &self.session.manager().len())
            .field("diagnostic_events", &self.diagnostics.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Creates the diagnostics collector sized from the config.
pub fn diagnostics_for(config: &Config) -> DiagnosticsCollector {
    let capacity = config
        .diagnostics
        .buffer_capacity
        .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
    DiagnosticsCollector::new(BufferCapacity::new(capacity))
}

/// Loads the page to present: the given file, or the bundled demo page.
///
/// An unreadable page is reported and replaced by an empty document.
pub fn load_document(path: Option<&Path>, diagnostics: &DiagnosticsCollector) -> Document {
    let result = match path {
        Some(path) => Document::load(path),
        None => Document::parse(DEMO_PAGE),
    };
    result.unwrap_or_else(|err| {
        let message = match path {
            Some(path) => format!("Failed to load page {}: {}", path.display(), err),
            None => format!("Failed to load demo page: {}", err),
        };
        eprintln!("{}", message);
        diagnostics.handle().log_error(message);
        Document::new()
    })
}

impl App {
    /// Loads config and page, then starts the page session.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir);
        if let Some(warning) = &config_warning {
            eprintln!("{}", warning);
        }

        let diagnostics = diagnostics_for(&config);
        let document = load_document(flags.page_path.as_deref(), &diagnostics);
        let session = Session::start(
            document,
            &config,
            clock::system(),
            Some(diagnostics.handle()),
        );

        let app = App {
            session,
            diagnostics,
            config_warning,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        view::page_title(self.session.document()).to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.session.has_pending_work())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Notification(notification_message) => {
                self.session
                    .manager_mut()
                    .handle_message(&notification_message);
            }
            Message::Dispatch(event) => {
                self.session.dispatch(&event);
            }
            Message::Submit(form) => {
                self.session.submit(form);
            }
            Message::ShowSamples => {
                let manager = self.session.manager_mut();
                manager.success("Adresse enregistrée");
                manager.info("Nouvelle collection disponible");
                manager.warning("Stock limité pour Rose Oud");
                manager.error("Paiement refusé");
            }
            Message::HideAll => self.session.manager_mut().hide_all(),
            Message::Tick(_instant) => {
                self.session.tick();
                self.diagnostics.process_pending();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            session: &self.session,
            config_warning: self.config_warning.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StorefrontEvent;
    use crate::ui::notifications::Severity;
    use std::time::Instant;
    use tempfile::tempdir;

    fn app() -> App {
        let dir = tempdir().expect("temp dir");
        let (app, _task) = App::new(Flags {
            page_path: None,
            config_dir: Some(dir.path().to_path_buf()),
        });
        app
    }

    #[test]
    fn demo_page_adopts_its_banners() {
        let app = app();
        let messages: Vec<_> = app
            .session
            .manager()
            .visible()
            .map(|n| n.message().to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Commande confirmée, merci !".to_string(),
                "Livraison offerte dès 60 €".to_string(),
            ]
        );
        assert_eq!(app.title(), "Parfumerie \u{b7} Panier");
    }

    #[test]
    fn dispatch_and_hide_all_update_the_session() {
        let mut app = app();
        let _ = app.update(Message::Dispatch(StorefrontEvent::CartItemAdded {
            product_name: SAMPLE_PRODUCT.to_string(),
        }));
        let last = app.session.manager().visible().last().expect("toast");
        assert_eq!(last.message(), "Rose Oud ajouté au panier");
        assert_eq!(last.severity(), Severity::Success);

        let _ = app.update(Message::HideAll);
        assert!(app
            .session
            .manager()
            .visible()
            .all(|n| n.class_list().contains(&"hide")));
    }

    #[test]
    fn submit_locks_demo_form() {
        let mut app = app();
        let form = app.session.document().forms()[0].id();
        let _ = app.update(Message::Submit(form));
        let label = app.session.document().forms()[0]
            .submit_control()
            .map(|c| c.label.clone());
        assert_eq!(label.as_deref(), Some("Chargement..."));
        assert!(app.session.has_pending_work());
    }

    #[test]
    fn tick_drains_diagnostics() {
        let mut app = app();
        let _ = app.update(Message::Tick(Instant::now()));
        // Session start and the two adopted banners at least.
        assert!(app.diagnostics.len() >= 3);
    }

    #[test]
    fn missing_page_file_falls_back_to_empty_document() {
        let diagnostics = diagnostics_for(&Config::default());
        let document = load_document(Some(Path::new("/nonexistent/page.html")), &diagnostics);
        assert!(document.status_elements().is_empty());
        assert!(document.forms().is_empty());
    }
}
