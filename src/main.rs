// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use storefront_toasts::app::{self, Flags};
use storefront_toasts::clock;
use storefront_toasts::config;
use storefront_toasts::net::Fetch;
use storefront_toasts::session::Session;
use storefront_toasts::ui::notifications::markup;

const HELP: &str = "\
storefront_toasts

USAGE:
  storefront_toasts [OPTIONS]

OPTIONS:
  --page <FILE>        Server-rendered page to load (defaults to the demo page)
  --config-dir <DIR>   Directory holding settings.toml
  --headless           Print the toast container markup instead of opening a window
  --event <JSON>       Event envelope to dispatch in headless mode (repeatable)
  --fetch <URL>        GET a URL in headless mode; notification headers become toasts (repeatable)
  --diagnostics        Print the diagnostics report in headless mode
  -h, --help           Print this help
";

struct Args {
    flags: Flags,
    headless: bool,
    events: Vec<String>,
    fetches: Vec<String>,
    diagnostics: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let page_path: Option<PathBuf> = args.opt_value_from_str("--page")?;
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let headless = args.contains("--headless");
    let diagnostics = args.contains("--diagnostics");
    let events: Vec<String> = args.values_from_str("--event")?;
    let fetches: Vec<String> = args.values_from_str("--fetch")?;
    // Accepted and ignored.
    let _lang: Option<String> = args.opt_value_from_str("--lang")?;

    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("Ignoring unexpected arguments: {:?}", rest);
    }

    Ok(Some(Args {
        flags: Flags {
            page_path,
            config_dir,
        },
        headless,
        events,
        fetches,
        diagnostics,
    }))
}

/// Runs one page session without a window and prints the toast markup.
fn run_headless(args: Args) -> ExitCode {
    let (config, warning) = config::load_with_override(args.flags.config_dir);
    if let Some(warning) = warning {
        eprintln!("{}", warning);
    }

    let mut collector = app::diagnostics_for(&config);
    let document = app::load_document(args.flags.page_path.as_deref(), &collector);
    let mut session = Session::start(document, &config, clock::system(), Some(collector.handle()));

    let mut status = ExitCode::SUCCESS;
    for event in &args.events {
        if let Err(err) = session.dispatch_json(event) {
            eprintln!("Ignoring event {}: {}", event, err);
            status = ExitCode::FAILURE;
        }
    }
    if !args.fetches.is_empty() && !fetch_all(&session, &args.fetches) {
        status = ExitCode::FAILURE;
    }
    session.tick();

    println!("{}", markup::render(session.manager()));
    session.shutdown();

    if args.diagnostics {
        collector.process_pending();
        match collector.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Failed to export diagnostics: {}", err);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

/// Sends a GET for every URL through the notifying middleware.
///
/// Returns `false` if any request failed.
fn fetch_all(session: &Session, urls: &[String]) -> bool {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start the async runtime: {}", err);
            return false;
        }
    };

    let client = reqwest::Client::new();
    let fetch = session.wrap_fetch(client.clone());
    let mut ok = true;
    for url in urls {
        let result = runtime.block_on(async {
            let request = client.get(url.as_str()).build()?;
            fetch.fetch(request).await
        });
        match result {
            Ok(response) => eprintln!("{} {}", response.status(), url),
            Err(err) => {
                eprintln!("Request to {} failed: {}", url, err);
                ok = false;
            }
        }
    }
    ok
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, HELP);
            return ExitCode::from(2);
        }
    };

    if args.headless {
        return run_headless(args);
    }

    match app::run(args.flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
