//! Interactive terminal front end for the translate controller
//!
//! Usage:
//!   cargo run --bin translate-cli
//!
//! Type text to translate it. Commands:
//!   :from <code>       set source language (or "auto")
//!   :to <code>         set target language
//!   :provider <name>   mymemory | google | lingva | deepl
//!   :swap              swap source and target
//!   :clear             clear the input
//!   :langs             list available languages
//!   :quit              exit
//!
//! Optional environment variables:
//! - BACKEND_URL (defaults to http://localhost:5000)
//! - DEBOUNCE_MS (defaults to 800)
//! - REQUEST_TIMEOUT_SECS (defaults to 20)

use anyhow::Result;
use live_translate::client::ProxyClient;
use live_translate::config::ClientConfig;
use live_translate::controller::{Status, TranslateController, ViewState};
use live_translate::i18n::{LanguageRegistry, AUTO_DETECT};
use live_translate::translate::Provider;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Text(String),
    From(String),
    To(String),
    Provider(Provider),
    Swap,
    Clear,
    Langs,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Text(line.to_string()));
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let require_arg = |usage: &str| {
        if arg.is_empty() {
            Err(format!("Usage: {}", usage))
        } else {
            Ok(arg.to_string())
        }
    };

    match name {
        "from" => require_arg(":from <code>").map(Input::From),
        "to" => require_arg(":to <code>").map(Input::To),
        "provider" => {
            let value = require_arg(":provider <name>")?;
            value
                .parse::<Provider>()
                .map(Input::Provider)
                .map_err(|e| e.to_string())
        }
        "swap" => Ok(Input::Swap),
        "clear" => Ok(Input::Clear),
        "langs" => Ok(Input::Langs),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(format!("Unknown command ':{}'", other)),
    }
}

/// Reject codes the registry does not know, and auto-detect for providers without it.
fn check_source(code: &str, provider: Provider) -> Result<(), String> {
    if !LanguageRegistry::get().is_valid_source(code) {
        return Err(format!("Unknown source language '{}' (see :langs)", code));
    }
    if code == AUTO_DETECT && !provider.supports_auto_detect() {
        return Err(format!(
            "Auto-detect is not available with {}",
            provider.label()
        ));
    }
    Ok(())
}

fn check_target(code: &str) -> Result<(), String> {
    if LanguageRegistry::get().is_valid_target(code) {
        Ok(())
    } else {
        Err(format!("Unknown target language '{}' (see :langs)", code))
    }
}

fn print_languages() {
    let registry = LanguageRegistry::get();
    for lang in registry.list_sources() {
        let rtl = if lang.rtl { "  [RTL]" } else { "" };
        println!(
            "  {} {:<6} {} ({}){}",
            lang.flag, lang.code, lang.name, lang.native_name, rtl
        );
    }
}

fn render(view: &ViewState) -> String {
    let header = format!(
        "[{} {} -> {} | {}]",
        view.provider.label(),
        view.source_lang,
        view.target_lang,
        view.direction
    );

    match view.status {
        Status::Debouncing => format!("{} ...", header),
        Status::Translating => format!("{} translating", header),
        Status::Error => format!(
            "{} error: {}",
            header,
            view.error.as_deref().unwrap_or_default()
        ),
        Status::Idle if view.no_translation => format!("{} ({})", header, view.translation),
        Status::Idle if view.translation.is_empty() => header,
        Status::Idle => format!("{} {}", header, view.translation),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("live_translate=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    info!("Using translation proxy at {}", config.backend_url);

    let client = ProxyClient::new(&config.backend_url, config.request_timeout())?;
    let controller = TranslateController::spawn(client, config.debounce());

    // Print every view change
    let mut views = controller.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            println!("{}", render(&view));
        }
    });

    println!("{}", render(&controller.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        let current = controller.view();
        let sent = match input {
            Input::Text(text) => controller.set_text(text),
            Input::Clear => controller.set_text(""),
            Input::From(code) => match check_source(&code, current.provider) {
                Ok(()) => controller.set_source_lang(code),
                Err(message) => {
                    eprintln!("{}", message);
                    continue;
                }
            },
            Input::To(code) => match check_target(&code) {
                Ok(()) => controller.set_target_lang(code),
                Err(message) => {
                    eprintln!("{}", message);
                    continue;
                }
            },
            Input::Provider(provider) => controller.set_provider(provider),
            Input::Swap => controller.swap_languages(),
            Input::Langs => {
                print_languages();
                continue;
            }
            Input::Quit => break,
        };
        sent?;
    }

    controller.shutdown().await;
    printer.abort();
    Ok(())
}
