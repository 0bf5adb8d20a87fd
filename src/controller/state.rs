//! Synchronous core of the translate controller.
//!
//! `ControllerState` holds everything the user can change plus what is on
//! screen. Each user action is a transition method returning an [`Effect`]
//! for the driver to carry out; nothing here touches timers or the network.

use crate::client::{ClientError, TranslationOutcome};
use crate::i18n::{TextDirection, AUTO_DETECT};
use crate::translate::{Provider, NO_TRANSLATION_FOUND};
use serde::Serialize;
use std::mem;
use tracing::{debug, warn};

pub const SAME_LANGUAGE_ERROR: &str = "Source and target languages cannot be the same.";
pub const AUTO_TARGET_ERROR: &str = "Cannot translate into auto-detect; choose a target language.";
pub const FETCH_ERROR: &str = "Failed to fetch translation. Please try again.";

pub const DEFAULT_SOURCE_LANG: &str = AUTO_DETECT;
pub const DEFAULT_TARGET_LANG: &str = "en";
pub const DEFAULT_PROVIDER: Provider = Provider::Google;

/// Source used when the provider cannot auto-detect.
pub const FALLBACK_SOURCE_LANG: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Debouncing,
    Translating,
    Error,
}

/// The inputs a request was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: Provider,
}

/// A request issued by the controller. Ids increase monotonically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub snapshot: Snapshot,
}

/// User actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetText(String),
    SetSourceLang(String),
    SetTargetLang(String),
    SetProvider(Provider),
    SwapLanguages,
}

/// Work the driver must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Arm (or re-arm) the quiet-period timer
    Debounce,
    /// Drop any pending timer
    CancelDebounce,
    /// Drop any pending timer and send this request
    Request(Ticket),
}

/// Everything a view needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: Provider,
    pub translation: String,
    /// The provider had nothing to offer; `translation` holds a placeholder
    pub no_translation: bool,
    pub error: Option<String>,
    pub status: Status,
    pub direction: TextDirection,
}

#[derive(Debug, Clone)]
pub struct ControllerState {
    text: String,
    source_lang: String,
    target_lang: String,
    provider: Provider,
    direction: TextDirection,

    translation: String,
    no_translation: bool,
    error: Option<String>,
    status: Status,

    next_id: u64,
    in_flight: Option<Ticket>,
    /// Inputs behind the translation currently on screen
    displayed: Option<Snapshot>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, DEFAULT_PROVIDER)
    }
}

impl ControllerState {
    pub fn new(source_lang: &str, target_lang: &str, provider: Provider) -> Self {
        let mut state = Self {
            text: String::new(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            provider,
            direction: TextDirection::for_language(target_lang),
            translation: String::new(),
            no_translation: false,
            error: None,
            status: Status::Idle,
            next_id: 0,
            in_flight: None,
            displayed: None,
        };
        state.enforce_provider_source();
        state
    }

    pub fn apply(&mut self, command: Command) -> Effect {
        match command {
            Command::SetText(text) => self.set_text(text),
            Command::SetSourceLang(code) => self.set_source_lang(code),
            Command::SetTargetLang(code) => self.set_target_lang(code),
            Command::SetProvider(provider) => self.set_provider(provider),
            Command::SwapLanguages => self.swap_languages(),
        }
    }

    /// Text edits are debounced; clearing the text takes effect immediately.
    pub fn set_text(&mut self, text: String) -> Effect {
        self.text = text;

        if self.text.trim().is_empty() {
            self.clear_output();
            self.status = Status::Idle;
            return Effect::CancelDebounce;
        }

        self.status = Status::Debouncing;
        Effect::Debounce
    }

    /// Auto-detect is replaced by the fallback source when the provider lacks it.
    pub fn set_source_lang(&mut self, code: String) -> Effect {
        self.source_lang = code;
        self.enforce_provider_source();
        self.retranslate()
    }

    pub fn set_target_lang(&mut self, code: String) -> Effect {
        self.target_lang = code;
        self.direction = TextDirection::for_language(&self.target_lang);
        self.retranslate()
    }

    /// Switching to a provider without auto-detection pins the source in the
    /// same transition, so only one request goes out.
    pub fn set_provider(&mut self, provider: Provider) -> Effect {
        self.provider = provider;
        self.enforce_provider_source();
        self.retranslate()
    }

    pub fn swap_languages(&mut self) -> Effect {
        mem::swap(&mut self.source_lang, &mut self.target_lang);
        self.direction = TextDirection::for_language(&self.target_lang);
        self.enforce_provider_source();
        self.retranslate()
    }

    /// The quiet period after the last keystroke has elapsed.
    pub fn debounce_elapsed(&mut self) -> Effect {
        self.translate()
    }

    /// Attempt a translation of the current inputs.
    ///
    /// Issues at most one request, and none when the same inputs are already
    /// on screen or already in flight.
    pub fn translate(&mut self) -> Effect {
        if self.text.trim().is_empty() {
            self.clear_output();
            self.status = Status::Idle;
            return Effect::CancelDebounce;
        }

        if self.target_lang == AUTO_DETECT {
            self.fail_validation(AUTO_TARGET_ERROR);
            return Effect::CancelDebounce;
        }

        if self.source_lang == self.target_lang {
            self.fail_validation(SAME_LANGUAGE_ERROR);
            return Effect::CancelDebounce;
        }

        let snapshot = self.snapshot();

        if self.displayed.as_ref() == Some(&snapshot) {
            self.status = Status::Idle;
            return Effect::CancelDebounce;
        }

        if self
            .in_flight
            .as_ref()
            .is_some_and(|ticket| ticket.snapshot == snapshot)
        {
            self.status = Status::Translating;
            return Effect::CancelDebounce;
        }

        self.next_id += 1;
        let ticket = Ticket {
            id: self.next_id,
            snapshot,
        };

        self.in_flight = Some(ticket.clone());
        self.error = None;
        self.status = Status::Translating;

        Effect::Request(ticket)
    }

    /// Apply a finished request. Returns `false` when the response was for
    /// inputs that are no longer current and was discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<TranslationOutcome, ClientError>,
    ) -> bool {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|pending| pending.id == ticket.id)
        {
            self.in_flight = None;
        }

        if ticket.snapshot != self.snapshot() {
            debug!("Discarding stale translation for request {}", ticket.id);
            return false;
        }

        match result {
            Ok(TranslationOutcome::Translated(text)) => {
                self.translation = text;
                self.no_translation = false;
                self.error = None;
                self.displayed = Some(ticket.snapshot);
                self.settle(Status::Idle);
            }
            Ok(TranslationOutcome::NoTranslationAvailable) => {
                self.translation = NO_TRANSLATION_FOUND.to_string();
                self.no_translation = true;
                self.error = None;
                self.displayed = Some(ticket.snapshot);
                self.settle(Status::Idle);
            }
            Err(e) => {
                warn!("Translation request {} failed: {}", ticket.id, e);
                self.translation.clear();
                self.no_translation = false;
                self.error = Some(FETCH_ERROR.to_string());
                self.displayed = None;
                self.settle(Status::Error);
            }
        }

        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            provider: self.provider,
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            text: self.text.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            provider: self.provider,
            translation: self.translation.clone(),
            no_translation: self.no_translation,
            error: self.error.clone(),
            status: self.status,
            direction: self.direction,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    /// Config changes re-translate right away, but only when there is text.
    fn retranslate(&mut self) -> Effect {
        if self.text.trim().is_empty() {
            return Effect::None;
        }
        self.translate()
    }

    fn enforce_provider_source(&mut self) {
        if !self.provider.supports_auto_detect() && self.source_lang == AUTO_DETECT {
            self.source_lang = FALLBACK_SOURCE_LANG.to_string();
        }
    }

    fn fail_validation(&mut self, message: &str) {
        self.translation.clear();
        self.no_translation = false;
        self.error = Some(message.to_string());
        self.displayed = None;
        self.status = Status::Error;
    }

    fn clear_output(&mut self) {
        self.translation.clear();
        self.no_translation = false;
        self.error = None;
        self.displayed = None;
    }

    /// A pending debounce keeps the controller in `Debouncing`.
    fn settle(&mut self, status: Status) {
        if self.status != Status::Debouncing {
            self.status = status;
        }
    }
}
