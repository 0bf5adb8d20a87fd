//! Language metadata for source/target selection.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for every selectable language and its metadata
//! - `direction`: Text direction derived from a language code
//!
//! # Example
//!
//! ```rust,ignore
//! use live_translate::i18n::{LanguageRegistry, TextDirection};
//!
//! let targets = LanguageRegistry::get().list_targets();
//! assert_eq!(TextDirection::for_language("ar"), TextDirection::Rtl);
//! ```

mod direction;
mod registry;

pub use direction::TextDirection;
pub use registry::{LanguageConfig, LanguageRegistry, AUTO_DETECT};
