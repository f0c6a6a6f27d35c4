//! Runtime translation for the Explore Maharashtra portal
//!
//! Pages are written in English. When a visitor picks another language, each
//! piece of text is wrapped in a [`TranslatorOverlay`] which asks the
//! [`TranslationGateway`] for a translation and swaps it in when it arrives.
//!
//! # Workflow Example
//!
//! ```ignore
//! use explore_i18n::{CorrectionPipeline, LanguageStore};
//! use explore_i18n_mt::{GatewayConfig, TranslationGateway, TranslatorOverlay};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Gateway: MyMemory first, LibreTranslate as fallback, cached
//!     let gateway = Arc::new(TranslationGateway::from_config(GatewayConfig::from_env()?)?);
//!
//!     // 2. Overlay around one literal, following the visitor's language
//!     let store = LanguageStore::persistent("lang.json");
//!     let overlay = TranslatorOverlay::new(gateway, Arc::new(CorrectionPipeline::marathi()));
//!     overlay.show("Explore Maharashtra", &store.current());
//!     overlay.follow(&store);
//!
//!     // 3. Switching language re-translates in the background
//!     store.set_language("mr")?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod libretranslate;
pub mod mock;
pub mod mymemory;
pub mod overlay;
pub mod translator;

#[cfg(test)]
mod test_support;

// Re-export main types for convenient access
pub use api::{ErrorResponse, TRANSLATE_PATH, TranslateRequest, TranslateResponse, UsageResponse};
pub use cache::{CacheKey, TranslationCache};
pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::{MtError, MtResult};
pub use gateway::{BOTH_SERVICES_FAILED, MISSING_PARAMETERS, TranslationGateway};
pub use libretranslate::LibreTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use mymemory::MyMemoryProvider;
pub use overlay::{DisplayTextState, TranslationSource, TranslatorOverlay};
pub use translator::MachineTranslator;
