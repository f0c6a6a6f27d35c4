//! Translator overlay
//!
//! Wraps one piece of literal display text. The source text is shown right
//! away; when the target language is not the default one, a translation is
//! fetched in the background and swapped in once it arrives, after the
//! language's correction rules have been applied.
//!
//! Every call to [`TranslatorOverlay::show`] starts a new generation. A
//! fetch only updates the display if its generation is still current and the
//! overlay is still mounted, so a slow answer for old inputs can never
//! replace the text for newer ones.
//!
//! Failures are logged and otherwise invisible: the source text simply stays.
//!
//! # Example
//!
//! ```ignore
//! let overlay = TranslatorOverlay::new(gateway, Arc::new(CorrectionPipeline::marathi()));
//! overlay.show("Explore Maharashtra", "mr");
//! assert_eq!(overlay.shown(), "Explore Maharashtra");
//! // ... later
//! assert_eq!(overlay.shown(), "महाराष्ट्राचा शोध घ्या");
//! ```

use crate::error::MtResult;
use crate::gateway::TranslationGateway;
use async_trait::async_trait;
use explore_i18n::{CorrectionPipeline, LanguageStore, is_default_language};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Anything the overlay can ask for a translation
#[async_trait]
pub trait TranslationSource: Send + Sync {
    async fn fetch_translation(&self, text: &str, target_language: &str) -> MtResult<String>;
}

#[async_trait]
impl TranslationSource for TranslationGateway {
    async fn fetch_translation(&self, text: &str, target_language: &str) -> MtResult<String> {
        self.translate(text, target_language).await
    }
}

/// What one overlay currently displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTextState {
    pub original_text: String,
    pub currently_shown_text: String,
}

impl DisplayTextState {
    pub fn new(text: &str) -> Self {
        Self {
            original_text: text.to_string(),
            currently_shown_text: text.to_string(),
        }
    }

    pub fn is_translated(&self) -> bool {
        self.currently_shown_text != self.original_text
    }
}

/// Swaps literal text for its translation without blocking
///
/// Clones are handles to the same overlay; dropping the last one unmounts
/// it. Must be used from within a tokio runtime; outside one, fetches are
/// skipped and the source text stays.
#[derive(Clone)]
pub struct TranslatorOverlay {
    inner: Arc<OverlayInner>,
    _guard: Arc<MountGuard>,
}

struct OverlayInner {
    source: Arc<dyn TranslationSource>,
    pipeline: Arc<CorrectionPipeline>,
    display: watch::Sender<DisplayTextState>,
    generation: AtomicU64,
    mounted: AtomicBool,
    follower: Mutex<Option<JoinHandle<()>>>,
}

/// Owned only by user handles, never by background tasks
struct MountGuard(Arc<OverlayInner>);

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.0.unmount();
    }
}

impl TranslatorOverlay {
    pub fn new(source: Arc<dyn TranslationSource>, pipeline: Arc<CorrectionPipeline>) -> Self {
        let (display, _) = watch::channel(DisplayTextState::new(""));
        let inner = Arc::new(OverlayInner {
            source,
            pipeline,
            display,
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
            follower: Mutex::new(None),
        });
        Self {
            _guard: Arc::new(MountGuard(Arc::clone(&inner))),
            inner,
        }
    }

    /// Display `text`, translated into `target_language` once available
    pub fn show(&self, text: &str, target_language: &str) {
        self.inner.show(text, target_language);
    }

    /// Text displayed right now
    pub fn shown(&self) -> String {
        self.inner.display.borrow().currently_shown_text.clone()
    }

    /// Source text of the current inputs
    pub fn original(&self) -> String {
        self.inner.original()
    }

    pub fn state(&self) -> DisplayTextState {
        self.inner.display.borrow().clone()
    }

    /// Observe display changes
    pub fn subscribe(&self) -> watch::Receiver<DisplayTextState> {
        self.inner.display.subscribe()
    }

    /// Re-translate the current text whenever `store` changes language
    ///
    /// Also shows the current text in the store's current language right away.
    /// The follower stops once the overlay is unmounted or dropped.
    pub fn follow(&self, store: &LanguageStore) {
        let mut changes = store.subscribe();
        self.show(&self.original(), &store.current());

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, not following language changes");
            return;
        };

        let overlay = Arc::downgrade(&self.inner);
        let task = handle.spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(overlay) = overlay.upgrade() else {
                    break;
                };
                if !overlay.is_mounted() {
                    break;
                }
                let language = changes.borrow_and_update().clone();
                overlay.show(&overlay.original(), &language);
            }
        });

        let mut follower = self.inner.follower.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = follower.replace(task) {
            previous.abort();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    /// Stop displaying: in-flight fetches are ignored, language changes too
    pub fn unmount(&self) {
        self.inner.unmount();
    }
}

impl OverlayInner {
    fn show(self: &Arc<Self>, text: &str, target_language: &str) {
        if !self.is_mounted() {
            return;
        }

        // Bumped under the display lock so a resolving fetch sees either the
        // old inputs and old generation, or the new ones.
        let mut generation = 0;
        self.display.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = DisplayTextState::new(text);
        });

        if text.trim().is_empty() || is_default_language(target_language) {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No async runtime, leaving '{}' untranslated", text);
                return;
            }
        };

        let overlay = Arc::clone(self);
        let text = text.to_string();
        let target_language = target_language.to_string();

        handle.spawn(async move {
            let translated = match overlay.source.fetch_translation(&text, &target_language).await
            {
                Ok(translated) if !translated.is_empty() => translated,
                Ok(_) => text.clone(),
                Err(e) => {
                    error!("Translation error for '{}' ({}): {}", text, target_language, e);
                    return;
                }
            };
            let corrected = overlay.pipeline.apply(&target_language, &translated);

            let applied = overlay.display.send_if_modified(|state| {
                if !overlay.is_mounted() || overlay.generation.load(Ordering::SeqCst) != generation
                {
                    return false;
                }
                state.currently_shown_text = corrected;
                true
            });
            if !applied {
                debug!("Discarding stale translation of '{}' ({})", text, target_language);
            }
        });
    }

    fn original(&self) -> String {
        self.display.borrow().original_text.clone()
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        let mut follower = self.follower.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = follower.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TranslatorOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorOverlay")
            .field("state", &*self.inner.display.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
