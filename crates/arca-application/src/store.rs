//! AppStore - the reactive state shared by every UI consumer.
//!
//! The store owns one [`Container`] per piece of UI state and two
//! orchestration actions that refresh them from a [`LibraryBackend`]:
//! [`AppStore::load_all`] (all-or-nothing) and [`AppStore::sync_notes`]
//! (best-effort). Refresh failures are logged and reported through
//! [`RefreshOutcome`] instead of being returned as errors.

use crate::container::Container;
use arca_core::assistant::BackendMessage;
use arca_core::config::ArcaConfig;
use arca_core::library::{DigitalBook, LibraryBackend, PhysicalBook};
use arca_core::note::{NewNote, Note};
use arca_core::preference::{PreferenceKey, PreferenceStore};
use arca_core::ui::{OpenDocument, Tab, Theme};
use arca_core::{ArcaError, Result};
use arca_infrastructure::FilePreferenceStore;
use arca_interaction::ArcaApiClient;
use futures::future::join3;
use std::sync::{Arc, Mutex};

/// Result of a refresh action whose failure is swallowed.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// Fresh data replaced the affected containers.
    Applied,
    /// The refresh failed and the containers kept their prior values.
    Skipped(ArcaError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn error(&self) -> Option<&ArcaError> {
        match self {
            Self::Applied => None,
            Self::Skipped(e) => Some(e),
        }
    }
}

/// Process-wide UI state, passed explicitly to consumers.
pub struct AppStore {
    backend: Arc<dyn LibraryBackend>,
    preferences: Arc<dyn PreferenceStore>,
    theme: Container<Theme>,
    user: Container<Option<String>>,
    account: Container<Option<String>>,
    active_tab: Container<Tab>,
    library: Container<Vec<DigitalBook>>,
    physical_books: Container<Vec<PhysicalBook>>,
    notes: Container<Vec<Note>>,
    open_document: Container<Option<OpenDocument>>,
    loading: Container<bool>,
    in_flight: Mutex<usize>,
}

impl AppStore {
    /// Creates a store with empty collections, restoring the theme and
    /// display name from `preferences`.
    pub fn new(backend: Arc<dyn LibraryBackend>, preferences: Arc<dyn PreferenceStore>) -> Self {
        let theme = read_preference(preferences.as_ref(), PreferenceKey::Theme)
            .map(|value| Theme::from_persisted(&value))
            .unwrap_or_default();
        let user = read_preference(preferences.as_ref(), PreferenceKey::DisplayName)
            .filter(|name| !name.trim().is_empty());

        Self {
            backend,
            preferences,
            theme: Container::new(theme),
            user: Container::new(user),
            account: Container::default(),
            active_tab: Container::default(),
            library: Container::default(),
            physical_books: Container::default(),
            notes: Container::default(),
            open_document: Container::default(),
            loading: Container::new(false),
            in_flight: Mutex::new(0),
        }
    }

    /// Builds a store backed by the HTTP client and the preference file.
    pub fn from_config(config: &ArcaConfig) -> Result<Self> {
        let backend = ArcaApiClient::from_config(config);
        let preferences = FilePreferenceStore::new()?;
        Ok(Self::new(Arc::new(backend), Arc::new(preferences)))
    }

    pub fn theme(&self) -> &Container<Theme> {
        &self.theme
    }

    /// Display name of the active user, if any.
    pub fn user(&self) -> &Container<Option<String>> {
        &self.user
    }

    /// Backend account id that owns the notes; `None` means legacy notes.
    pub fn account(&self) -> &Container<Option<String>> {
        &self.account
    }

    pub fn active_tab(&self) -> &Container<Tab> {
        &self.active_tab
    }

    /// Digital library listing.
    pub fn library(&self) -> &Container<Vec<DigitalBook>> {
        &self.library
    }

    pub fn physical_books(&self) -> &Container<Vec<PhysicalBook>> {
        &self.physical_books
    }

    pub fn notes(&self) -> &Container<Vec<Note>> {
        &self.notes
    }

    pub fn open_document(&self) -> &Container<Option<OpenDocument>> {
        &self.open_document
    }

    /// True while any [`load_all`](Self::load_all) is in flight.
    pub fn loading(&self) -> &Container<bool> {
        &self.loading
    }

    // ============================================================================
    // Orchestration
    // ============================================================================

    /// Fetches the three listings concurrently and replaces all of them, or
    /// none if any fetch fails.
    pub async fn load_all(&self) -> RefreshOutcome {
        let _loading = LoadingGuard::begin(self);
        let owner = self.account.get();

        let (library, physical, notes) = join3(
            self.backend.list_digital_books(),
            self.backend.list_physical_books(),
            self.backend.list_notes(owner.as_deref()),
        )
        .await;

        match (library, physical, notes) {
            (Ok(library), Ok(physical), Ok(notes)) => {
                tracing::debug!(
                    books = library.len(),
                    physical = physical.len(),
                    notes = notes.len(),
                    "Library loaded"
                );
                self.library.set(library);
                self.physical_books.set(physical);
                self.notes.set(notes);
                RefreshOutcome::Applied
            }
            (library, physical, notes) => {
                // First failure in fetch order; the others are only logged.
                let mut failures = [library.err(), physical.err(), notes.err()]
                    .into_iter()
                    .flatten();
                let first = failures.next().unwrap_or_else(|| {
                    ArcaError::unexpected_response("library load failed without an error")
                });
                tracing::error!("Error cargando datos: {}", first);
                for other in failures {
                    tracing::error!("Error cargando datos: {}", other);
                }
                RefreshOutcome::Skipped(first)
            }
        }
    }

    /// Re-fetches the notes listing, keeping the prior value on failure.
    pub async fn sync_notes(&self) -> RefreshOutcome {
        let owner = self.account.get();
        match self.backend.list_notes(owner.as_deref()).await {
            Ok(notes) => {
                tracing::debug!(notes = notes.len(), "Notes synchronized");
                self.notes.set(notes);
                RefreshOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Error sincronizando notas: {}", e);
                RefreshOutcome::Skipped(e)
            }
        }
    }

    // ============================================================================
    // Note mutations
    // ============================================================================

    /// Creates a note under the current account, then refreshes the notes
    /// listing.
    pub async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let owner = self.account.get();
        let created = self.backend.create_note(owner.as_deref(), note).await?;
        self.sync_notes().await;
        Ok(created)
    }

    pub async fn update_note(&self, id: i64, note: &NewNote) -> Result<Note> {
        let owner = self.account.get();
        let updated = self.backend.update_note(owner.as_deref(), id, note).await?;
        self.sync_notes().await;
        Ok(updated)
    }

    pub async fn delete_note(&self, id: i64) -> Result<BackendMessage> {
        let owner = self.account.get();
        let message = self.backend.delete_note(owner.as_deref(), id).await?;
        self.sync_notes().await;
        Ok(message)
    }

    // ============================================================================
    // UI state
    // ============================================================================

    /// Persists and applies a theme. Nothing changes if persisting fails.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.preferences.set(PreferenceKey::Theme, theme.as_ref())?;
        self.theme.set(theme);
        Ok(())
    }

    /// Persists and applies the display name; `None` or a blank name clears it.
    pub fn set_user(&self, name: Option<&str>) -> Result<()> {
        match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => {
                self.preferences.set(PreferenceKey::DisplayName, name)?;
                self.user.set(Some(name.to_string()));
            }
            None => {
                self.preferences.remove(PreferenceKey::DisplayName)?;
                self.user.set(None);
            }
        }
        Ok(())
    }

    /// Switches the account whose notes the store reads and writes. Not
    /// persisted; a blank id selects legacy notes.
    pub fn set_account(&self, account: Option<&str>) {
        let account = account
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        self.account.set(account);
    }

    pub fn set_active_tab(&self, tab: Tab) {
        self.active_tab.set(tab);
    }

    /// Opens a digital book in the reader.
    pub fn open_document(&self, book: &DigitalBook) {
        tracing::debug!(book_id = book.id, "Opening document");
        self.open_document.set(Some(book.to_open_document()));
    }

    pub fn close_document(&self) {
        self.open_document.set(None);
    }

    fn enter_loading(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight += 1;
        if *in_flight == 1 {
            self.loading.set(true);
        }
    }

    fn leave_loading(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.loading.set(false);
        }
    }
}

/// Keeps `loading` true until dropped, on every exit path.
struct LoadingGuard<'a> {
    store: &'a AppStore,
}

impl<'a> LoadingGuard<'a> {
    fn begin(store: &'a AppStore) -> Self {
        store.enter_loading();
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.leave_loading();
    }
}

fn read_preference(preferences: &dyn PreferenceStore, key: PreferenceKey) -> Option<String> {
    match preferences.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Could not read preference {}: {}", key, e);
            None
        }
    }
}
