// Session state
// Owns the load lifecycle and the user's source selection; the host
// application holds one of these and passes every engine call through it

use crate::corpus::Corpus;
use crate::search::Engine;
use crate::types::{ResultRecord, SearchError, SearchMode};
use crate::variants::VariantTable;
use rustc_hash::FxHashSet;

/// Where the corpus load currently stands
///
/// `Loading` → `Ready` on success, `Loading` → `Failed` on any fetch or
/// shape error. Both transitions are final: there is no reload path, the
/// host restarts the process to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

/// Host-owned session: load phase, engine and selected sources
///
/// Searches fail fast with [`SearchError::NotReady`] until the corpus is
/// installed. The selection defaults to every inventory title at install
/// time and is only mutated between searches.
pub struct Session {
    phase: LoadPhase,
    engine: Option<Engine>,
    selected: FxHashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            engine: None,
            selected: FxHashSet::default(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    /// Install a fully-loaded corpus and move to `Ready`.
    ///
    /// Selection starts as "all sources".
    pub fn install(&mut self, corpus: Corpus, variants: VariantTable) {
        let engine = Engine::new(corpus, variants);
        self.selected = engine
            .inventory()
            .titles()
            .map(str::to_string)
            .collect();
        self.engine = Some(engine);
        self.phase = LoadPhase::Ready;
        tracing::info!(sources = self.selected.len(), "corpus installed");
    }

    /// Record a failed load; the session stays unusable.
    pub fn mark_failed(&mut self) {
        self.phase = LoadPhase::Failed;
        self.engine = None;
        self.selected.clear();
    }

    /// Engine access for callers that want the inventory or the class
    /// expansion before committing to a search.
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn selected_sources(&self) -> &FxHashSet<String> {
        &self.selected
    }

    pub fn select_source(&mut self, title: &str) {
        self.selected.insert(title.to_string());
    }

    pub fn deselect_source(&mut self, title: &str) {
        self.selected.remove(title);
    }

    /// Replace the whole selection, e.g. from a set of checked boxes.
    pub fn set_selected_sources<I>(&mut self, titles: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected = titles.into_iter().collect();
    }

    pub fn select_all(&mut self) {
        if let Some(engine) = &self.engine {
            self.selected = engine.inventory().titles().map(str::to_string).collect();
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Run one search against the installed engine with the current
    /// selection.
    pub fn search(
        &self,
        query: &str,
        mode: SearchMode,
        expand_variants: bool,
    ) -> Result<Vec<ResultRecord>, SearchError> {
        let engine = self.engine.as_ref().ok_or(SearchError::NotReady)?;
        engine.search(query, mode, expand_variants, &self.selected)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
