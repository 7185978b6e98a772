//! In-memory copy of the command list with local search and pagination.
//!
//! The server always returns the full list; everything the user sees is
//! derived here from that copy, and mutations are mirrored locally once the
//! server has acknowledged them.

use std::ops::Range;

use utils::command::CommandSummary;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Queries shorter than this (in characters) do not filter at all.
pub const DEFAULT_MIN_SEARCH: usize = 3;

/// Commands whose description or command text contains `query`, ignoring
/// case. A query shorter than `min_search` matches everything.
pub fn filter_commands(
    commands: &[CommandSummary],
    query: &str,
    min_search: usize,
) -> Vec<CommandSummary> {
    if query.chars().count() < min_search {
        return commands.to_vec();
    }

    let needle = query.to_lowercase();
    commands
        .iter()
        .filter(|c| {
            c.description.to_lowercase().contains(&needle)
                || c.command.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Number of pages for `len` items. An empty list still has one (empty) page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Index range of the 1-based `page`, clamped to `len`.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[derive(Debug, Clone)]
pub struct CommandCache {
    all: Vec<CommandSummary>,
    filtered: Vec<CommandSummary>,
    query: String,
    page: usize,
    page_size: usize,
    min_search: usize,
}

impl Default for CommandCache {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MIN_SEARCH)
    }
}

impl CommandCache {
    pub fn new(page_size: usize, min_search: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            min_search,
        }
    }

    /// Replace the whole list, as after a fresh load.
    pub fn loaded(&mut self, commands: Vec<CommandSummary>) {
        self.all = commands;
        self.refresh();
    }

    /// Change the search text. Always goes back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
        self.filtered = filter_commands(&self.all, &self.query, self.min_search);
    }

    /// Move to `page`. Out-of-range pages are ignored; returns whether the
    /// page was accepted.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    /// New commands go first, without re-sorting the rest.
    pub fn created(&mut self, command: CommandSummary) {
        self.all.insert(0, command);
        self.refresh();
    }

    /// Replace the command with the same id in place. Returns false when the
    /// cache does not know it.
    pub fn updated(&mut self, command: CommandSummary) -> bool {
        let Some(slot) = self.all.iter_mut().find(|c| c.id == command.id) else {
            return false;
        };
        *slot = command;
        self.refresh();
        true
    }

    pub fn deleted(&mut self, id: i64) -> bool {
        let before = self.all.len();
        self.all.retain(|c| c.id != id);
        let removed = self.all.len() != before;
        self.refresh();
        removed
    }

    pub fn find(&self, id: i64) -> Option<&CommandSummary> {
        self.all.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[CommandSummary] {
        &self.all
    }

    pub fn filtered(&self) -> &[CommandSummary] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// Commands on the current page.
    pub fn visible(&self) -> &[CommandSummary] {
        &self.filtered[page_bounds(self.filtered.len(), self.page, self.page_size)]
    }

    /// "21-40 sur 45"; empty when nothing matches.
    pub fn results_info(&self) -> String {
        let range = page_bounds(self.filtered.len(), self.page, self.page_size);
        if range.is_empty() {
            return String::new();
        }
        format!("{}-{} sur {}", range.start + 1, range.end, self.filtered.len())
    }

    /// "1 commande", "12 commandes"
    pub fn total_label(&self) -> String {
        let count = self.all.len();
        format!("{count} commande{}", if count > 1 { "s" } else { "" })
    }

    // Recompute the filtered view with the current query and keep the page
    // inside the new bounds.
    fn refresh(&mut self) {
        self.filtered = filter_commands(&self.all, &self.query, self.min_search);
        self.page = self.page.clamp(1, self.total_pages());
    }
}
