use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::detail::{DetailSession, DetailStatus};
use crate::favorites::FavoritesStore;
use crate::grid::{self, GridMetrics, CELL_HEIGHT};
use crate::theme::Theme;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteRefs {
    pub front_default: Option<String>,
    pub official_artwork: Option<String>,
    pub home: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityStat {
    pub name: String,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityAbility {
    pub name: String,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub sprites: SpriteRefs,
    pub stats: Vec<EntityStat>,
    pub types: Vec<String>,
    pub abilities: Vec<EntityAbility>,
    pub species: Option<NamedResource>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    pub language: String,
    pub version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub name: String,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub habitat: Option<String>,
    pub flavor_text_entries: Vec<LocalizedText>,
    pub genera: Vec<LocalizedText>,
    pub capture_rate: Option<u32>,
    pub base_happiness: Option<u32>,
    pub growth_rate: Option<String>,
    pub evolution_chain_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeMembership {
    pub name: String,
    pub members: Vec<NamedResource>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionDetail {
    pub name: String,
    pub pokedexes: Vec<NamedResource>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokedexEntry {
    pub entry_number: u32,
    pub species: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokedexDetail {
    pub name: String,
    pub entries: Vec<PokedexEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListScreen {
    Catalog,
    Favorites,
}

impl ListScreen {
    pub fn other(self) -> Self {
        match self {
            ListScreen::Catalog => ListScreen::Favorites,
            ListScreen::Favorites => ListScreen::Catalog,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ListScreen::Catalog => "Catalog",
            ListScreen::Favorites => "Favorites",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    List(ListScreen),
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Filter inputs and the last applied result for one grid screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub search: SearchState,
    pub type_filter: Option<String>,
    pub region_filter: Option<String>,
    pub results: Vec<NamedResource>,
    /// Latest issued filter pass; older completions are dropped.
    pub generation: u64,
    pub applying: bool,
    pub selected: usize,
}

impl ListView {
    pub fn selected_entry(&self) -> Option<&NamedResource> {
        self.results.get(self.selected)
    }

    pub fn has_filters(&self) -> bool {
        !self.search.query.is_empty() || self.type_filter.is_some() || self.region_filter.is_some()
    }

    pub fn clamp_selection(&mut self) {
        if self.selected >= self.results.len() {
            self.selected = self.results.len().saturating_sub(1);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub types: Vec<NamedResource>,
    pub regions: Vec<NamedResource>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub screen: Screen,
    /// Grid screen the detail view returns to.
    pub origin: ListScreen,
    pub catalog: ListView,
    pub favorites_view: ListView,
    pub entities: DataResource<Vec<NamedResource>>,
    /// Type and region lists the selectors cycle through.
    pub options: DataResource<FilterOptions>,
    pub favorites: FavoritesStore,
    pub theme: Theme,
    pub detail: Option<DetailSession>,
    pub detail_generation: u64,
    pub message: Option<String>,
    /// Last failed save; shown in the debug overlay only.
    pub persist_error: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            screen: Screen::List(ListScreen::Catalog),
            origin: ListScreen::Catalog,
            catalog: ListView::default(),
            favorites_view: ListView::default(),
            entities: DataResource::Empty,
            options: DataResource::Empty,
            favorites: FavoritesStore::default(),
            theme: Theme::default(),
            detail: None,
            detail_generation: 0,
            message: None,
            persist_error: None,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn view(&self, screen: ListScreen) -> &ListView {
        match screen {
            ListScreen::Catalog => &self.catalog,
            ListScreen::Favorites => &self.favorites_view,
        }
    }

    pub fn view_mut(&mut self, screen: ListScreen) -> &mut ListView {
        match screen {
            ListScreen::Catalog => &mut self.catalog,
            ListScreen::Favorites => &mut self.favorites_view,
        }
    }

    /// The grid screen currently shown, if any.
    pub fn active_list(&self) -> Option<ListScreen> {
        match self.screen {
            Screen::List(screen) => Some(screen),
            Screen::Detail => None,
        }
    }

    pub fn search_active(&self) -> bool {
        self.active_list()
            .map(|screen| self.view(screen).search.active)
            .unwrap_or(false)
    }

    /// Filter passes wait for both selector lists, whichever screen they run on.
    pub fn options_loaded(&self) -> bool {
        self.options.is_loaded()
    }

    pub fn type_options(&self) -> &[NamedResource] {
        self.options.data().map(|options| options.types.as_slice()).unwrap_or(&[])
    }

    pub fn region_options(&self) -> &[NamedResource] {
        self.options.data().map(|options| options.regions.as_slice()).unwrap_or(&[])
    }

    pub fn current_detail(&self) -> Option<&DetailSession> {
        self.detail.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.entities.is_loading()
            || self.options.is_loading()
            || self.catalog.applying
            || self.favorites_view.applying
            || self.detail.as_ref().is_some_and(|session| {
                session.status == DetailStatus::Loading
                    || session.species_loading
                    || session.evolution_loading
            })
    }

    /// Records the viewport size. Returns `false` when it is unchanged.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if self.terminal_size == (width, height) {
            return false;
        }
        self.terminal_size = (width, height);
        true
    }

    /// Columns of the grid panel: terminal width inside the panel border.
    pub fn grid_columns(&self) -> usize {
        grid::column_count(self.terminal_size.0.saturating_sub(2), GridMetrics::TERMINAL)
    }

    /// Whole cell rows that fit below the header and above the footer.
    pub fn grid_visible_rows(&self) -> usize {
        let body = self.terminal_size.1.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 2);
        ((body / CELL_HEIGHT) as usize).max(1)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("screen", ron_string(&self.screen))
                .entry(
                    "entities",
                    ron_string(&self.entities.data().map(|list| list.len())),
                )
                .entry("types", ron_string(&self.type_options().len()))
                .entry("regions", ron_string(&self.region_options().len()))
                .entry("results", ron_string(&self.catalog.results.len()))
                .entry("generation", ron_string(&self.catalog.generation))
                .entry("selected", ron_string(&self.catalog.selected)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.catalog.search.query))
                .entry("type", ron_string(&self.catalog.type_filter))
                .entry("region", ron_string(&self.catalog.region_filter))
                .entry("fav_search", ron_string(&self.favorites_view.search.query))
                .entry("fav_type", ron_string(&self.favorites_view.type_filter))
                .entry("fav_region", ron_string(&self.favorites_view.region_filter)),
            DebugSection::new("Favorites")
                .entry("status", ron_string(&self.favorites.status()))
                .entry("count", ron_string(&self.favorites.len()))
                .entry("results", ron_string(&self.favorites_view.results.len())),
            DebugSection::new("Status")
                .entry(
                    "detail",
                    ron_string(&self.detail.as_ref().map(|session| session.name.clone())),
                )
                .entry("detail_generation", ron_string(&self.detail_generation))
                .entry("theme", ron_string(&self.theme))
                .entry("message", ron_string(&self.message))
                .entry("persist_error", ron_string(&self.persist_error)),
        ]
    }
}
