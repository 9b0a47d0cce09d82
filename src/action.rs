use serde::{Deserialize, Serialize};

use crate::grid::Direction;
use crate::state::{
    EntityDetail, EvolutionChain, FilterOptions, ListScreen, NamedResource, SpeciesDetail,
};
use crate::theme::Theme;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    /// Joined startup fetch. Each half fails on its own with a labeled message.
    CatalogDidLoad {
        entities: Result<Vec<NamedResource>, String>,
        options: Result<FilterOptions, String>,
    },

    FavoritesDidLoad(Vec<String>),
    FavoritesDidPersist,
    FavoritesPersistDidError(String),

    ThemeDidLoad(Option<Theme>),
    ThemeToggle,
    ThemeDidPersist,
    ThemePersistDidError(String),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    TypeFilterNext,
    TypeFilterPrev,
    RegionNext,
    RegionPrev,
    FiltersClear,
    FilterDidApply {
        screen: ListScreen,
        generation: u64,
        results: Vec<NamedResource>,
    },

    ScreenToggle,
    GridMove(Direction),
    GridPage(i16),

    DetailOpen,
    DetailClose,
    DetailDidLoad {
        generation: u64,
        detail: Option<EntityDetail>,
    },
    SpeciesDidLoad {
        generation: u64,
        species: Option<SpeciesDetail>,
    },
    EvolutionDidLoad {
        generation: u64,
        chain: Option<EvolutionChain>,
    },
    EvolutionSelect(usize),
    EvolutionOpen,

    ToggleFavorite,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
