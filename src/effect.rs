use crate::filter::{FilterQuery, ResultOrder};
use crate::state::{ListScreen, NamedResource};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog,
    LoadFavorites,
    LoadTheme,
    ApplyFilters {
        screen: ListScreen,
        generation: u64,
        base: FilterBase,
        query: FilterQuery,
        order: ResultOrder,
    },
    LoadDetail { generation: u64, name: String },
    LoadSpecies { generation: u64, url: String },
    LoadEvolution { generation: u64, url: String },
    CancelDetail,
    PersistFavorites { names: Vec<String> },
    PersistTheme { theme: Theme },
}

/// Collection a filter pass runs over.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterBase {
    Entities(Vec<NamedResource>),
    /// Favorite identifiers; URLs are derived from the API base when resolved.
    Favorites(Vec<String>),
}
