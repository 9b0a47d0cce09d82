use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::detail::DetailSession;
use crate::effect::{Effect, FilterBase};
use crate::filter::{FilterQuery, ResultOrder};
use crate::grid;
use crate::state::{AppState, ListScreen, Screen};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.entities = DataResource::Loading;
            state.options = DataResource::Loading;
            state.message = None;
            let mut effects = vec![Effect::LoadCatalog, Effect::LoadTheme];
            if state.favorites.begin_load() {
                effects.push(Effect::LoadFavorites);
            }
            DispatchResult::changed_with_many(effects)
        }

        Action::CatalogDidLoad { entities, options } => {
            state.entities = match entities {
                Ok(entities) => DataResource::Loaded(entities),
                Err(error) => DataResource::Failed(error),
            };
            state.options = match options {
                Ok(options) => DataResource::Loaded(options),
                Err(error) => DataResource::Failed(error),
            };
            if let Some(error) = state.entities.error().or(state.options.error()) {
                state.message = Some(error.to_string());
            }
            let effects = [ListScreen::Catalog, ListScreen::Favorites]
                .into_iter()
                .filter_map(|screen| refilter(state, screen))
                .collect();
            with_effects(effects)
        }

        Action::FavoritesDidLoad(names) => {
            state.favorites.finish_load(names);
            with_effects(refilter(state, ListScreen::Favorites).into_iter().collect())
        }

        Action::FavoritesDidPersist | Action::ThemeDidPersist => DispatchResult::unchanged(),

        Action::FavoritesPersistDidError(error) | Action::ThemePersistDidError(error) => {
            state.persist_error = Some(error);
            DispatchResult::changed()
        }

        Action::ThemeDidLoad(theme) => match theme {
            Some(theme) if theme != state.theme => {
                state.theme = theme;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::ThemeToggle => {
            state.theme = state.theme.toggle();
            DispatchResult::changed_with(Effect::PersistTheme { theme: state.theme })
        }

        Action::SearchStart => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let view = state.view_mut(screen);
            if view.search.active {
                return DispatchResult::unchanged();
            }
            view.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let view = state.view_mut(screen);
            if !view.search.active && view.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            let had_query = !view.search.query.is_empty();
            view.search.active = false;
            view.search.query.clear();
            if had_query {
                with_effects(refilter(state, screen).into_iter().collect())
            } else {
                DispatchResult::changed()
            }
        }

        Action::SearchSubmit => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let view = state.view_mut(screen);
            if !view.search.active {
                return DispatchResult::unchanged();
            }
            view.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => edit_search(state, |query| {
            query.push(ch);
            true
        }),

        Action::SearchBackspace => edit_search(state, |query| query.pop().is_some()),

        Action::TypeFilterNext => cycle_type(state, 1),
        Action::TypeFilterPrev => cycle_type(state, -1),
        Action::RegionNext => cycle_region(state, 1),
        Action::RegionPrev => cycle_region(state, -1),

        Action::FiltersClear => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let view = state.view_mut(screen);
            if !view.has_filters() {
                return DispatchResult::unchanged();
            }
            view.search.active = false;
            view.search.query.clear();
            view.type_filter = None;
            view.region_filter = None;
            with_effects(refilter(state, screen).into_iter().collect())
        }

        Action::FilterDidApply {
            screen,
            generation,
            results,
        } => {
            let view = state.view_mut(screen);
            if view.generation != generation {
                return DispatchResult::unchanged();
            }
            view.results = results;
            view.applying = false;
            view.clamp_selection();
            DispatchResult::changed()
        }

        Action::ScreenToggle => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            if state.view(screen).search.active {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::List(screen.other());
            DispatchResult::changed()
        }

        Action::GridMove(direction) => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let columns = state.grid_columns();
            let view = state.view(screen);
            let next = grid::step(view.selected, view.results.len(), columns, direction);
            set_selected(state, screen, next)
        }

        Action::GridPage(delta) => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let stride = state.grid_columns() * state.grid_visible_rows();
            let view = state.view(screen);
            if view.results.is_empty() {
                return DispatchResult::unchanged();
            }
            let next = if delta < 0 {
                view.selected.saturating_sub(stride)
            } else {
                (view.selected + stride).min(view.results.len() - 1)
            };
            set_selected(state, screen, next)
        }

        Action::DetailOpen => {
            let Some(screen) = state.active_list() else {
                return DispatchResult::unchanged();
            };
            let Some(entry) = state.view(screen).selected_entry() else {
                return DispatchResult::unchanged();
            };
            let name = entry.name.clone();
            state.origin = screen;
            open_detail(state, &name)
        }

        Action::DetailClose => {
            if state.screen != Screen::Detail {
                return DispatchResult::unchanged();
            }
            state.detail = None;
            state.screen = Screen::List(state.origin);
            DispatchResult::changed_with(Effect::CancelDetail)
        }

        Action::DetailDidLoad { generation, detail } => {
            let Some(session) = current_session(state, generation) else {
                return DispatchResult::unchanged();
            };
            match session.apply_detail(detail) {
                Some(url) => DispatchResult::changed_with(Effect::LoadSpecies { generation, url }),
                None => DispatchResult::changed(),
            }
        }

        Action::SpeciesDidLoad {
            generation,
            species,
        } => {
            let Some(session) = current_session(state, generation) else {
                return DispatchResult::unchanged();
            };
            match session.apply_species(species) {
                Some(url) => {
                    DispatchResult::changed_with(Effect::LoadEvolution { generation, url })
                }
                None => DispatchResult::changed(),
            }
        }

        Action::EvolutionDidLoad { generation, chain } => {
            let Some(session) = current_session(state, generation) else {
                return DispatchResult::unchanged();
            };
            session.apply_evolution(chain);
            DispatchResult::changed()
        }

        Action::EvolutionSelect(index) => {
            let Some(session) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if session.select_evolution(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::EvolutionOpen => {
            let Some(session) = state.detail.as_ref() else {
                return DispatchResult::unchanged();
            };
            let Some(step) = session.selected_evolution() else {
                return DispatchResult::unchanged();
            };
            if step.species.name == session.name {
                return DispatchResult::unchanged();
            }
            open_detail(state, &step.species.name)
        }

        Action::ToggleFavorite => {
            let name = match state.screen {
                Screen::Detail => state.detail.as_ref().map(|session| session.name.clone()),
                Screen::List(screen) => state
                    .view(screen)
                    .selected_entry()
                    .map(|entry| entry.name.clone()),
            };
            let Some(name) = name else {
                return DispatchResult::unchanged();
            };
            let Some(now_favorite) = state.favorites.toggle(&name) else {
                state.message = Some("Favorites are still loading.".to_string());
                return DispatchResult::changed();
            };
            state.message = Some(if now_favorite {
                format!("Added {name} to favorites.")
            } else {
                format!("Removed {name} from favorites.")
            });
            let mut effects = vec![Effect::PersistFavorites {
                names: state.favorites.snapshot(),
            }];
            effects.extend(refilter(state, ListScreen::Favorites));
            DispatchResult::changed_with_many(effects)
        }

        Action::UiTerminalResize(width, height) => {
            if state.resize(width, height) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn with_effects(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Issues a filter pass for `screen` under a fresh generation. Nothing runs
/// until the option lists are loaded. The catalog also waits for the entity
/// list, and the favorites screen for the favorites set.
fn refilter(state: &mut AppState, screen: ListScreen) -> Option<Effect> {
    if !state.options_loaded() {
        return None;
    }
    let (base, order) = match screen {
        ListScreen::Catalog => {
            let entities = state.entities.data()?;
            (FilterBase::Entities(entities.clone()), ResultOrder::Preserve)
        }
        ListScreen::Favorites => {
            if !state.favorites.is_ready() {
                return None;
            }
            (
                FilterBase::Favorites(state.favorites.snapshot()),
                ResultOrder::ByName,
            )
        }
    };
    let view = state.view_mut(screen);
    view.generation += 1;
    view.applying = true;
    Some(Effect::ApplyFilters {
        screen,
        generation: view.generation,
        base,
        query: FilterQuery {
            search: view.search.query.clone(),
            type_filter: view.type_filter.clone(),
            region_filter: view.region_filter.clone(),
        },
        order,
    })
}

fn edit_search(state: &mut AppState, edit: impl FnOnce(&mut String) -> bool) -> DispatchResult<Effect> {
    let Some(screen) = state.active_list() else {
        return DispatchResult::unchanged();
    };
    let view = state.view_mut(screen);
    if !view.search.active || !edit(&mut view.search.query) {
        return DispatchResult::unchanged();
    }
    view.selected = 0;
    with_effects(refilter(state, screen).into_iter().collect())
}

/// Steps through "all" followed by each option, wrapping at both ends.
fn cycle_option(current: Option<&str>, options: &[String], step: i16) -> Option<String> {
    let len = options.len() as i16;
    let index = current
        .and_then(|name| options.iter().position(|option| option == name))
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let mut next = index + step;
    if next < 0 {
        next = len;
    } else if next > len {
        next = 0;
    }
    if next == 0 {
        None
    } else {
        Some(options[(next - 1) as usize].clone())
    }
}

fn cycle_type(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let Some(screen) = state.active_list() else {
        return DispatchResult::unchanged();
    };
    if state.type_options().is_empty() {
        return DispatchResult::unchanged();
    }
    let options: Vec<String> = state
        .type_options()
        .iter()
        .map(|entry| entry.name.clone())
        .collect();
    let view = state.view_mut(screen);
    view.type_filter = cycle_option(view.type_filter.as_deref(), &options, step);
    view.selected = 0;
    with_effects(refilter(state, screen).into_iter().collect())
}

fn cycle_region(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let Some(screen) = state.active_list() else {
        return DispatchResult::unchanged();
    };
    if state.region_options().is_empty() {
        return DispatchResult::unchanged();
    }
    let options: Vec<String> = state
        .region_options()
        .iter()
        .map(|entry| entry.name.clone())
        .collect();
    let view = state.view_mut(screen);
    view.region_filter = cycle_option(view.region_filter.as_deref(), &options, step);
    view.selected = 0;
    with_effects(refilter(state, screen).into_iter().collect())
}

fn set_selected(state: &mut AppState, screen: ListScreen, index: usize) -> DispatchResult<Effect> {
    let view = state.view_mut(screen);
    if view.selected == index {
        return DispatchResult::unchanged();
    }
    view.selected = index;
    DispatchResult::changed()
}

/// Starts a new detail chain. The previous session, if any, is superseded.
fn open_detail(state: &mut AppState, name: &str) -> DispatchResult<Effect> {
    state.detail_generation += 1;
    let session = DetailSession::new(name, state.detail_generation);
    let effect = Effect::LoadDetail {
        generation: session.generation,
        name: session.name.clone(),
    };
    state.detail = Some(session);
    state.screen = Screen::Detail;
    DispatchResult::changed_with(effect)
}

fn current_session(state: &mut AppState, generation: u64) -> Option<&mut DetailSession> {
    state
        .detail
        .as_mut()
        .filter(|session| session.is_current(generation))
}
