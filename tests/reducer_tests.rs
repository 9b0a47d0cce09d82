//! Reducer flows driven through EffectStoreTestHarness: startup gating,
//! stale completion handling, favorites and the detail chain.

use pokegrid::{
    action::Action,
    effect::{Effect, FilterBase},
    favorites::FavoritesStatus,
    filter::{apply_filters, ResultOrder},
    grid::Direction,
    reducer::reducer,
    state::{
        AppState, ChainLink, EntityDetail, EvolutionChain, FilterOptions, ListScreen,
        NamedResource, Screen, SpeciesDetail, SpriteRefs,
    },
    theme::Theme,
    ui::{GridComponentId, PokeGridUi},
};
use tui_dispatch::testing::*;
use tui_dispatch::DataResource;

fn resource(name: &str, id: u32) -> NamedResource {
    NamedResource::new(name, format!("https://pokeapi.co/api/v2/pokemon/{id}/"))
}

fn catalog() -> Vec<NamedResource> {
    vec![
        resource("bulbasaur", 1),
        resource("ivysaur", 2),
        resource("charmander", 4),
        resource("squirtle", 7),
        resource("pikachu", 25),
    ]
}

fn filter_options() -> FilterOptions {
    FilterOptions {
        types: vec![
            NamedResource::new("fire", "t/fire"),
            NamedResource::new("water", "t/water"),
        ],
        regions: vec![NamedResource::new("kanto", "r/kanto")],
    }
}

fn catalog_loaded() -> Action {
    Action::CatalogDidLoad {
        entities: Ok(catalog()),
        options: Ok(filter_options()),
    }
}

fn detail(name: &str, species_url: Option<&str>) -> EntityDetail {
    EntityDetail {
        id: 1,
        name: name.into(),
        height: 7,
        weight: 69,
        sprites: SpriteRefs::default(),
        stats: Vec::new(),
        types: vec!["grass".into()],
        abilities: Vec::new(),
        species: species_url.map(|url| NamedResource::new(name, url)),
    }
}

/// State past startup: catalog and option lists loaded, favorites ready and empty.
fn ready_state() -> AppState {
    let mut state = AppState {
        entities: DataResource::Loaded(catalog()),
        options: DataResource::Loaded(filter_options()),
        ..Default::default()
    };
    state.favorites.finish_load(Vec::new());
    state
}

/// `ready_state` with the catalog grid showing every entry and `selected` highlighted.
fn browsing(selected: usize) -> AppState {
    let mut state = ready_state();
    state.catalog.results = catalog();
    state.catalog.selected = selected;
    state
}

fn filter_generation(effects: &[Effect], wanted: ListScreen) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ApplyFilters {
                screen, generation, ..
            } if *screen == wanted => Some(*generation),
            _ => None,
        })
        .expect("filter pass issued")
}

fn detail_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadDetail { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("detail load issued")
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn init_requests_catalog_theme_and_favorites() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.entities.is_loading());
    harness.assert_state(|s| s.options.is_loading());
    harness.assert_state(|s| s.favorites.status() == FavoritesStatus::Loading);

    let effects = harness.drain_effects();
    effects.effects_count(3);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadCatalog));
    effects.effects_none_match(|e| matches!(e, Effect::ApplyFilters { .. }));
}

#[test]
fn favorites_load_only_once() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_none_match(|e| matches!(e, Effect::LoadFavorites));
}

#[test]
fn no_filter_pass_before_options_arrive() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.dispatch_collect(Action::FavoritesDidLoad(vec!["pikachu".into()]));
    harness.dispatch_collect(Action::SearchStart);
    harness.dispatch_collect(Action::SearchInput('p'));

    let effects = harness.drain_effects();
    effects.effects_none_match(|e| matches!(e, Effect::ApplyFilters { .. }));
    harness.assert_state(|s| s.catalog.search.query == "p");
}

#[test]
fn catalog_load_filters_catalog_then_favorites_when_ready() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.dispatch_collect(catalog_loaded());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::ApplyFilters {
                screen: ListScreen::Catalog,
                base: FilterBase::Entities(base),
                order: ResultOrder::Preserve,
                ..
            } if base.len() == 5
        )
    });

    harness.dispatch_collect(Action::FavoritesDidLoad(vec!["Pikachu".into()]));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::ApplyFilters {
                screen: ListScreen::Favorites,
                base: FilterBase::Favorites(names),
                order: ResultOrder::ByName,
                ..
            } if names == &vec!["pikachu".to_string()]
        )
    });
}

#[test]
fn catalog_failure_surfaces_labeled_message() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);

    harness.complete_action(Action::CatalogDidLoad {
        entities: Err("Failed to fetch all entities: timeout".into()),
        options: Ok(filter_options()),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.entities.is_failed());
    harness.assert_state(|s| s.entities.error() == Some("Failed to fetch all entities: timeout"));
    harness.assert_state(|s| s.message.as_deref() == Some("Failed to fetch all entities: timeout"));
}

#[test]
fn catalog_failure_does_not_block_favorites() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.dispatch_collect(Action::CatalogDidLoad {
        entities: Err("Failed to fetch all entities: timeout".into()),
        options: Ok(filter_options()),
    });
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.options_loaded());

    harness.dispatch_collect(Action::FavoritesDidLoad(vec!["mew".into()]));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::ApplyFilters {
                screen: ListScreen::Favorites,
                base: FilterBase::Favorites(names),
                ..
            } if names == &vec!["mew".to_string()]
        )
    });

    harness.dispatch_collect(Action::ScreenToggle);
    harness.dispatch_collect(Action::RegionNext);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::ApplyFilters { screen: ListScreen::Favorites, .. })
    });
}

#[test]
fn options_failure_holds_every_filter_pass() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.dispatch_collect(Action::CatalogDidLoad {
        entities: Ok(catalog()),
        options: Err("Failed to fetch all types: timeout".into()),
    });
    harness.dispatch_collect(Action::FavoritesDidLoad(vec!["mew".into()]));

    harness
        .drain_effects()
        .effects_none_match(|e| matches!(e, Effect::ApplyFilters { .. }));
    harness.assert_state(|s| s.options.error() == Some("Failed to fetch all types: timeout"));
}

// ============================================================================
// Filter passes
// ============================================================================

#[test]
fn search_input_issues_pass_with_query() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::SearchStart);
    harness.dispatch_collect(Action::SearchInput('b'));
    harness.dispatch_collect(Action::SearchInput('u'));

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| {
        matches!(e, Effect::ApplyFilters { screen: ListScreen::Catalog, .. })
    });
    assert!(matches!(
        effects.last(),
        Some(Effect::ApplyFilters { query, .. }) if query.search == "bu"
    ));
}

#[test]
fn search_query_keeps_spaces_and_case() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::SearchStart);
    harness.dispatch_collect(Action::SearchInput(' '));
    harness.dispatch_collect(Action::SearchInput('B'));

    let effects = harness.drain_effects();
    effects.effects_count(2);
    let Some(Effect::ApplyFilters { query, order, .. }) = effects.last() else {
        panic!("expected a filter pass, got {effects:?}");
    };
    assert_eq!(query.search, " B");
    harness.assert_state(|s| s.catalog.search.query == " B");

    // A leading space matches no name, while the letter alone matches case-insensitively.
    assert!(apply_filters(&catalog(), &query.search, None, None, *order).is_empty());
    let names: Vec<_> = apply_filters(&catalog(), "B", None, None, *order)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["bulbasaur".to_string()]);
}

#[test]
fn search_keys_ignored_while_search_closed() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::SearchInput('x'));
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.catalog.search.query.is_empty());
}

#[test]
fn older_filter_result_is_discarded() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::TypeFilterNext);
    let first = filter_generation(&harness.drain_effects(), ListScreen::Catalog);
    harness.dispatch_collect(Action::TypeFilterNext);
    let second = filter_generation(&harness.drain_effects(), ListScreen::Catalog);
    harness.assert_state(|s| s.catalog.type_filter.as_deref() == Some("water"));

    harness.complete_action(Action::FilterDidApply {
        screen: ListScreen::Catalog,
        generation: second,
        results: vec![resource("squirtle", 7)],
    });
    harness.complete_action(Action::FilterDidApply {
        screen: ListScreen::Catalog,
        generation: first,
        results: vec![resource("charmander", 4)],
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1);
    harness.assert_state(|s| s.catalog.results == vec![resource("squirtle", 7)]);
    harness.assert_state(|s| !s.catalog.applying);
}

#[test]
fn stale_result_arriving_first_is_still_dropped() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::RegionNext);
    let first = filter_generation(&harness.drain_effects(), ListScreen::Catalog);
    harness.dispatch_collect(Action::RegionPrev);
    let second = filter_generation(&harness.drain_effects(), ListScreen::Catalog);

    harness.complete_action(Action::FilterDidApply {
        screen: ListScreen::Catalog,
        generation: first,
        results: vec![resource("bulbasaur", 1)],
    });
    harness.process_emitted();
    harness.assert_state(|s| s.catalog.applying);
    harness.assert_state(|s| s.catalog.results.is_empty());

    harness.complete_action(Action::FilterDidApply {
        screen: ListScreen::Catalog,
        generation: second,
        results: catalog(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.catalog.results.len() == 5);
    harness.assert_state(|s| s.catalog.region_filter.is_none());
}

#[test]
fn clearing_filters_restores_full_pass() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);
    harness.dispatch_collect(Action::TypeFilterNext);
    harness.drain_effects();

    harness.dispatch_collect(Action::FiltersClear);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::ApplyFilters { query, .. }
                if query.type_filter.is_none() && query.search.is_empty()
        )
    });

    harness.dispatch_collect(Action::FiltersClear);
    harness.drain_effects().effects_empty();
}

// ============================================================================
// Screens and grid navigation
// ============================================================================

#[test]
fn screen_toggle_blocked_during_search() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);

    harness.dispatch_collect(Action::SearchStart);
    harness.dispatch_collect(Action::ScreenToggle);
    harness.assert_state(|s| s.screen == Screen::List(ListScreen::Catalog));

    harness.dispatch_collect(Action::SearchSubmit);
    harness.dispatch_collect(Action::ScreenToggle);
    harness.assert_state(|s| s.screen == Screen::List(ListScreen::Favorites));
}

#[test]
fn grid_moves_by_rows_and_columns() {
    let mut state = ready_state();
    state.catalog.results = catalog();
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    // 80 columns leave room for three cells per row.
    harness.dispatch_collect(Action::GridMove(Direction::Right));
    harness.assert_state(|s| s.catalog.selected == 1);
    harness.dispatch_collect(Action::GridMove(Direction::Down));
    harness.assert_state(|s| s.catalog.selected == 4);
    harness.dispatch_collect(Action::GridMove(Direction::Down));
    harness.assert_state(|s| s.catalog.selected == 4);
    harness.dispatch_collect(Action::GridPage(-1));
    harness.assert_state(|s| s.catalog.selected == 0);
}

// ============================================================================
// Favorites
// ============================================================================

#[test]
fn toggle_before_favorites_ready_is_ignored() {
    let mut state = AppState {
        entities: DataResource::Loaded(catalog()),
        ..Default::default()
    };
    state.catalog.results = catalog();
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.dispatch_collect(Action::ToggleFavorite);
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.favorites.is_empty());
    harness.assert_state(|s| s.message.as_deref() == Some("Favorites are still loading."));
}

#[test]
fn toggle_persists_and_refilters_favorites() {
    let mut harness = EffectStoreTestHarness::new(browsing(4), reducer);
    harness.dispatch_collect(Action::DetailOpen);
    harness.drain_effects();

    harness.dispatch_collect(Action::ToggleFavorite);
    harness.assert_state(|s| s.favorites.is_favorite("pikachu"));
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::PersistFavorites { names } if names == &vec!["pikachu".to_string()])
    });
    assert!(matches!(
        effects.last(),
        Some(Effect::ApplyFilters {
            screen: ListScreen::Favorites,
            ..
        })
    ));

    harness.dispatch_collect(Action::ToggleFavorite);
    harness.assert_state(|s| !s.favorites.is_favorite("pikachu"));
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::PersistFavorites { names } if names.is_empty()));
}

#[test]
fn persistence_failure_keeps_memory_state() {
    let mut harness = EffectStoreTestHarness::new(browsing(3), reducer);
    harness.dispatch_collect(Action::ToggleFavorite);

    harness.complete_action(Action::FavoritesPersistDidError("disk full".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.favorites.is_favorite("squirtle"));
    harness.assert_state(|s| s.persist_error.as_deref() == Some("disk full"));
}

// ============================================================================
// Detail chain
// ============================================================================

#[test]
fn detail_chain_requests_species_then_evolution() {
    let mut harness = EffectStoreTestHarness::new(browsing(0), reducer);
    harness.dispatch_collect(Action::DetailOpen);
    let generation = detail_generation(&harness.drain_effects());
    harness.assert_state(|s| s.screen == Screen::Detail);

    harness.dispatch_collect(Action::DetailDidLoad {
        generation,
        detail: Some(detail("bulbasaur", Some("species/1"))),
    });
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::LoadSpecies { url, .. } if url == "species/1"));

    harness.dispatch_collect(Action::SpeciesDidLoad {
        generation,
        species: Some(SpeciesDetail {
            name: "bulbasaur".into(),
            evolution_chain_url: Some("chain/1".into()),
            ..Default::default()
        }),
    });
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::LoadEvolution { url, .. } if url == "chain/1"));

    harness.dispatch_collect(Action::EvolutionDidLoad {
        generation,
        chain: Some(EvolutionChain {
            id: 1,
            chain: ChainLink {
                species: NamedResource::new("bulbasaur", "sp/1"),
                evolves_to: vec![ChainLink {
                    species: NamedResource::new("ivysaur", "sp/2"),
                    evolves_to: Vec::new(),
                }],
            },
        }),
    });
    harness.assert_state(|s| {
        s.current_detail()
            .is_some_and(|session| session.evolution_steps().len() == 2)
    });

    harness.dispatch_collect(Action::EvolutionSelect(1));
    harness.dispatch_collect(Action::EvolutionOpen);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::LoadDetail { name, .. } if name == "ivysaur"));
}

#[test]
fn missing_detail_shows_message_without_follow_ups() {
    let mut harness = EffectStoreTestHarness::new(browsing(2), reducer);
    harness.dispatch_collect(Action::DetailOpen);
    let generation = detail_generation(&harness.drain_effects());

    harness.dispatch_collect(Action::DetailDidLoad {
        generation,
        detail: None,
    });
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| !s.is_busy());
}

#[test]
fn detail_result_after_close_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(browsing(0), reducer);
    harness.dispatch_collect(Action::DetailOpen);
    let generation = detail_generation(&harness.drain_effects());

    harness.dispatch_collect(Action::DetailClose);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::CancelDetail));
    harness.assert_state(|s| s.screen == Screen::List(ListScreen::Catalog));

    harness.complete_action(Action::DetailDidLoad {
        generation,
        detail: Some(detail("bulbasaur", Some("species/1"))),
    });
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 0);
    harness.assert_state(|s| s.detail.is_none());
    harness.drain_effects().effects_empty();
}

#[test]
fn detail_result_for_superseded_open_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(browsing(0), reducer);
    harness.dispatch_collect(Action::DetailOpen);
    let first = detail_generation(&harness.drain_effects());
    harness.dispatch_collect(Action::DetailDidLoad {
        generation: first,
        detail: Some(detail("bulbasaur", Some("species/1"))),
    });
    harness.dispatch_collect(Action::SpeciesDidLoad {
        generation: first,
        species: Some(SpeciesDetail {
            name: "bulbasaur".into(),
            evolution_chain_url: Some("chain/1".into()),
            ..Default::default()
        }),
    });
    harness.dispatch_collect(Action::EvolutionDidLoad {
        generation: first,
        chain: Some(EvolutionChain {
            id: 1,
            chain: ChainLink {
                species: NamedResource::new("bulbasaur", "sp/1"),
                evolves_to: vec![ChainLink {
                    species: NamedResource::new("ivysaur", "sp/2"),
                    evolves_to: Vec::new(),
                }],
            },
        }),
    });
    harness.drain_effects();

    harness.dispatch_collect(Action::EvolutionSelect(1));
    harness.dispatch_collect(Action::EvolutionOpen);
    let second = detail_generation(&harness.drain_effects());
    assert!(second > first);

    harness.dispatch_collect(Action::DetailDidLoad {
        generation: first,
        detail: Some(detail("bulbasaur", None)),
    });
    harness.assert_state(|s| {
        s.current_detail()
            .is_some_and(|session| session.name == "ivysaur" && session.detail.is_none())
    });
}

#[test]
fn detail_close_returns_to_origin_screen() {
    let mut state = ready_state();
    state.favorites_view.results = vec![resource("pikachu", 25)];
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    harness.dispatch_collect(Action::ScreenToggle);
    harness.dispatch_collect(Action::DetailOpen);
    harness.assert_state(|s| s.current_detail().is_some_and(|session| session.name == "pikachu"));
    harness.dispatch_collect(Action::DetailClose);
    harness.assert_state(|s| s.screen == Screen::List(ListScreen::Favorites));
}

// ============================================================================
// Theme and keys
// ============================================================================

#[test]
fn theme_toggle_persists_choice() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);
    harness.dispatch_collect(Action::ThemeToggle);
    harness.assert_state(|s| s.theme == Theme::Light);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::PersistTheme { theme: Theme::Light }));

    harness.dispatch_collect(Action::ThemeDidLoad(Some(Theme::Light)));
    harness.drain_effects().effects_empty();
}

#[test]
fn slash_key_opens_search() {
    let mut harness = EffectStoreTestHarness::new(ready_state(), reducer);
    let mut ui = PokeGridUi::new();

    let actions = harness.send_keys::<GridComponentId, _, _>("/", |state, event| {
        ui.handle_grid_event(&event.kind, state).actions
    });
    actions.assert_count(1);
    actions.assert_first(Action::SearchStart);
}
