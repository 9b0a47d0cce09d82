use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use pokegrid::action::Action;
use pokegrid::api::PokeApi;
use pokegrid::config::{self, ConfigOverrides, RuntimeConfig};
use pokegrid::effect::{Effect, FilterBase};
use pokegrid::favorites::{self, FAVORITES_KEY};
use pokegrid::filter;
use pokegrid::reducer::reducer;
use pokegrid::state::{AppState, FilterOptions};
use pokegrid::storage::KvStore;
use pokegrid::theme::{Theme, THEME_KEY};
use pokegrid::ui::{GridComponentId, GridContext, PokeGridUi};

#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Browse the PokeAPI catalog as a filterable grid")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
    /// API root, e.g. a local PokeAPI mirror
    #[arg(long)]
    api_base: Option<String>,
    /// Number of entries requested for the catalog
    #[arg(long)]
    entity_limit: Option<u32>,
    /// Where favorites, theme and the log file live
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Shared handles for effect tasks.
struct Services {
    config: RuntimeConfig,
    api: PokeApi,
    store: KvStore,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = RuntimeConfig::resolve(
        ConfigOverrides {
            api_base: args.api_base,
            entity_limit: args.entity_limit,
            data_dir: args.data_dir,
        },
        |key| std::env::var(key).ok(),
    );
    config::init_tracing(&config.log_path());
    tracing::info!(api = %config.api_base, data_dir = %config.data_dir.display(), "starting pokegrid");

    let debug = DebugSession::new(args.debug);
    let mut state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();

    let services = Arc::new(Services {
        api: PokeApi::http(config.api_base.clone()),
        store: KvStore::new(config.store_path()),
        config,
    });

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Resize events only arrive on change; the grid needs the real width up front.
    let size = terminal.size()?;
    state.resize(size.width, size.height);
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Arc<Services>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokeGridUi::new()));
    let mut bus: EventBus<AppState, Action, GridComponentId, GridContext> = EventBus::new();
    let keybindings: Keybindings<GridContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(GridComponentId::Grid, move |event, state| {
        ui_grid
            .borrow_mut()
            .handle_grid_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(GridComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(GridComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if !state.search_active() => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            KeyCode::Tab => HandlerResponse::action(Action::ScreenToggle),
            KeyCode::Char('T') => HandlerResponse::action(Action::ThemeToggle),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, services.clone()),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: Arc<Services>) {
    match effect {
        Effect::LoadCatalog => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                let api = &services.api;
                let (entities, types, regions) = tokio::join!(
                    api.fetch_all_entities(services.config.entity_limit),
                    api.fetch_all_types(),
                    api.fetch_all_regions(),
                );
                let options =
                    types.and_then(|types| regions.map(|regions| FilterOptions { types, regions }));
                Action::CatalogDidLoad {
                    entities: entities.map_err(|error| error.to_string()),
                    options: options.map_err(|error| error.to_string()),
                }
            });
        }
        Effect::LoadFavorites => {
            ctx.tasks().spawn(TaskKey::new("favorites_load"), async move {
                let raw = match services.store.get(FAVORITES_KEY).await {
                    Ok(raw) => raw,
                    Err(error) => {
                        tracing::warn!(%error, "favorites unreadable; starting empty");
                        None
                    }
                };
                Action::FavoritesDidLoad(favorites::decode(raw.as_deref()))
            });
        }
        Effect::LoadTheme => {
            ctx.tasks().spawn(TaskKey::new("theme_load"), async move {
                match services.store.get(THEME_KEY).await {
                    Ok(raw) => Action::ThemeDidLoad(raw.as_deref().and_then(Theme::parse)),
                    Err(error) => {
                        tracing::warn!(%error, "theme unreadable; keeping default");
                        Action::ThemeDidLoad(None)
                    }
                }
            });
        }
        Effect::ApplyFilters {
            screen,
            generation,
            base,
            query,
            order,
        } => {
            let key = format!("filter_{screen:?}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let base = match base {
                    FilterBase::Entities(entities) => entities,
                    FilterBase::Favorites(names) => filter::favorites_as_resources(
                        &services.api,
                        names.iter().map(String::as_str),
                    ),
                };
                let results = filter::compose(&services.api, &base, &query, order).await;
                Action::FilterDidApply {
                    screen,
                    generation,
                    results,
                }
            });
        }
        Effect::LoadDetail { generation, name } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                let detail = services.api.fetch_entity_detail(&name).await;
                Action::DetailDidLoad { generation, detail }
            });
        }
        Effect::LoadSpecies { generation, url } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                let species = services.api.fetch_species(&url).await;
                Action::SpeciesDidLoad {
                    generation,
                    species,
                }
            });
        }
        Effect::LoadEvolution { generation, url } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                let chain = services.api.fetch_evolution_chain(&url).await;
                Action::EvolutionDidLoad { generation, chain }
            });
        }
        Effect::CancelDetail => {
            ctx.tasks().cancel(&TaskKey::new("detail"));
        }
        Effect::PersistFavorites { names } => {
            // Saves are never aborted; the ticket keeps an older snapshot from landing last.
            let ticket = services.store.reserve();
            let key = format!("favorites_save_{ticket}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let payload = match favorites::encode(&names) {
                    Ok(payload) => payload,
                    Err(error) => return Action::FavoritesPersistDidError(error.to_string()),
                };
                match services.store.set_reserved(ticket, FAVORITES_KEY, &payload).await {
                    Ok(_) => Action::FavoritesDidPersist,
                    Err(error) => {
                        tracing::error!(%error, "failed to save favorites");
                        Action::FavoritesPersistDidError(error.to_string())
                    }
                }
            });
        }
        Effect::PersistTheme { theme } => {
            let ticket = services.store.reserve();
            let key = format!("theme_save_{ticket}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match services.store.set_reserved(ticket, THEME_KEY, theme.as_str()).await {
                    Ok(_) => Action::ThemeDidPersist,
                    Err(error) => {
                        tracing::error!(%error, "failed to save theme");
                        Action::ThemePersistDidError(error.to_string())
                    }
                }
            });
        }
    }
}
