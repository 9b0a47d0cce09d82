use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext};
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::detail::{self, DetailSession, DetailStatus, StepLink};
use crate::grid::{self, Direction, GridCell, CELL_HEIGHT};
use crate::state::{AppState, ListScreen, NamedResource, Screen, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::theme::{self, Palette};

const STAT_BAR_MAX: u32 = 255;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GridComponentId {
    Grid,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridContext {
    Grid,
    Search,
    Detail,
}

impl EventRoutingState<GridComponentId, GridContext> for AppState {
    fn focused(&self) -> Option<GridComponentId> {
        match self.screen {
            Screen::Detail => Some(GridComponentId::Detail),
            Screen::List(_) if self.search_active() => Some(GridComponentId::Search),
            Screen::List(_) => Some(GridComponentId::Grid),
        }
    }

    fn modal(&self) -> Option<GridComponentId> {
        if self.search_active() {
            Some(GridComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: GridComponentId) -> GridContext {
        match id {
            GridComponentId::Grid => GridContext::Grid,
            GridComponentId::Search => GridContext::Search,
            GridComponentId::Detail => GridContext::Detail,
        }
    }

    fn default_context(&self) -> GridContext {
        GridContext::Grid
    }
}

/// Screen regions from the last draw, used for event routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawnAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub struct PokeGridUi {
    evolution_list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokeGridUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeGridUi {
    pub fn new() -> Self {
        Self {
            evolution_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<GridComponentId>,
    ) {
        let areas = self.draw(frame, area, state);
        match state.screen {
            Screen::Detail => event_ctx.set_component_area(GridComponentId::Detail, areas.body),
            Screen::List(_) => {
                event_ctx.set_component_area(GridComponentId::Grid, areas.body);
                if state.search_active() {
                    event_ctx.set_component_area(GridComponentId::Search, areas.header);
                }
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> DrawnAreas {
        let palette = state.theme.palette();
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);
        let layout = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        render_header(frame, layout[0], state, &palette);
        match state.screen {
            Screen::List(screen) => render_grid(frame, layout[1], state, screen, &palette),
            Screen::Detail => match state.current_detail() {
                Some(session) => {
                    render_detail(frame, layout[1], state, session, &palette, &mut self.evolution_list)
                }
                None => render_notice(frame, layout[1], "Nothing selected.", &palette),
            },
        }
        render_footer(frame, layout[2], state, &palette, &mut self.status_bar);

        DrawnAreas {
            header: layout[0],
            body: layout[1],
            footer: layout[2],
        }
    }

    pub fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        handle_grid_event(event, state)
    }

    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }

    pub fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        handle_detail_event(event, state, &mut self.evolution_list)
    }
}

pub fn handle_grid_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::GridMove(Direction::Up)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::GridMove(Direction::Down)],
            KeyCode::Left | KeyCode::Char('h') => vec![Action::GridMove(Direction::Left)],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::GridMove(Direction::Right)],
            KeyCode::PageDown => vec![Action::GridPage(1)],
            KeyCode::PageUp => vec![Action::GridPage(-1)],
            KeyCode::Enter => vec![Action::DetailOpen],
            KeyCode::Char('/') => vec![Action::SearchStart],
            KeyCode::Char(']') => vec![Action::TypeFilterNext],
            KeyCode::Char('[') => vec![Action::TypeFilterPrev],
            KeyCode::Char('}') => vec![Action::RegionNext],
            KeyCode::Char('{') => vec![Action::RegionPrev],
            KeyCode::Char('c') => vec![Action::FiltersClear],
            KeyCode::Char('f') => vec![Action::ToggleFavorite],
            _ => vec![],
        },
        EventKind::Scroll { delta, .. } => {
            let direction = if *delta < 0 { Direction::Up } else { Direction::Down };
            vec![Action::GridMove(direction)]
        }
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit],
            KeyCode::Backspace => vec![Action::SearchBackspace],
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::SearchInput(ch)]
            }
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handle_detail_event(
    event: &EventKind,
    state: &AppState,
    evolution_list: &mut SelectList,
) -> HandlerResponse<Action> {
    if let EventKind::Key(key) = event {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return handler_response(vec![Action::DetailClose]),
            KeyCode::Char('f') => return handler_response(vec![Action::ToggleFavorite]),
            KeyCode::Enter => return handler_response(vec![Action::EvolutionOpen]),
            _ => {}
        }
    }
    let Some(session) = state.current_detail() else {
        return HandlerResponse::ignored();
    };
    let items = evolution_items(session);
    if items.is_empty() {
        return HandlerResponse::ignored();
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: session.evolution_selected.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: evolution_list_style(&state.theme.palette()),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionSelect,
        render_item: &|item| item.clone(),
    };
    let actions: Vec<_> = evolution_list.handle_event(event, props).into_iter().collect();
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn panel(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .style(Style::default().bg(palette.panel).fg(palette.text))
        .border_style(Style::default().fg(palette.muted))
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let paragraph = Paragraph::new(message.to_string())
        .block(panel("POKEGRID", palette))
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let active = match state.screen {
        Screen::List(screen) => screen,
        Screen::Detail => state.origin,
    };
    let tab = |screen: ListScreen| {
        let style = if screen == active {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.muted)
        };
        Span::styled(screen.title(), style)
    };

    let mut spans = vec![
        tab(ListScreen::Catalog),
        Span::raw("  "),
        tab(ListScreen::Favorites),
    ];
    if let Screen::List(screen) = state.screen {
        let view = state.view(screen);
        let search = if view.search.active {
            format!("/{}_", view.search.query)
        } else if view.search.query.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", view.search.query)
        };
        let label_style = Style::default().fg(palette.muted);
        let value_style = Style::default().fg(palette.highlight);
        spans.extend([
            Span::styled("  |  Type: ", label_style),
            Span::styled(option_label(view.type_filter.as_deref()), value_style),
            Span::styled("  Region: ", label_style),
            Span::styled(option_label(view.region_filter.as_deref()), value_style),
            Span::styled("  Search: ", label_style),
            Span::styled(search, Style::default().fg(palette.accent)),
        ]);
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(panel("POKEGRID", palette));
    frame.render_widget(paragraph, area);
}

fn option_label(value: Option<&str>) -> String {
    value
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "ALL".to_string())
}

fn render_grid(frame: &mut Frame, area: Rect, state: &AppState, screen: ListScreen, palette: &Palette) {
    let view = state.view(screen);
    let title = format!("{} ({})", screen.title(), view.results.len());
    let block = panel(&title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = grid_notice(state, screen) {
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
        return;
    }

    let columns = state.grid_columns();
    let cell_width = inner.width / columns as u16;
    let visible_rows = ((inner.height / CELL_HEIGHT) as usize).max(1);
    let first_row = grid::first_visible_row(view.selected, columns, visible_rows);
    let cells = grid::pad(&view.results, columns);

    for (slot, cell) in cells
        .iter()
        .enumerate()
        .skip(first_row * columns)
        .take(visible_rows * columns)
    {
        let row = (slot / columns - first_row) as u16;
        let col = (slot % columns) as u16;
        let rect = Rect {
            x: inner.x + col * cell_width,
            y: inner.y + row * CELL_HEIGHT,
            width: cell_width,
            height: CELL_HEIGHT,
        }
        .intersection(inner);
        if rect.is_empty() {
            continue;
        }
        match cell {
            GridCell::Entry(entry) => {
                let selected = slot == view.selected;
                render_grid_entry(frame, rect, entry, selected, state, palette);
            }
            GridCell::Placeholder(_) => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().bg(palette.placeholder))
                    .border_style(Style::default().fg(palette.placeholder));
                frame.render_widget(block, rect);
            }
        }
    }
}

fn grid_notice(state: &AppState, screen: ListScreen) -> Option<String> {
    if let Some(error) = state.options.error() {
        return Some(error.to_string());
    }
    if screen == ListScreen::Catalog {
        if let Some(error) = state.entities.error() {
            return Some(error.to_string());
        }
        if !state.entities.is_loaded() {
            return Some("Loading Pokémon...".to_string());
        }
    }
    if !state.options_loaded() {
        return Some("Loading filters...".to_string());
    }
    let view = state.view(screen);
    if !view.results.is_empty() {
        return None;
    }
    if view.applying {
        return Some("Filtering...".to_string());
    }
    match screen {
        ListScreen::Favorites if !state.favorites.is_ready() => Some("Loading favorites...".to_string()),
        ListScreen::Favorites if state.favorites.is_empty() => {
            Some("No favorites yet. Press f on any Pokémon to add it.".to_string())
        }
        _ => Some("No Pokémon match these filters.".to_string()),
    }
}

fn render_grid_entry(
    frame: &mut Frame,
    area: Rect,
    entry: &NamedResource,
    selected: bool,
    state: &AppState,
    palette: &Palette,
) {
    let border = if selected {
        Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(palette.panel))
        .border_style(border);

    let mut name = vec![Span::styled(
        detail::capitalize(&entry.name),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    )];
    if state.favorites.is_favorite(&entry.name) {
        name.push(Span::styled(" ♥", Style::default().fg(palette.favorite)));
    }
    let number = entity_number(&entry.url)
        .map(|id| format!("#{id:03}"))
        .unwrap_or_default();
    let text = Text::from(vec![
        Line::from(name),
        Line::from(Span::styled(number, Style::default().fg(palette.muted))),
    ]);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Numeric id at the end of a resource URL, when it has one.
fn entity_number(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &DetailSession,
    palette: &Palette,
    evolution_list: &mut SelectList,
) {
    match &session.status {
        DetailStatus::Loading => {
            let message = format!("Loading {}...", detail::capitalize(&session.name));
            render_notice(frame, area, &message, palette);
            return;
        }
        DetailStatus::Failed(error) => {
            render_notice(frame, area, error, palette);
            return;
        }
        DetailStatus::Ready => {}
    }

    let columns = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let right = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(columns[1]);

    let title = detail::capitalize(&session.name);
    let paragraph = Paragraph::new(detail_text(state, session, palette))
        .block(panel(&title, palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, columns[0]);

    let stats = Paragraph::new(stats_text(session, palette, right[0].width)).block(panel("Base stats", palette));
    frame.render_widget(stats, right[0]);

    render_evolution(frame, right[1], state, session, palette, evolution_list);
}

fn detail_text(state: &AppState, session: &DetailSession, palette: &Palette) -> Text<'static> {
    let Some(detail) = session.detail.as_ref() else {
        return Text::default();
    };
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.text);

    let mut heading = vec![Span::styled(
        format!("#{:03}", detail.id),
        Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
    )];
    if let Some(genus) = session.genus() {
        heading.push(Span::styled(format!("  {genus}"), label));
    }
    if state.favorites.is_favorite(&session.name) {
        heading.push(Span::styled("  ♥ favorite", Style::default().fg(palette.favorite)));
    }

    let mut types = vec![Span::styled("Types: ", label)];
    for name in &detail.types {
        types.push(Span::styled(
            format!(" {} ", name.to_ascii_uppercase()),
            Style::default().fg(palette.panel).bg(theme::type_color(name)),
        ));
        types.push(Span::raw(" "));
    }

    let abilities = detail
        .abilities
        .iter()
        .map(|ability| {
            let name = detail::capitalize(&ability.name);
            if ability.hidden {
                format!("{name} (hidden)")
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        Line::from(heading),
        Line::from(types),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::styled(detail::format_height(detail.height), value),
            Span::styled("  Weight: ", label),
            Span::styled(detail::format_weight(detail.weight), value),
        ]),
        Line::from(vec![Span::styled("Abilities: ", label), Span::styled(abilities, value)]),
    ];

    if let Some(species) = session.species.as_ref() {
        let tags = [
            ("Color", species.color.clone()),
            ("Shape", species.shape.clone()),
            ("Habitat", species.habitat.clone()),
            ("Growth", species.growth_rate.clone()),
        ];
        let mut spans = Vec::new();
        for (name, tag) in tags {
            if let Some(tag) = tag {
                spans.push(Span::styled(format!("{name}: "), label));
                spans.push(Span::styled(format!("{}  ", detail::capitalize(&tag)), value));
            }
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        let mut numbers = Vec::new();
        if let Some(rate) = species.capture_rate {
            numbers.push(Span::styled("Capture rate: ", label));
            numbers.push(Span::styled(format!("{rate}  "), value));
        }
        if let Some(happiness) = species.base_happiness {
            numbers.push(Span::styled("Base happiness: ", label));
            numbers.push(Span::styled(happiness.to_string(), value));
        }
        if !numbers.is_empty() {
            lines.push(Line::from(numbers));
        }
    } else if session.species_loading {
        lines.push(Line::from(Span::styled("Loading species...", label)));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        session
            .flavor_text()
            .unwrap_or_else(|| "No description available.".to_string()),
        value,
    )));
    if let Some(url) = session.sprite_url() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Artwork: ", label),
            Span::styled(url.to_string(), Style::default().fg(palette.muted)),
        ]));
    }
    Text::from(lines)
}

fn stats_text(session: &DetailSession, palette: &Palette, width: u16) -> Text<'static> {
    let Some(detail) = session.detail.as_ref() else {
        return Text::default();
    };
    let bar_width = width.saturating_sub(20).max(4) as u32;
    let lines: Vec<Line> = detail
        .stats
        .iter()
        .map(|stat| {
            let filled = (stat.value.min(STAT_BAR_MAX) * bar_width / STAT_BAR_MAX).max(1) as usize;
            Line::from(vec![
                Span::styled(format!("{:<8}", stat_label(&stat.name)), Style::default().fg(palette.muted)),
                Span::styled(format!("{:>4} ", stat.value), Style::default().fg(palette.text)),
                Span::styled("█".repeat(filled), Style::default().fg(theme::stat_color(stat.value))),
            ])
        })
        .collect();
    Text::from(lines)
}

fn stat_label(name: &str) -> &str {
    match name {
        "hp" => "HP",
        "attack" => "Atk",
        "defense" => "Def",
        "special-attack" => "Sp.Atk",
        "special-defense" => "Sp.Def",
        "speed" => "Speed",
        other => other,
    }
}

fn render_evolution(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &DetailSession,
    palette: &Palette,
    evolution_list: &mut SelectList,
) {
    let block = panel("Evolution", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = evolution_items(session);
    if items.is_empty() {
        let message = if session.species_loading || session.evolution_loading {
            "Evolution loading..."
        } else {
            "No evolution data."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(palette.muted)),
            inner,
        );
        return;
    }

    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: session.evolution_selected.min(items.len().saturating_sub(1)),
        is_focused: state.screen == Screen::Detail,
        style: evolution_list_style(palette),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionSelect,
        render_item: &|item| item.clone(),
    };
    evolution_list.render(frame, inner, props);
}

fn evolution_items(session: &DetailSession) -> Vec<Line<'static>> {
    session
        .evolution_steps()
        .into_iter()
        .map(|step| {
            let indent = "  ".repeat(step.depth.saturating_sub(1));
            let connector = match step.link {
                StepLink::Root => String::new(),
                StepLink::Inline => format!("{indent}→ "),
                StepLink::Branch { index, count } if index + 1 == count => format!("{indent}└▶ "),
                StepLink::Branch { .. } => format!("{indent}├▶ "),
            };
            let marker = if step.species.name == session.name { " •" } else { "" };
            Line::from(format!(
                "{connector}{}{marker}",
                detail::capitalize(&step.species.name)
            ))
        })
        .collect()
}

fn evolution_list_style(palette: &Palette) -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(palette.panel),
            fg: Some(palette.text),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| status_line(state));
    let left_hints = status_hints(state);
    let center_hints = vec![StatusBarHint::new("T", "Theme"), StatusBarHint::new("q", "Quit")];
    let status_span = Span::styled(status.as_str(), Style::default().fg(palette.highlight));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(palette.panel),
            fg: Some(palette.text),
        },
        text: Style::default().fg(palette.muted),
        hint_key: Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(palette.muted),
        separator: Style::default().fg(palette.muted),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_line(state: &AppState) -> String {
    if state.entities.is_loading() || state.options.is_loading() {
        return "Loading catalog...".to_string();
    }
    match state.screen {
        Screen::Detail => match state.current_detail() {
            Some(session) if session.evolution_loading => "Loading evolution chain...".to_string(),
            Some(session) if session.species_loading => "Loading species...".to_string(),
            _ => String::new(),
        },
        Screen::List(screen) if state.view(screen).applying => "Filtering...".to_string(),
        Screen::List(_) => String::new(),
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search_active() {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    match state.screen {
        Screen::Detail => vec![
            StatusBarHint::new("Esc", "Back"),
            StatusBarHint::new("↑/↓", "Evolution"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("f", "Favorite"),
        ],
        Screen::List(_) => vec![
            StatusBarHint::new("Tab", "Screen"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("[ ]", "Type"),
            StatusBarHint::new("{ }", "Region"),
            StatusBarHint::new("c", "Clear"),
            StatusBarHint::new("Enter", "Detail"),
            StatusBarHint::new("f", "Favorite"),
        ],
    }
}
