//! Lotwise - Actor-based real-estate investing dashboard
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Ledger Layer (Tokio) - async wallet transactions

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use lotwise::config::NotificationPref;
use lotwise::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use lotwise::app::earn::ProjectedReturns;
use lotwise::data;
use lotwise::messages::ui_events::{key_to_ui_event, InputMode, KeyContext, Page};
use lotwise::models::{format_usd, format_usd_compact};
use lotwise::ui::{
    activity_status_color, explorer_url, health_color, liquidation_health_color, listing_status_color,
    modal_body, notification_color, progress_bar, render_tabs, risk_color, status_config,
};
use lotwise::{
    AppActor, AppState, LedgerActor, LedgerCommand, LedgerResponse, MockLedger, RenderState,
    Storage, TransactionFlow, TxStatus, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let state = AppState::new(Storage::new());
    tracing::info!(
        version = APP_VERSION,
        failure_rate = state.settings.failure_rate,
        "Starting {}",
        APP_NAME
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (ledger_cmd_tx, ledger_cmd_rx) = mpsc::unbounded_channel::<LedgerCommand>();
    let (ledger_resp_tx, ledger_resp_rx) = mpsc::unbounded_channel::<LedgerResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn ledger actor
    let ledger = Arc::new(MockLedger::new(state.settings.failure_rate));
    let flow = TransactionFlow::new(state.settings.flow_timings());
    let refresh = Duration::from_secs(state.settings.balance_refresh_secs);
    let ledger_actor = LedgerActor::new(ledger, flow, refresh, ledger_resp_tx);
    tokio::spawn(ledger_actor.run(ledger_cmd_rx));

    // Restored wallet sessions keep their balance fresh
    if let Some(address) = state.wallet.address.clone().filter(|_| state.wallet.is_connected) {
        let _ = ledger_cmd_tx.send(LedgerCommand::ResumeSession { address });
    }

    // Spawn app actor
    let app_actor = AppActor::new(state, ledger_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, ledger_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, KeyContext::from(&current_state)) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Wallet header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);
    draw_wallet_header(f, state, main_chunks[1]);

    let content = main_chunks[2];
    if state.page.requires_wallet() && !state.wallet.is_connected {
        draw_connect_prompt(f, state, content);
    } else {
        match state.page {
            Page::Dashboard => draw_dashboard(f, state, content),
            Page::Invest => draw_invest(f, state, content),
            Page::Property => draw_property(f, state, content),
            Page::Portfolio => draw_portfolio(f, state, content),
            Page::Activity => draw_activity(f, state, content),
            Page::Earn => draw_earn(f, state, content),
            Page::Liquidations => draw_liquidations(f, state, content),
            Page::Docs => draw_docs(f, state, content),
            Page::Settings => draw_settings(f, state, content),
        }
    }

    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if state.show_notifications {
        draw_notifications_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.transaction.is_open {
        draw_transaction_modal(f, state, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let titles: Vec<&str> = Page::TABS.iter().map(|p| p.title()).collect();
    f.render_widget(render_tabs(&titles, state.page.tab_index()), area);
}

fn draw_wallet_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let wallet = &state.wallet;
    let mut spans = vec![Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Cyan).bold(),
    )];

    if wallet.is_connected {
        spans.push(Span::styled("● ", Style::default().fg(Color::Green)));
        spans.push(Span::raw(wallet.display_address().to_string()));
        spans.push(Span::styled(
            format!("  {}", format_usd(wallet.balance)),
            Style::default().fg(Color::Yellow),
        ));
        if let Some(chain) = wallet.chain_id {
            spans.push(Span::styled(
                format!("  chain {}", chain),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        spans.push(Span::styled("○ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            "Wallet not connected (w to connect)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let unread = state.notifications.len();
    if unread > 0 {
        spans.push(Span::styled(
            format!("  [{} notifications]", unread),
            Style::default().fg(Color::Magenta),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_connect_prompt(f: &mut Frame, state: &RenderState, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Connect your wallet",
            Style::default().bold(),
        )),
        Line::from(""),
        Line::from(format!(
            "The {} page needs a connected wallet.",
            state.page.title()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'w' to connect",
            Style::default().fg(Color::Cyan),
        )),
    ];
    let prompt = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", state.page.title())));
    f.render_widget(prompt, area);
}

fn stat_card<'a>(title: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(value, Style::default().fg(color).bold())))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
}

fn draw_dashboard(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[0]);

    let stats = &state.stats;
    f.render_widget(
        stat_card("Total Supplied", format_usd(stats.total_supplied), Color::Green),
        cards[0],
    );
    f.render_widget(
        stat_card("Total Borrowed", format_usd(stats.total_borrowed), Color::Yellow),
        cards[1],
    );
    f.render_widget(
        stat_card("Net APY", format!("{:.2}%", stats.net_apy), Color::Cyan),
        cards[2],
    );
    let health = stats
        .min_health_factor
        .map(|h| format!("{}%", h))
        .unwrap_or_else(|| String::from("-"));
    f.render_widget(
        stat_card(
            "Health Factor",
            health,
            stats.min_health_factor.map(health_color).unwrap_or(Color::Gray),
        ),
        cards[3],
    );

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let rows: Vec<Row> = state
        .recent_activity
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.kind.as_str()),
                Cell::from(r.asset.clone()),
                Cell::from(r.amount.clone()),
                Cell::from(format_usd(r.value)),
                Cell::from(r.status.as_str()).style(Style::default().fg(activity_status_color(r.status))),
            ])
        })
        .collect();
    let activity = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(13),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Type", "Asset", "Amount", "Value", "Status"]).style(Style::default().bold()))
    .block(Block::default().borders(Borders::ALL).title(" Recent Activity "));
    f.render_widget(activity, lower[0]);

    let top: Vec<Line> = state
        .listings
        .iter()
        .take(5)
        .map(|p| {
            Line::from(vec![
                Span::styled(format!("{:>5.1}% ", p.apy), Style::default().fg(Color::Green)),
                Span::raw(p.name.clone()),
                Span::styled(format!("  {}", p.location), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let listings = Paragraph::new(top).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Top Listings ({} listed) ", format_usd_compact(stats.listed_value))),
    );
    f.render_widget(listings, lower[1]);
}

fn filter_label<T>(value: Option<T>, label: impl Fn(T) -> &'static str) -> &'static str {
    value.map(label).unwrap_or("All")
}

fn draw_invest(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filters = &state.invest_filters;
    let editing = state.input_mode == InputMode::Editing;
    let search_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if editing { "_" } else { "" };
    let bar = Line::from(vec![
        Span::styled(format!("Search: {}{}", filters.query, cursor), search_style),
        Span::raw("   "),
        Span::raw(format!(
            "Type: {}   Status: {}   Sort: {}",
            filter_label(filters.property_type, |t| t.as_str()),
            filter_label(filters.status, |s| s.as_str()),
            filters.sort.label()
        )),
    ]);
    let border = if editing { Color::Yellow } else { Color::Gray };
    f.render_widget(
        Paragraph::new(bar).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Filters "),
        ),
        chunks[0],
    );

    let rows: Vec<Row> = state
        .listings
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.location.clone()),
                Cell::from(p.property_type.as_str()),
                Cell::from(format_usd_compact(p.price)),
                Cell::from(format_usd(p.token_price)),
                Cell::from(format!("{:.1}%", p.apy)).style(Style::default().fg(Color::Green)),
                Cell::from(format!("{}/{}", p.available_tokens, p.total_tokens)),
                Cell::from(p.risk.as_str()).style(Style::default().fg(risk_color(p.risk))),
                Cell::from(p.status.as_str()).style(Style::default().fg(listing_status_color(p.status))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec![
            "Property", "Location", "Type", "Price", "Token", "APY", "Available", "Risk", "Status",
        ])
        .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold())
    .highlight_symbol("> ")
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Properties ({}) ", state.listings.len())),
    );

    let mut table_state = TableState::default().with_selected(Some(state.invest_selected));
    f.render_stateful_widget(table, chunks[1], &mut table_state);
}

fn draw_property(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(p) = &state.selected_property else {
        f.render_widget(
            Paragraph::new("No property selected").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let sold = p.total_tokens.saturating_sub(p.available_tokens);
    let details = vec![
        Line::from(Span::styled(p.name.clone(), Style::default().bold())),
        Line::from(Span::styled(p.location.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(format!("Type:          {}", p.property_type.as_str())),
        Line::from(format!("Price:         {}", format_usd(p.price))),
        Line::from(format!("Expected APY:  {:.1}%", p.apy)),
        Line::from(vec![
            Span::raw("Risk:          "),
            Span::styled(p.risk.as_str(), Style::default().fg(risk_color(p.risk))),
        ]),
        Line::from(format!("Bedrooms:      {}", p.bedrooms)),
        Line::from(format!("Bathrooms:     {}", p.bathrooms)),
        Line::from(format!("Square feet:   {}", p.square_footage)),
        Line::from(format!("Year built:    {}", p.year_built)),
        Line::from(format!("Parking:       {}", p.parking)),
        Line::from(format!("Rating:        {:.1}", p.rating)),
        Line::from(""),
        Line::from(format!(
            "Tokens sold   {} {} / {}",
            progress_bar(1.0 - p.availability(), 20),
            sold,
            p.total_tokens
        )),
    ];
    f.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Property ")),
        chunks[0],
    );

    let cost = f64::from(state.purchase_quantity) * p.token_price;
    let purchase = vec![
        Line::from(vec![
            Span::raw("Status:    "),
            Span::styled(p.status.as_str(), Style::default().fg(listing_status_color(p.status))),
        ]),
        Line::from(format!("Token:     {} @ {}", p.symbol(), format_usd(p.token_price))),
        Line::from(format!("Available: {}", p.available_tokens)),
        Line::from(""),
        Line::from(vec![
            Span::raw("Quantity:  "),
            Span::styled(
                format!("- {} +", state.purchase_quantity),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
        Line::from(format!("Total:     {}", format_usd(cost))),
        Line::from(format!("Yearly:    ~{}", format_usd(cost * p.apy / 100.0))),
        Line::from(""),
        Line::from(Span::styled(
            if state.wallet.is_connected {
                "b/Enter: buy tokens"
            } else {
                "w: connect wallet to buy"
            },
            Style::default().fg(Color::Cyan),
        )),
    ];
    f.render_widget(
        Paragraph::new(purchase).block(Block::default().borders(Borders::ALL).title(" Buy Tokens ")),
        chunks[1],
    );
}

fn draw_portfolio(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let stats = &state.stats;
    let summary = Line::from(format!(
        "Supplied {}   Borrowed {}   Net APY {:.2}%   Positions {}",
        format_usd(stats.total_supplied),
        format_usd(stats.total_borrowed),
        stats.net_apy,
        stats.positions
    ));
    f.render_widget(
        Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title(" Summary ")),
        chunks[0],
    );

    let rows: Vec<Row> = state
        .positions
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.asset.clone()),
                Cell::from(format_usd(p.supplied)),
                Cell::from(format_usd(p.borrowed)),
                Cell::from(format!("{:.1}%", p.apy)),
                Cell::from(format!("{:.1}%", p.borrow_apy)),
                Cell::from(format!("{}%", p.health_factor))
                    .style(Style::default().fg(health_color(p.health_factor))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Asset", "Supplied", "Borrowed", "APY", "Borrow APY", "Health"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold())
    .block(Block::default().borders(Borders::ALL).title(" Positions "));

    let mut table_state = TableState::default().with_selected(Some(state.portfolio_selected));
    f.render_stateful_widget(table, chunks[1], &mut table_state);
}

fn draw_activity(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let filters = Line::from(format!(
        "Status: {}   Type: {}   ({} rows)",
        filter_label(state.activity_status, |s| s.as_str()),
        filter_label(state.activity_kind, |k| k.as_str()),
        state.activity.len()
    ));
    f.render_widget(
        Paragraph::new(filters).block(Block::default().borders(Borders::ALL).title(" Filters ")),
        chunks[0],
    );

    let rows: Vec<Row> = state
        .activity
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(r.kind.as_str()),
                Cell::from(r.asset.clone()),
                Cell::from(r.amount.clone()),
                Cell::from(format_usd(r.value)),
                Cell::from(r.status.as_str()).style(Style::default().fg(activity_status_color(r.status))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(9),
            Constraint::Min(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Date", "Type", "Asset", "Amount", "Value", "Status"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold())
    .block(Block::default().borders(Borders::ALL).title(" Activity "));

    let mut table_state = TableState::default().with_selected(Some(state.activity_selected));
    f.render_stateful_widget(table, chunks[1], &mut table_state);

    let hash = state
        .activity
        .get(state.activity_selected)
        .and_then(|r| r.hash.as_deref())
        .map(explorer_url)
        .unwrap_or_else(|| String::from("-"));
    f.render_widget(
        Paragraph::new(hash).block(Block::default().borders(Borders::ALL).title(" Explorer ")),
        chunks[2],
    );
}

fn draw_earn(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(12)])
        .split(area);

    let filters = &state.earn_filters;
    let bar = Line::from(format!(
        "Risk: {}   Strategy: {}   Sort: {}",
        filter_label(filters.risk, |r| r.as_str()),
        filter_label(filters.strategy, |s| s.as_str()),
        filters.sort.label()
    ));
    f.render_widget(
        Paragraph::new(bar).block(Block::default().borders(Borders::ALL).title(" Filters ")),
        chunks[0],
    );

    let rows: Vec<Row> = state
        .opportunities
        .iter()
        .map(|o| {
            Row::new(vec![
                Cell::from(o.title.clone()),
                Cell::from(format!("{:.1}%", o.apy)).style(Style::default().fg(Color::Green)),
                Cell::from(format_usd_compact(o.total_locked)),
                Cell::from(format_usd(o.min_investment)),
                Cell::from(format!("{} mo", o.duration_months)),
                Cell::from(o.strategy.as_str()),
                Cell::from(o.risk.as_str()).style(Style::default().fg(risk_color(o.risk))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(17),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Pool", "APY", "TVL", "Minimum", "Term", "Strategy", "Risk"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold())
    .highlight_symbol("> ")
    .block(Block::default().borders(Borders::ALL).title(" Earn "));

    let mut table_state = TableState::default().with_selected(Some(state.earn_selected));
    f.render_stateful_widget(table, chunks[1], &mut table_state);

    let editing = state.input_mode == InputMode::Editing;
    let detail = match state.opportunities.get(state.earn_selected) {
        Some(o) => {
            let returns = ProjectedReturns::for_input(&state.stake_amount, o.apy);
            let amount_style = if editing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            vec![
                Line::from(o.description.clone()),
                Line::from(""),
                Line::from(format!(
                    "Capacity {} {:.0}% of {}",
                    progress_bar(o.utilization(), 20),
                    o.utilization() * 100.0,
                    format_usd_compact(o.capacity)
                )),
                Line::from(format!("Features: {}", o.features.join(", "))),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Amount: "),
                    Span::styled(
                        format!("{}{}", state.stake_amount, if editing { "_" } else { "" }),
                        amount_style,
                    ),
                    Span::styled(
                        format!("  (min {})", format_usd(o.min_investment)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(format!(
                    "Projected: {} daily | {} monthly | {} yearly",
                    format_usd(returns.daily),
                    format_usd(returns.monthly),
                    format_usd(returns.yearly)
                )),
                Line::from(Span::styled(
                    "a: enter amount | e/Enter: stake",
                    Style::default().fg(Color::Cyan),
                )),
            ]
        }
        None => vec![Line::from("No pools match the current filters")],
    };
    f.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Details ")),
        chunks[2],
    );
}

fn draw_liquidations(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new("Monitor at-risk positions for liquidation opportunities")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Liquidations "));
    f.render_widget(header, chunks[0]);

    let rows: Vec<Row> = state
        .liquidations
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.user.clone()),
                Cell::from(c.collateral.clone()),
                Cell::from(c.debt.clone()),
                Cell::from(format!("{:.2}", c.health_factor))
                    .style(Style::default().fg(liquidation_health_color(c.health_factor))),
                Cell::from(format_usd(c.liquidation_price)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(18),
        ],
    )
    .header(
        Row::new(vec!["User", "Collateral", "Debt", "Health Factor", "Liquidation Price"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold())
    .block(Block::default().borders(Borders::ALL).title(" At-Risk Positions "));

    let mut table_state = TableState::default().with_selected(Some(state.liquidations_selected));
    f.render_stateful_widget(table, chunks[1], &mut table_state);
}

fn draw_docs(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = Vec::new();
    for (title, body) in data::docs() {
        lines.push(Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())));
        lines.push(Line::from(body));
        lines.push(Line::from(""));
    }

    let docs = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.docs_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Docs "));
    f.render_widget(docs, area);
}

fn draw_settings(f: &mut Frame, state: &RenderState, area: Rect) {
    let settings = &state.settings;
    let mut items = vec![ListItem::new(format!("Theme: {}", settings.theme.as_str()))];
    items.extend(NotificationPref::ALL.iter().map(|pref| {
        let mark = if settings.notifications.get(*pref) { "[x]" } else { "[ ]" };
        ListItem::new(format!("{} {}", mark, pref.label()))
    }));

    let title = if state.settings_dirty {
        " Settings (unsaved, s to save) "
    } else {
        " Settings "
    };
    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ")
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut list_state = ListState::default().with_selected(Some(state.settings_selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = if state.input_mode == InputMode::Editing {
        if state.page == Page::Earn {
            " ESC/Enter:stop editing | type an amount "
        } else {
            " ESC/Enter:stop editing | type to search "
        }
    } else {
        match state.page {
            Page::Invest => " /:search | t:type | f:status | s:sort | Enter:open | ?:help | q:quit ",
            Page::Property => " +/-:quantity | b:buy | Esc:back | ?:help | q:quit ",
            Page::Earn => " r:risk | g:strategy | s:sort | a:amount | e:stake | ?:help | q:quit ",
            Page::Activity => " f:status | t:type | e:export | ?:help | q:quit ",
            Page::Settings => " Enter:toggle | s:save | ?:help | q:quit ",
            _ => " Tab:next page | w:connect | n:notifications | ?:help | q:quit ",
        }
    };

    let text = match &state.status_message {
        Some(msg) => format!(" {} |{}", msg, hint),
        None => hint.to_string(),
    };

    let bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_transaction_modal(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 50, area);
    let tx = &state.transaction;
    let config = status_config(tx.status);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", config.badge),
            Style::default().fg(Color::Black).bg(config.color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            tx.title.clone().unwrap_or_else(|| String::from("Transaction")),
            Style::default().bold(),
        )),
        Line::from(modal_body(tx)),
    ];

    if let Some(hash) = tx.visible_hash() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Transaction Hash",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(hash.to_string()));
        lines.push(Line::from(Span::styled(
            explorer_url(hash),
            Style::default().fg(Color::Cyan).underlined(),
        )));
    }

    lines.push(Line::from(""));
    let hint = if tx.status == TxStatus::Error && !state.can_retry {
        "Enter/Esc: close"
    } else {
        config.hint
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.color))
        .title(format!(" {} ", config.heading))
        .style(Style::default().bg(Color::Black));

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(modal, popup_area);
}

fn draw_notifications_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let items: Vec<ListItem> = if state.notifications.is_empty() {
        vec![ListItem::new("No notifications")]
    } else {
        state
            .notifications
            .iter()
            .map(|n| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        n.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(n.message.clone(), Style::default().fg(notification_color(n.kind))),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Notifications (d:dismiss c:clear Esc:close) ")
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 LOTWISE - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous page
   1-8                Jump to page
   ↑ / ↓  (k / j)     Move selection

 WALLET
   w                  Connect wallet
   x                  Disconnect wallet

 INVEST
   /                  Search by name or location
   t / f / s          Type / status filter, sort
   Enter              Open property
   + / -              Change quantity
   b                  Buy tokens

 EARN
   r / g / s          Risk / strategy filter, sort
   a                  Enter stake amount
   e / Enter          Stake the entered amount

 LIQUIDATIONS
   ↑ / ↓              Browse at-risk positions

 ACTIVITY
   f / t              Status / type filter
   e                  Export to JSON

 TRANSACTIONS
   Esc / Enter        Close finished transaction
   r                  Try a failed transaction again

 GENERAL
   n                  Notifications
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
