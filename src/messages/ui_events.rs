//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::messages::RenderState;
use crate::transaction::TxStatus;

/// Application pages
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Invest,
    Property,
    Portfolio,
    Activity,
    Earn,
    Liquidations,
    Docs,
    Settings,
}

impl Page {
    /// Pages reachable from the tab bar, in order
    pub const TABS: [Page; 8] = [
        Page::Dashboard,
        Page::Invest,
        Page::Portfolio,
        Page::Activity,
        Page::Earn,
        Page::Liquidations,
        Page::Docs,
        Page::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Invest => "Invest",
            Page::Property => "Property",
            Page::Portfolio => "Portfolio",
            Page::Activity => "Activity",
            Page::Earn => "Earn",
            Page::Liquidations => "Liquidations",
            Page::Docs => "Docs",
            Page::Settings => "Settings",
        }
    }

    /// Position in the tab bar; the property page sits under Invest
    pub fn tab_index(&self) -> usize {
        match self {
            Page::Property => 1,
            page => Page::TABS.iter().position(|p| p == page).unwrap_or(0),
        }
    }

    pub fn next(&self) -> Page {
        Page::TABS[(self.tab_index() + 1) % Page::TABS.len()]
    }

    pub fn prev(&self) -> Page {
        Page::TABS[(self.tab_index() + Page::TABS.len() - 1) % Page::TABS.len()]
    }

    /// Pages that show a connect prompt while no wallet is connected
    pub fn requires_wallet(&self) -> bool {
        matches!(
            self,
            Page::Portfolio | Page::Activity | Page::Liquidations | Page::Settings
        )
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SwitchPage(Page),
    NextPage,
    PrevPage,
    SelectNext,
    SelectPrev,
    OpenSelected,
    Back,

    // Search input
    StartSearch,
    StopEditing,
    CharInput(char),
    Backspace,

    // Filters
    CycleTypeFilter,
    CycleStatusFilter,
    CycleSort,
    CycleRiskFilter,
    CycleStrategyFilter,
    CycleKindFilter,

    // Transactions
    IncreaseQuantity,
    DecreaseQuantity,
    BuyTokens,
    EditAmount,
    StartEarning,
    ConnectWallet,
    DisconnectWallet,
    CloseTransaction,
    RetryTransaction,

    // Settings and activity
    ToggleSetting,
    SaveSettings,
    ExportActivity,

    // Popups
    ToggleNotifications,
    DismissNotification,
    ClearNotifications,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the key mapper needs to know about the screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyContext {
    pub page: Page,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_notifications: bool,
    /// Phase of the transaction modal, if it is open
    pub modal: Option<TxStatus>,
}

impl From<&RenderState> for KeyContext {
    fn from(state: &RenderState) -> Self {
        KeyContext {
            page: state.page,
            input_mode: state.input_mode,
            show_help: state.show_help,
            show_notifications: state.show_notifications,
            modal: state.transaction.is_open.then_some(state.transaction.status),
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // The transaction modal captures input; it can only be dismissed once finished
    if let Some(status) = ctx.modal {
        if !status.is_terminal() {
            return None;
        }
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') => Some(UiEvent::CloseTransaction),
            KeyCode::Char('r') if status == TxStatus::Error => Some(UiEvent::RetryTransaction),
            _ => None,
        };
    }

    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    if ctx.show_notifications {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('n') => Some(UiEvent::ToggleNotifications),
            KeyCode::Char('d') => Some(UiEvent::DismissNotification),
            KeyCode::Char('c') => Some(UiEvent::ClearNotifications),
            _ => None,
        };
    }

    if ctx.input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('n') => return Some(UiEvent::ToggleNotifications),
        KeyCode::Char('w') => return Some(UiEvent::ConnectWallet),
        KeyCode::Char('x') => return Some(UiEvent::DisconnectWallet),
        KeyCode::Tab => return Some(UiEvent::NextPage),
        KeyCode::BackTab => return Some(UiEvent::PrevPage),
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            return Some(UiEvent::SwitchPage(Page::TABS[index]));
        }
        KeyCode::Up | KeyCode::Char('k') => return Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => return Some(UiEvent::SelectNext),
        _ => {}
    }

    match ctx.page {
        Page::Invest => match key.code {
            KeyCode::Enter => Some(UiEvent::OpenSelected),
            KeyCode::Char('/') => Some(UiEvent::StartSearch),
            KeyCode::Char('t') => Some(UiEvent::CycleTypeFilter),
            KeyCode::Char('f') => Some(UiEvent::CycleStatusFilter),
            KeyCode::Char('s') => Some(UiEvent::CycleSort),
            _ => None,
        },
        Page::Property => match key.code {
            KeyCode::Esc | KeyCode::Backspace => Some(UiEvent::Back),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                Some(UiEvent::IncreaseQuantity)
            }
            KeyCode::Char('-') | KeyCode::Left => Some(UiEvent::DecreaseQuantity),
            KeyCode::Char('b') | KeyCode::Enter => Some(UiEvent::BuyTokens),
            _ => None,
        },
        Page::Earn => match key.code {
            KeyCode::Enter | KeyCode::Char('e') => Some(UiEvent::StartEarning),
            KeyCode::Char('a') => Some(UiEvent::EditAmount),
            KeyCode::Char('r') => Some(UiEvent::CycleRiskFilter),
            KeyCode::Char('g') => Some(UiEvent::CycleStrategyFilter),
            KeyCode::Char('s') => Some(UiEvent::CycleSort),
            _ => None,
        },
        Page::Activity => match key.code {
            KeyCode::Char('f') => Some(UiEvent::CycleStatusFilter),
            KeyCode::Char('t') => Some(UiEvent::CycleKindFilter),
            KeyCode::Char('e') => Some(UiEvent::ExportActivity),
            _ => None,
        },
        Page::Settings => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleSetting),
            KeyCode::Char('s') => Some(UiEvent::SaveSettings),
            _ => None,
        },
        Page::Dashboard | Page::Portfolio | Page::Liquidations | Page::Docs => None,
    }
}
