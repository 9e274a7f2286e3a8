//! Console Surface
//!
//! Headless presentation surface. Every update is applied to a shared
//! [`BoardView`] and emitted as a structured log event, so a terminal
//! session can follow the game and the runtime can inspect the board.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::{Colour, Envelope, GameId, Location, PresentationSurface, Ticket, TicketCounts};

/// One entry of the ticket-history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub ticket: Option<Ticket>,
    pub location: Option<Location>,
}

/// Current state of everything shown to the user.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub game_id: Option<GameId>,
    pub locations: BTreeMap<Colour, Location>,
    pub tickets: TicketCounts,
    /// Reveal flag per round
    pub rounds: Vec<bool>,
    pub current_round: u32,
    pub history: Vec<HistoryEntry>,
    pub setup_visible: bool,
    pub setup_message: Option<String>,
    pub games: Vec<Value>,
    pub selected_game: Option<GameId>,
    /// Whether the last turn was handed to the automated player
    pub turn_automated: Option<bool>,
    pub game_over: Option<Envelope>,
}

impl BoardView {
    pub fn ticket_count(&self, colour: Colour, ticket: Ticket) -> u32 {
        self.tickets
            .get(&colour)
            .and_then(|counts| counts.get(&ticket))
            .copied()
            .unwrap_or(0)
    }
}

/// Handle to a surface's board, readable after the surface is handed off.
pub type SharedView = Arc<RwLock<BoardView>>;

/// Presentation surface that logs to the console.
pub struct ConsoleSurface {
    view: SharedView,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        let view = BoardView {
            setup_visible: true,
            ..BoardView::default()
        };
        Self {
            view: Arc::new(RwLock::new(view)),
        }
    }

    /// Surface with a game already chosen for spectating.
    pub fn with_selected_game(game_id: Option<GameId>) -> Self {
        let surface = Self::new();
        surface.view.write().selected_game = game_id;
        surface
    }

    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    pub fn select_game(&mut self, game_id: GameId) {
        tracing::info!(game_id = %game_id, "Game selected for spectating");
        self.view.write().selected_game = Some(game_id);
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSurface for ConsoleSurface {
    fn show_game_id(&mut self, game_id: GameId) {
        tracing::info!(game_id = %game_id, "Game");
        self.view.write().game_id = Some(game_id);
    }

    fn set_player_locations(&mut self, locations: &BTreeMap<Colour, Location>) {
        for (colour, location) in locations {
            tracing::info!(colour = %colour, location, "Player location");
        }
        self.view.write().locations = locations.clone();
    }

    fn set_player_tickets(&mut self, tickets: &TicketCounts) {
        tracing::debug!(players = tickets.len(), "Player tickets");
        self.view.write().tickets = tickets.clone();
    }

    fn set_ticket_view(&mut self, rounds: &[bool], current_round: u32) {
        tracing::debug!(rounds = rounds.len(), current_round, "Ticket view");
        let mut view = self.view.write();
        view.rounds = rounds.to_vec();
        view.current_round = current_round;
        view.history.clear();
    }

    fn set_setup_view_visible(&mut self, visible: bool) {
        self.view.write().setup_visible = visible;
    }

    fn show_setup_message(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.view.write().setup_message = Some(message.to_string());
    }

    fn remove_ticket(&mut self, colour: Colour, ticket: Ticket) {
        let mut view = self.view.write();
        let count = view
            .tickets
            .entry(colour)
            .or_default()
            .entry(ticket)
            .or_insert(0);
        *count = count.saturating_sub(1);
        tracing::debug!(colour = %colour, ticket = ?ticket, remaining = *count, "Ticket used");
    }

    fn animate_player(&mut self, colour: Colour, location: Location) {
        tracing::info!(colour = %colour, location, "Player moved");
        self.view.write().locations.insert(colour, location);
    }

    fn update_ticket_view(&mut self, ticket: Option<Ticket>, location: Option<Location>) {
        tracing::info!(ticket = ?ticket, location = ?location, "Ticket history");
        let mut view = self.view.write();
        view.history.push(HistoryEntry { ticket, location });
        view.current_round += 1;
    }

    fn update_games_list(&mut self, games: &[Value]) {
        tracing::info!(count = games.len(), "Games available");
        self.view.write().games = games.to_vec();
    }

    fn set_game_over(&mut self, result: &Envelope) {
        tracing::info!(result = %result.as_value(), "Game over");
        self.view.write().game_over = Some(result.clone());
    }

    fn start_turn(&mut self, _turn: &Envelope, automated: bool) {
        if automated {
            tracing::info!("Turn handed to automated player");
        } else {
            tracing::info!("Your turn");
        }
        self.view.write().turn_automated = Some(automated);
    }

    fn selected_game(&self) -> Option<GameId> {
        self.view.read().selected_game
    }
}
