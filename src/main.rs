use arboard::Clipboard;
use macroquad::prelude::*;
use pathboard::action_log::{Action, ActionLog};
use pathboard::config::{Config, LoggingConfig};
use pathboard::{Board, BoardError, CellId, ContentType, Direction, EditOutcome, Layout};
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.toml";
const PANEL_WIDTH: f32 = 280.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(load_config)
}

/// Read the config, install tracing with its filter, then report how loading went
fn load_config() -> Config {
    let read = Config::read(CONFIG_PATH);
    let filter = match &read {
        Ok(config) => config.logging.filter.clone(),
        Err(_) => LoggingConfig::default().filter,
    };
    init_tracing(&filter);
    Config::or_default(CONFIG_PATH, read)
}

/// Install the fmt subscriber; `RUST_LOG` overrides the configured filter
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Presentation state around the board
struct GameState {
    board: Board,
    cell_size: f32,
    background: Color,
    show_paths: bool,
    show_grid: bool,
    action_log: ActionLog,
}

impl GameState {
    fn new(config: &Config) -> Result<Self, BoardError> {
        let board = Board::new(config.board.width, config.board.height)?;
        Ok(GameState {
            board,
            cell_size: config.visual.cell_size,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            show_paths: config.visual.show_paths,
            show_grid: config.visual.show_grid,
            action_log: ActionLog::new(),
        })
    }

    /// Resolve a screen position to a board cell; the top row on screen is the highest `y`
    fn pick_cell(&self, mouse_x: f32, mouse_y: f32) -> Result<CellId, BoardError> {
        let x = (mouse_x / self.cell_size).floor() as i32;
        let row = (mouse_y / self.cell_size).floor() as i32;
        let y = self.board.height() as i32 - 1 - row;
        self.board.get_cell(x, y)
    }

    fn cell_origin(&self, cell: CellId) -> (f32, f32) {
        let (x, y) = self.board.grid().coords(cell);
        let row = self.board.height() as i32 - 1 - y;
        (x as f32 * self.cell_size, row as f32 * self.cell_size)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let cell = match self.pick_cell(mouse_x, mouse_y) {
            Ok(cell) => cell,
            Err(e) => {
                debug!(error = %e, "click outside the board");
                return;
            }
        };
        let (x, y) = self.board.grid().coords(cell);

        // Left click: wall, right click: destination
        if is_mouse_button_pressed(MouseButton::Left) {
            let outcome = self.board.toggle_wall(cell);
            self.action_log.log_edit(Action::ToggleWall { x, y }, outcome);
            self.report(outcome, x, y);
        } else if is_mouse_button_pressed(MouseButton::Right) {
            let outcome = self.board.toggle_destination(cell);
            self.action_log
                .log_edit(Action::ToggleDestination { x, y }, outcome);
            self.report(outcome, x, y);
        }
    }

    fn report(&self, outcome: EditOutcome, x: i32, y: i32) {
        if outcome == EditOutcome::Rejected {
            info!(x, y, "edit would cut a cell off from every destination");
        }
    }

    fn toggle_paths(&mut self) {
        self.show_paths = !self.show_paths;
        self.action_log.log(Action::ShowPaths(self.show_paths), None);
    }

    fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        self.action_log.log(Action::ShowGrid(self.show_grid), None);
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.board.layout_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("layout copied to clipboard");
                    self.action_log.log(Action::CopyLayout, None);
                    // X11 loses the selection once its owner drops
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to read clipboard");
                return;
            }
        };
        let layout = match Layout::parse(&text) {
            Ok(layout) => layout,
            Err(e) => {
                warn!(error = %e, "clipboard does not hold a layout");
                return;
            }
        };
        match self.board.apply_layout(&layout) {
            Ok(report) => {
                info!(rejected = report.rejected.len(), "layout pasted");
                self.action_log.log(
                    Action::PasteLayout {
                        rejected: report.rejected.len(),
                    },
                    None,
                );
            }
            Err(e) => warn!(error = %e, "layout not applied"),
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        for cell in self.board.grid().cells() {
            let (px, py) = self.cell_origin(cell);
            let color = match self.board.content(cell) {
                ContentType::Empty => Color::from_rgba(70, 90, 70, 255),
                ContentType::Wall => Color::from_rgba(150, 150, 160, 255),
                ContentType::Destination => Color::from_rgba(220, 80, 60, 255),
            };
            draw_rectangle(px, py, self.cell_size, self.cell_size, color);

            if self.show_grid {
                draw_rectangle_lines(
                    px,
                    py,
                    self.cell_size,
                    self.cell_size,
                    1.0,
                    Color::from_rgba(20, 20, 20, 255),
                );
            }

            if self.show_paths && self.board.content(cell) == ContentType::Empty {
                if let Some(direction) = self.board.next_direction(cell) {
                    self.draw_arrow(px, py, direction);
                }
            }
        }

        let info = [
            format!(
                "Board: {}x{}  destinations: {}",
                self.board.width(),
                self.board.height(),
                self.board.destination_count()
            ),
            format!("Revision: {}", self.board.revision()),
            "Left click: toggle wall".to_string(),
            "Right click: toggle destination".to_string(),
            format!("V: path arrows ({})", on_off(self.show_paths)),
            format!("G: grid overlay ({})", on_off(self.show_grid)),
            "C: copy layout, P: paste layout".to_string(),
            "Esc: close window".to_string(),
        ];
        let left = self.board.width() as f32 * self.cell_size + 12.0;
        for (i, line) in info.iter().enumerate() {
            draw_text(line, left, 24.0 + i as f32 * 22.0, 20.0, WHITE);
        }
    }

    fn draw_arrow(&self, px: f32, py: f32, direction: Direction) {
        let (dx, dy) = direction.offset();
        // Screen y grows downwards, board y grows northwards
        let along = vec2(dx as f32, -dy as f32);
        let across = vec2(-along.y, along.x);
        let center = vec2(px + self.cell_size * 0.5, py + self.cell_size * 0.5);

        let tail = center - along * self.cell_size * 0.3;
        let tip = center + along * self.cell_size * 0.3;
        let base = center + along * self.cell_size * 0.1;
        let color = Color::from_rgba(240, 240, 240, 255);

        draw_line(tail.x, tail.y, base.x, base.y, 3.0, color);
        draw_triangle(
            tip,
            base + across * self.cell_size * 0.15,
            base - across * self.cell_size * 0.15,
            color,
        );
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn window_conf() -> Conf {
    let config = config();
    let board_width = config.board.width as f32 * config.visual.cell_size;
    let board_height = config.board.height as f32 * config.visual.cell_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (board_width + PANEL_WIDTH) as i32,
        window_height: board_height.max(220.0) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "cannot build board");
            return;
        }
    };

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right)
        {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::V) {
            state.toggle_paths();
        }
        if is_key_pressed(KeyCode::G) {
            state.toggle_grid();
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::P) {
            state.paste_from_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    info!("{}", state.action_log.summary());
    if config.logging.enable_action_log {
        if let Err(e) = state.action_log.save_to_file(&config.logging.action_log_path) {
            warn!(error = %e, "failed to save action log");
        }
    }
}
