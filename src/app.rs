use std::time::Instant;

use ggez::audio::SoundSource;
use ggez::event::EventHandler;
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::input::mouse::MouseButton;
use ggez::mint::Point2;
use ggez::{graphics, Context, GameResult};

use crate::audio::Sounds;
use crate::config::Config;
use crate::game::{Game, GameState, TickOutcome};
use crate::snake::{Cell, Direction};

const CONTROL_STRIP_HEIGHT: f32 = 50.0;
const STATUS_BAR_HEIGHT: f32 = 50.0;
const BUTTON_WIDTH: f32 = 90.0;
const BUTTON_HEIGHT: f32 = 30.0;
const BUTTON_GAP: f32 = 8.0;

// Colors
const BACKGROUND_COLOR: graphics::Color = graphics::Color::BLACK;
const SNAKE_COLOR: graphics::Color = graphics::Color::new(0.0, 1.0, 0.0, 1.0);
const FOOD_COLOR: graphics::Color = graphics::Color::RED;
const BEST_SCORE_COLOR: graphics::Color = graphics::Color::new(1.0, 0.843, 0.0, 1.0);
const START_COLOR: graphics::Color = graphics::Color::new(0.565, 0.933, 0.565, 1.0);
const STOP_COLOR: graphics::Color = graphics::Color::new(1.0, 0.0, 0.0, 1.0);
const RESUME_COLOR: graphics::Color = graphics::Color::new(0.678, 0.847, 0.902, 1.0);
const RESTART_COLOR: graphics::Color = graphics::Color::new(1.0, 0.647, 0.0, 1.0);

/// Window geometry: a control strip on top, the play area below it and a
/// status line for the scores at the bottom.
pub struct Layout {
    pub window_width: f32,
    pub window_height: f32,
    board: graphics::Rect,
    status_y: f32,
    cell: f32,
}

impl Layout {
    pub fn new(config: &Config) -> Self {
        let play_width = config.play_width as f32;
        let play_height = config.play_height as f32;
        Layout {
            window_width: play_width,
            window_height: CONTROL_STRIP_HEIGHT + play_height + STATUS_BAR_HEIGHT,
            board: graphics::Rect::new(0.0, CONTROL_STRIP_HEIGHT, play_width, play_height),
            status_y: CONTROL_STRIP_HEIGHT + play_height + 14.0,
            cell: config.cell_size as f32,
        }
    }

    fn cell_rect(&self, cell: Cell) -> graphics::Rect {
        graphics::Rect::new(
            self.board.x + cell.x as f32 * self.cell,
            self.board.y + cell.y as f32 * self.cell,
            self.cell,
            self.cell,
        )
    }

    fn cell_center(&self, cell: Cell) -> Point2<f32> {
        let rect = self.cell_rect(cell);
        Point2 {
            x: rect.x + rect.w / 2.0,
            y: rect.y + rect.h / 2.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Command {
    Start,
    Stop,
    Resume,
    Restart,
}

struct Button {
    label: &'static str,
    rect: graphics::Rect,
    color: graphics::Color,
    command: Command,
}

struct ControlPanel {
    buttons: [Button; 4],
}

impl ControlPanel {
    fn new() -> Self {
        let place = |i: usize| {
            graphics::Rect::new(
                10.0 + i as f32 * (BUTTON_WIDTH + BUTTON_GAP),
                (CONTROL_STRIP_HEIGHT - BUTTON_HEIGHT) / 2.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            )
        };
        ControlPanel {
            buttons: [
                Button {
                    label: "Start",
                    rect: place(0),
                    color: START_COLOR,
                    command: Command::Start,
                },
                Button {
                    label: "Stop",
                    rect: place(1),
                    color: STOP_COLOR,
                    command: Command::Stop,
                },
                Button {
                    label: "Resume",
                    rect: place(2),
                    color: RESUME_COLOR,
                    command: Command::Resume,
                },
                Button {
                    label: "Restart",
                    rect: place(3),
                    color: RESTART_COLOR,
                    command: Command::Restart,
                },
            ],
        }
    }

    fn hit(&self, x: f32, y: f32) -> Option<Command> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(Point2 { x, y }))
            .map(|button| button.command)
    }
}

pub struct App {
    game: Game,
    layout: Layout,
    panel: ControlPanel,
    sounds: Sounds,
}

impl App {
    pub fn new(ctx: &mut Context, config: &Config, layout: Layout) -> GameResult<Self> {
        Ok(App {
            game: Game::new(config.grid(), config.tick_interval()),
            layout,
            panel: ControlPanel::new(),
            sounds: Sounds::new(ctx, config.volume)?,
        })
    }

    fn run_command(&mut self, command: Command) {
        let now = Instant::now();
        match command {
            Command::Start => self.game.on_start(now),
            Command::Stop => self.game.on_stop(),
            Command::Resume => self.game.on_resume(now),
            Command::Restart => self.game.on_restart(now),
        }
    }

    fn draw_controls(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        for button in &self.panel.buttons {
            canvas.draw(
                &graphics::Mesh::new_rectangle(
                    ctx,
                    graphics::DrawMode::fill(),
                    button.rect,
                    button.color,
                )?,
                graphics::DrawParam::default(),
            );

            let mut label = graphics::Text::new(button.label);
            label.set_scale(18.0);
            canvas.draw(
                &label,
                graphics::DrawParam::default()
                    .dest(Point2 {
                        x: button.rect.x + 14.0,
                        y: button.rect.y + 6.0,
                    })
                    .color(graphics::Color::BLACK),
            );
        }
        Ok(())
    }

    fn draw_board(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        for cell in self.game.snake().cells() {
            canvas.draw(
                &graphics::Mesh::new_rectangle(
                    ctx,
                    graphics::DrawMode::fill(),
                    self.layout.cell_rect(cell),
                    SNAKE_COLOR,
                )?,
                graphics::DrawParam::default(),
            );
        }

        canvas.draw(
            &graphics::Mesh::new_circle(
                ctx,
                graphics::DrawMode::fill(),
                self.layout.cell_center(self.game.food()),
                self.layout.cell / 2.0,
                0.1,
                FOOD_COLOR,
            )?,
            graphics::DrawParam::default(),
        );
        Ok(())
    }

    fn draw_status(&self, canvas: &mut graphics::Canvas) {
        let mut score_text = graphics::Text::new(format!("Score: {}", self.game.score()));
        score_text.set_scale(22.0);
        canvas.draw(
            &score_text,
            graphics::DrawParam::default()
                .dest(Point2 {
                    x: 12.0,
                    y: self.layout.status_y,
                })
                .color(graphics::Color::WHITE),
        );

        let mut best_text = graphics::Text::new(format!("Best Score: {}", self.game.best_score()));
        best_text.set_scale(22.0);
        canvas.draw(
            &best_text,
            graphics::DrawParam::default()
                .dest(Point2 {
                    x: self.layout.window_width - 200.0,
                    y: self.layout.status_y,
                })
                .color(BEST_SCORE_COLOR),
        );
    }

    fn draw_game_over(&self, canvas: &mut graphics::Canvas) {
        let mut text = graphics::Text::new("GAME OVER");
        text.set_scale(48.0);
        canvas.draw(
            &text,
            graphics::DrawParam::default()
                .dest(Point2 {
                    x: self.layout.board.x + self.layout.board.w / 2.0 - 120.0,
                    y: self.layout.board.y + self.layout.board.h / 2.0 - 24.0,
                })
                .color(graphics::Color::WHITE),
        );
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        match self.game.poll(Instant::now()) {
            TickOutcome::Ate => self.sounds.eat.play_detached(ctx)?,
            TickOutcome::Crashed => self.sounds.game_over.play_detached(ctx)?,
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND_COLOR);

        self.draw_controls(ctx, &mut canvas)?;
        self.draw_board(ctx, &mut canvas)?;
        self.draw_status(&mut canvas);
        if self.game.state() == GameState::GameOver {
            self.draw_game_over(&mut canvas);
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        if let Some(direction) = direction_for_key(input.keycode) {
            self.game.on_key(direction);
        }
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        if button == MouseButton::Left {
            if let Some(command) = self.panel.hit(x, y) {
                self.run_command(command);
            }
        }
        Ok(())
    }
}

fn direction_for_key(keycode: Option<KeyCode>) -> Option<Direction> {
    match keycode? {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}
