mod app;
mod audio;
mod config;
mod game;
mod snake;

use ggez::{event, GameResult};

use crate::app::{App, Layout};
use crate::config::Config;

fn main() -> GameResult {
    let config = Config::load();
    let layout = Layout::new(&config);

    let window_setup = ggez::conf::WindowSetup::default()
        .title("Snake Game")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(layout.window_width, layout.window_height)
        .resizable(false);

    let (mut ctx, event_loop) = ggez::ContextBuilder::new("canvas-snake", "author")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = App::new(&mut ctx, &config, layout)?;
    event::run(ctx, event_loop, app)
}
