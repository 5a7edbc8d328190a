mod components;
mod engine;
mod scene;
mod systems;

use clap::Parser;
use components::{AiControl, PlayerControl};
use engine::input::InputState;
use engine::registry::Registry;
use engine::time::FrameTimer;
use engine::window::GameWindow;
use scene::board;
use systems::{
    ai_system, collision_system, control_system, facing_system, physics_system, render_system,
    world_system, RenderConfig,
};

#[derive(Parser)]
#[command(name = "pondbugs", about = "Top-down bug chase game")]
struct Args {
    /// Overlay the routes the AI is following
    #[arg(long)]
    draw_path: bool,
    /// Overlay the pathfinding obstacle grid
    #[arg(long)]
    draw_obstacles: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let sdl = sdl2::init().expect("Failed to init SDL2");
    let mut window = GameWindow::new(&sdl, "pondbugs", 700, 700);
    let mut event_pump = sdl.event_pump().expect("Failed to get event pump");

    let mut registry = Registry::new();
    board::load_board(&mut registry);
    let mut grid = board::obstacle_grid();
    log::info!(
        "board loaded: {} players, {} enemies",
        registry.ids::<PlayerControl>().len(),
        registry.ids::<AiControl>().len()
    );

    let config = RenderConfig {
        draw_path: args.draw_path,
        draw_obstacles: args.draw_obstacles,
    };
    let mut input = InputState::new();
    let mut timer = FrameTimer::new();
    // accumulated simulation time, drives AI path-cache aging
    let mut now: f32 = 0.0;

    let mut frames: u32 = 0;
    let mut frame_accum: f32 = 0.0;

    loop {
        timer.tick();
        let dt = timer.dt;
        now += dt;

        input.update(&mut event_pump);
        if input.quit {
            break;
        }

        world_system(&mut registry);
        control_system(&mut registry, &mut input);
        ai_system(&mut registry, &mut grid, now);
        collision_system(&mut registry);
        physics_system(&mut registry, dt);

        facing_system(&mut registry, dt);
        render_system(window.canvas_mut(), &registry, &grid, &config);
        window.present();

        frames += 1;
        frame_accum += dt;
        if frame_accum >= 1.0 {
            let fps = frames as f32 / frame_accum;
            let players = registry.ids::<PlayerControl>().len();
            let enemies = registry.ids::<AiControl>().len();
            window.set_title(&format!(
                "pondbugs | {fps:.0} fps | players {players} | enemies {enemies}"
            ));
            log::debug!("fps {fps:.1}, players {players}, enemies {enemies}");
            frames = 0;
            frame_accum = 0.0;
        }
    }
}
