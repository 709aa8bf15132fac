use anyhow::Result;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Dungeon Walker...");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load(config_path.as_deref())?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let loader = AssetLoader::new(&config.asset_dir);
    let mut game = Game::load(&config, &loader, |path| renderer.load_texture(path))?;
    info!(
        "{} textures loaded from {}",
        renderer.texture_manager().texture_count(),
        loader.base_path().display()
    );
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::Focused(false) => {
                    for edge in input.reset() {
                        game.handle_input(edge);
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(edge) = input.process_keyboard_event(&event) {
                        game.handle_input(edge);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        if let Err(e) = game.update(game_loop.fixed_timestep()) {
                            error!("Game stopped: {}", e);
                            elwt.exit();
                            return;
                        }
                    }

                    match renderer.render(&game.draw_list()) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("GPU out of memory, shutting down");
                            elwt.exit();
                        }
                        Err(e) => warn!("Dropped frame: {}", e),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
