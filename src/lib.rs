pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod models;
pub mod parser;
pub mod poller;
pub mod renderer;
pub mod serial;

use crate::config::AppConfig;
use crate::poller::{Poller, TickOutcome};
use crate::renderer::fonts::Fonts;
use crate::serial::{LineSource, SerialLineSource};
use anyhow::Context;
use log::{debug, info, warn};
use std::time::Instant;
use tokio::time::MissedTickBehavior;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting application");

    let source = SerialLineSource::open(&config.serial)?;
    let mut poller = Poller::new(source);

    let result = main_loop(&config, &mut poller).await;

    // Dropping the poller closes the port on every exit path.
    drop(poller);

    result.context("Application failed to run")?;
    info!("Application completed successfully");
    Ok(())
}

async fn main_loop<S: LineSource>(config: &AppConfig, poller: &mut Poller<S>) -> anyhow::Result<()> {
    let fonts = match Fonts::load(&config.dashboard.font) {
        Ok(fonts) => Some(fonts),
        Err(e) => {
            warn!("Labels will not be drawn: {e:#}");
            None
        }
    };

    let mut poll = tokio::time::interval(config.serial.poll_interval());
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frame = tokio::time::interval(config.dashboard.frame_interval());
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                match poller.tick().context("Failed to read from serial port")? {
                    TickOutcome::Updated(kind) => debug!("Updated {kind}"),
                    TickOutcome::Idle | TickOutcome::Dropped(_) => {}
                }
            }
            _ = frame.tick() => {
                render_frame(config, poller.dashboard_mut(), fonts.as_ref());
            }
            _ = &mut shutdown => {
                info!("Shutdown requested");
                poller.dashboard_mut().cancel_highlights();
                return Ok(());
            }
        }
    }
}

fn render_frame(config: &AppConfig, state: &mut dashboard::DashboardState, fonts: Option<&Fonts>) {
    let now = Instant::now();
    if !state.needs_redraw(now) {
        return;
    }

    let image = dashboard::create_image(config, state, fonts, now);
    state.mark_drawn(now);

    if config.dashboard.save_to_file {
        if let Err(e) = dashboard::save_image(config, &image) {
            warn!("{e:#}");
        }
    }
}
