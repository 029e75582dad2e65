/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! play a tour on an in-memory surface and log what the animation does.
//! Use RUST_LOG to control the log level (default is info), e.g.
//! ```sh
//! RUST_LOG=debug play_tour --once --geojson /tmp/tour.json
//! ```

use std::path::PathBuf;
use tokio::time::{sleep, Instant};
use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wayfarer_common::{config::find_config_file, datetime::{parse_duration_str, secs}};
use wayfarer_common::info;
use wayfarer_anim::{spawn_animation, Animation, AnimationConfig, DriverState, Playback, RecordingSurface, Tour};
use wayfarer_anim::export::{snapshot_geojson, write_geojson};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "animate a marker along a tour of waypoints")]
struct Args {
    /// animation config (RON). Defaults to configs/animation.ron if it exists
    #[arg(short,long)]
    config: Option<PathBuf>,

    /// tour definition (RON). Defaults to the builtin tour
    #[arg(short,long)]
    tour: Option<PathBuf>,

    /// how long to play, e.g. "30s"
    #[arg(short,long, default_value = "10s")]
    duration: String,

    /// stop after the last sub-path instead of looping
    #[arg(long)]
    once: bool,

    /// write a GeoJSON snapshot of the surface before disposing the animation
    #[arg(long)]
    geojson: Option<PathBuf>,
}

fn load_animation_config (args: &Args) -> Result<AnimationConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => find_config_file( ".", "animation.ron")
    };
    let mut config = match path {
        Some(path) => { info!("using config {:?}", path); AnimationConfig::load( path)? }
        None => AnimationConfig::default()
    };
    if args.once { config.playback = Playback::Once }
    Ok(config)
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let duration = parse_duration_str( &args.duration).ok_or_else( || anyhow!("invalid duration {}", args.duration))?;
    let config = load_animation_config( &args)?;
    let tour = match &args.tour {
        Some(path) => Tour::load( path)?,
        None => Tour::builtin()
    };

    let animation = Animation::new( &tour, config, RecordingSurface::new());
    let mut handle = spawn_animation( animation)?;

    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        sleep( secs(1)).await;

        let (cursor, state, visited, live) = handle.query( |a| {
            (*a.cursor(), a.state(), a.visited().to_vec(), a.surface().map( |s| s.live_count()).unwrap_or(0))
        }).await?;
        info!("sub-path {} point {} {:?}, visited: {:?}, live renderings: {}", cursor.sub_path, cursor.point, state, visited, live);

        if state == DriverState::Finished { break }
    }

    if let Some(path) = &args.geojson {
        if let Some(fc) = handle.query( |a| a.surface().map( snapshot_geojson)).await? {
            write_geojson( path, fc)?;
            info!("snapshot written to {:?}", path);
        }
    }

    if let Some(animation) = handle.dispose().await {
        let live = animation.surface().map( |s| s.live_count()).unwrap_or(0);
        info!("played {} loops, {} renderings left after dispose", animation.loops_completed(), live);
    }
    Ok(())
}
