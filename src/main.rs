// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
mod capture;
mod config;
mod display;
mod mapping;
mod osc;
mod skeleton;
#[cfg(test)]
mod testutil;
mod tracker;

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{crate_version, Parser, Subcommand};
use mapping::NoteMap;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A skeleton-tracking OSC controller."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the available capture devices.
    Devices {},
    /// Computes and prints the 12-region note map for a scale configuration.
    NoteMap {
        /// The scale kind: Diatonic, Pentatonic, or Chromatic.
        scale: String,
        /// The tonality: Major or Minor. Ignored for Chromatic.
        tonality: String,
        /// The key name, e.g. C, F#, Bb.
        key: String,
        /// The octave offset.
        octave: i32,
    },
    /// Starts the tracker with the given configuration.
    Start {
        /// The path to the tracker config.
        config_path: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Devices {} => {
            let devices = capture::list_devices();

            if devices.is_empty() {
                println!("No devices found.");
                return Ok(());
            }

            println!("Devices:");
            for device in devices {
                println!("- {}", device);
            }
        }
        Commands::NoteMap {
            scale,
            tonality,
            key,
            octave,
        } => {
            let map = NoteMap::from_names(&scale, &tonality, &key, octave)?;

            println!("Note map ({} {} {} {}):", scale, tonality, key, octave);
            for (region, note) in map.notes().iter().enumerate() {
                println!("- region {:>2}: note {}", region, note);
            }
        }
        Commands::Start { config_path } => {
            let config = config::load_tracker(&PathBuf::from(config_path))?;
            let tracker = config::init_tracker(&config)?;

            tracker.begin_tracking()?;
            println!("Tracking. Press enter to stop.");

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;

            tracker.stop_tracking()?;
            tracker.close_device()?;
        }
    }

    Ok(())
}
