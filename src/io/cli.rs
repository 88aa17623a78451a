//! Command-line interface for editing and inspecting saved overlays

use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_SAVE_DIR, DEFAULT_WIDTH,
};
use crate::io::error::Result;
use crate::io::store::FileStore;
use crate::io::visualization::LabelVisual;
use crate::math::Vector3;
use crate::overlay::{Highlight, TileOverlay};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tilegrid")]
#[command(author, version, about = "Edit and inspect saved movement overlays")]
/// Command-line arguments for the overlay tool
pub struct Cli {
    /// Directory holding snapshot files
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_SAVE_DIR)]
    pub save_dir: PathBuf,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Edge length of one cell in world units
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: f64,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Overlay operations
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Mark cells as move targets on top of the latest save, then save
    Highlight {
        /// Cell index as `X,Z`; repeatable
        #[arg(short, long = "cell", value_name = "X,Z", value_parser = parse_cell)]
        cells: Vec<(i32, i32)>,

        /// World position as `X,Z` or `X,Y,Z`; repeatable
        #[arg(short, long = "world", value_name = "POS", value_parser = parse_world)]
        world: Vec<Vector3>,

        /// Clear every cell before applying the new highlights
        #[arg(long)]
        clear: bool,
    },
    /// Clear every highlight and save
    Clear,
    /// Load the latest save and log it as text
    Show,
}

impl Cli {
    /// Build an empty overlay with the requested shape
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the shape is rejected
    pub fn overlay(&self) -> Result<TileOverlay> {
        TileOverlay::new(self.width, self.height, self.cell_size, Vector3::ZERO)
    }
}

/// Parse a cell index given as `X,Z`
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_cell(text: &str) -> std::result::Result<(i32, i32), String> {
    let parts = split_components(text);
    match parts.as_slice() {
        [x, z] => {
            let x = x
                .parse()
                .map_err(|error| format!("invalid x index '{x}': {error}"))?;
            let z = z
                .parse()
                .map_err(|error| format!("invalid z index '{z}': {error}"))?;
            Ok((x, z))
        }
        _ => Err(format!("expected X,Z but got '{text}'")),
    }
}

/// Parse a world position given as `X,Z` (ground plane) or `X,Y,Z`
///
/// # Errors
///
/// Returns a message if the text is not two or three comma-separated numbers
pub fn parse_world(text: &str) -> std::result::Result<Vector3, String> {
    let values = split_components(text)
        .into_iter()
        .map(|part| {
            part.parse::<f64>()
                .map_err(|error| format!("invalid coordinate '{part}': {error}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [x, z] => Ok(Vector3::ground(*x, *z)),
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected X,Z or X,Y,Z but got '{text}'")),
    }
}

fn split_components(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}

/// Runs one CLI command against a snapshot directory
pub struct SessionRunner {
    cli: Cli,
    store: FileStore,
}

impl SessionRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let store = FileStore::new(cli.save_dir.clone());
        Self { cli, store }
    }

    /// Execute the command and return the overlay rendered as text
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay shape is invalid, a snapshot cannot
    /// be read or written, or `show` finds no snapshot
    pub fn run(&mut self) -> Result<String> {
        let mut overlay = self.cli.overlay()?;
        let mut visual = LabelVisual::new();
        overlay.bind_visual(&mut visual);

        match self.cli.command.clone() {
            Command::Highlight {
                cells,
                world,
                clear,
            } => {
                self.restore(&mut overlay)?;
                if clear {
                    overlay.set_all(Highlight::None);
                }
                for (x, z) in cells {
                    if let Err(error) = overlay.try_set_highlight(x, z, Highlight::Move) {
                        warn!(%error, "skipping cell");
                    }
                }
                for position in world {
                    let (x, z) = overlay.grid().world_to_cell(position);
                    if let Err(error) = overlay.try_set_highlight(x, z, Highlight::Move) {
                        warn!(%position, %error, "skipping world position");
                    }
                }
                self.save(&overlay)?;
            }
            Command::Clear => {
                overlay.set_all(Highlight::None);
                self.save(&overlay)?;
            }
            Command::Show => {
                overlay.load_latest(&self.store)?;
            }
        }

        visual.refresh(&overlay);
        let rendered = visual.render();
        info!("overlay:\n{rendered}");
        Ok(rendered)
    }

    // A missing save means a first run; start from a cleared overlay
    fn restore(&self, overlay: &mut TileOverlay) -> Result<()> {
        match overlay.load_latest(&self.store) {
            Err(error) if error.is_not_found() => {
                info!(dir = %self.store.dir().display(), "no saved overlay, starting empty");
                Ok(())
            }
            other => other,
        }
    }

    fn save(&mut self, overlay: &TileOverlay) -> Result<()> {
        let id = overlay.save_to(&mut self.store)?;
        info!(path = %self.store.path_for(id).display(), "saved overlay");
        Ok(())
    }
}
