//! Command-line interface for map conversion and card dealing

use crate::classify::library::{ReferenceLibrary, has_image_extension};
use crate::color::palette::Palette;
use crate::deck::stack::CardStack;
use crate::io::configuration::{
    DEFAULT_SEED, DeckConfig, MapConfig, OVERLAY_ALPHA, OVERLAY_SUFFIX, TILE_COUNTS_SUFFIX,
    TILE_CROPS_SUFFIX, TILEMAP_SUFFIX,
};
use crate::io::error::{MapError, Result, file_system_error, invalid_input};
use crate::io::export::{save_overlay, save_tile_crops, write_tile_counts, write_tile_map};
use crate::io::gamelog::GameLog;
use crate::io::progress::ProgressManager;
use crate::spatial::tilemap::TileMapBuilder;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "maptiles")]
#[command(
    author,
    version,
    about = "Convert map screenshots into terrain tiles and deal card stacks"
)]
/// Command-line arguments for the tabletop aid
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Only report warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report per-run debugging details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or the command itself fails
    pub fn run(self) -> Result<()> {
        let show_progress = self.should_show_progress();
        match self.command {
            Command::Map(args) => MapProcessor::new(args, show_progress)?.process().map(|_| ()),
            Command::Deal(args) => DeckDealer::new(args)?.deal_all().map(|_| ()),
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Classify map images into tile maps and tile counts
    Map(MapArgs),
    /// Deal every card of the configured stacks in round-robin order
    Deal(DealArgs),
}

/// Arguments of the `map` subcommand
#[derive(Args)]
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct MapArgs {
    /// Map image or directory of map images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// JSON file with the palette and tile settings
    #[arg(short, long, default_value = "map2tiles.json")]
    pub config: PathBuf,

    /// Target number of tiles, overriding the configuration
    #[arg(short, long)]
    pub tiles: Option<usize>,

    /// Directory of labelled reference tiles, overriding the configuration
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Directory for outputs instead of next to each map
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the tile map over the source image
    #[arg(long)]
    pub overlay: bool,

    /// Also save every cell as its own image
    #[arg(long)]
    pub crops: bool,

    /// Process maps even if outputs exist
    #[arg(short, long)]
    pub no_skip: bool,
}

impl MapArgs {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

/// Arguments of the `deal` subcommand
#[derive(Args)]
pub struct DealArgs {
    /// JSON file describing the card stacks
    #[arg(short, long, default_value = "card_stacks.json")]
    pub config: PathBuf,

    /// Random seed for reproducible shuffles
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// File to write the game log to
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Output files written for one map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOutputs {
    /// Tile map table
    pub tilemap: PathBuf,
    /// Tile count table
    pub tile_counts: PathBuf,
    /// Overlay rendering
    pub overlay: PathBuf,
    /// Directory of tile crops
    pub crops: PathBuf,
}

impl MapOutputs {
    /// Output paths for `input`, placed in `output_dir` or beside the input
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        Self {
            tilemap: dir.join(format!("{stem}{TILEMAP_SUFFIX}")),
            tile_counts: dir.join(format!("{stem}{TILE_COUNTS_SUFFIX}")),
            overlay: dir.join(format!("{stem}{OVERLAY_SUFFIX}")),
            crops: dir.join(format!("{stem}{TILE_CROPS_SUFFIX}")),
        }
    }
}

/// Orchestrates classification of one or more map images
pub struct MapProcessor {
    args: MapArgs,
    palette: Palette,
    library: Option<ReferenceLibrary>,
    tile_number: usize,
    progress_manager: Option<ProgressManager>,
}

impl MapProcessor {
    /// Load configuration and reference data for a run
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, the palette is
    /// invalid or the reference library cannot be read
    pub fn new(args: MapArgs, show_progress: bool) -> Result<Self> {
        let config = MapConfig::from_json_file(&args.config)?;
        Self::with_config(args, &config, show_progress)
    }

    /// Prepare a run from an already loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is invalid or the reference library
    /// cannot be read
    pub fn with_config(args: MapArgs, config: &MapConfig, show_progress: bool) -> Result<Self> {
        let palette = config.palette()?;
        let tile_number = args.tiles.unwrap_or(config.tile_number);

        let library_dir = args
            .library
            .clone()
            .or_else(|| config.library_directory.clone());
        let library = library_dir
            .map(|dir| ReferenceLibrary::from_directory(dir, &palette))
            .transpose()?;

        let progress_manager = show_progress.then(ProgressManager::new);

        Ok(Self {
            args,
            palette,
            library,
            tile_number,
            progress_manager,
        })
    }

    /// Process every selected map
    ///
    /// Returns the outputs of the maps that were processed.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or any map fails
    pub fn process(&mut self) -> Result<Vec<MapOutputs>> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut outputs = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            outputs.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        Ok(outputs)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            if !has_image_extension(target) {
                return Err(invalid_input(
                    "target",
                    &target.display(),
                    &"target file must be an image",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(target).map_err(|e| file_system_error(target, "list maps", e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(target, "list maps", e))?
                    .path();
                if path.is_file() && has_image_extension(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_input(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }
        let outputs = MapOutputs::for_input(input_path, self.args.output.as_deref());
        if outputs.tilemap.exists() && outputs.tile_counts.exists() {
            log::warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<MapOutputs> {
        let start_time = Instant::now();
        let outputs = MapOutputs::for_input(input_path, self.args.output.as_deref());

        let image = image::open(input_path)
            .map_err(|e| MapError::ImageLoad {
                path: input_path.to_path_buf(),
                source: e,
            })?
            .to_rgb8();

        let builder = TileMapBuilder::new(&self.palette, self.library.as_ref(), self.tile_number);
        let shape = builder.shape_for(&image)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, shape.cell_count());
        }

        let progress = &mut self.progress_manager;
        let tile_map = builder.build_with_progress(&image, |done, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_cells(index, done);
            }
        })?;

        write_tile_map(&tile_map, &outputs.tilemap)?;
        let counts = tile_map.tile_counts(&self.palette);
        write_tile_counts(&counts, &self.palette, &outputs.tile_counts)?;

        if self.args.overlay {
            save_overlay(
                &image,
                &tile_map,
                &self.palette,
                OVERLAY_ALPHA,
                &outputs.overlay,
            )?;
        }
        if self.args.crops {
            save_tile_crops(&image, shape, &outputs.crops)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        log::info!(
            "Classified {} into {}x{} tiles in {:.2?}",
            input_path.display(),
            shape.x_tiles,
            shape.y_tiles,
            start_time.elapsed()
        );

        Ok(outputs)
    }
}

/// Deals configured card stacks until every stack is exhausted
pub struct DeckDealer {
    stacks: Vec<CardStack>,
    log_path: Option<PathBuf>,
}

impl DeckDealer {
    /// Load and shuffle the configured stacks
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or a stack
    /// holds no cards
    pub fn new(args: DealArgs) -> Result<Self> {
        let config = DeckConfig::from_json_file(&args.config)?;
        Self::with_config(&config, args.seed, args.log)
    }

    /// Shuffle stacks from an already loaded configuration
    ///
    /// Each stack is seeded with `seed` offset by its position so stacks
    /// with identical contents still shuffle differently.
    ///
    /// # Errors
    ///
    /// Returns an error if a stack holds no cards
    pub fn with_config(config: &DeckConfig, seed: u64, log_path: Option<PathBuf>) -> Result<Self> {
        let stacks = config
            .stacks
            .iter()
            .zip(0u64..)
            .map(|(stack, offset)| CardStack::from_config(stack, seed.wrapping_add(offset)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { stacks, log_path })
    }

    /// Stacks in configuration order
    pub fn stacks(&self) -> &[CardStack] {
        &self.stacks
    }

    /// Deal round-robin until no stack has cards left, recording each card
    ///
    /// # Errors
    ///
    /// Returns an error if the game log cannot be written
    // Dealt cards are the command's output
    #[allow(clippy::print_stdout)]
    pub fn deal_all(&mut self) -> Result<GameLog> {
        let mut game_log = GameLog::new().record(["<<<< Dealing card stacks >>>>"]);

        while self.stacks.iter().any(|stack| !stack.is_exhausted()) {
            for stack in self.stacks.iter_mut().filter(|stack| !stack.is_exhausted()) {
                let card = stack.deal();
                let text = stack.describe(card).unwrap_or_default();
                println!("\n[{}]\n{text}", stack.name());
                game_log = game_log.record([String::new(), format!("[{}]", stack.name()), text]);
            }
        }

        if let Some(ref path) = self.log_path {
            game_log.write_to(path)?;
            log::info!("Wrote game log to {}", path.display());
        }
        Ok(game_log)
    }
}
