use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Parse the lore corpus into the work queue, keeping prior decisions.
    Extract,
    /// Build locations.json from pinned entries and resolve cross-references.
    Finalize,
    /// Show the next pending entry and curation progress.
    Status,
    /// Pin an entry to the map.
    Pin(PinArgs),
    /// Mark an entry as not a map location.
    Skip(SkipArgs),
    /// Move the cursor to the first pending entry of a source file.
    Jump(JumpArgs),
    /// Undo the most recent pin or skip before the cursor.
    Back(BackArgs),
    /// Print the JSON Schema of a stored document.
    Schema(SchemaArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Finalize => "finalize",
            Self::Status => "status",
            Self::Pin(_) => "pin",
            Self::Skip(_) => "skip",
            Self::Jump(_) => "jump",
            Self::Back(_) => "back",
            Self::Schema(_) => "schema",
        }
    }

    /// Whether the command rewrites any document in the data directory.
    #[must_use]
    pub const fn writes_data(&self) -> bool {
        !matches!(self, Self::Status | Self::Schema(_))
    }
}

#[derive(Clone, Debug, Args)]
pub struct PinArgs {
    /// Entry id from the work queue.
    pub id: String,
    /// Map x coordinate in pixels.
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,
    /// Map y coordinate in pixels.
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
    /// Zoom level at which the location appears (1-5).
    #[arg(long)]
    pub zoom: u8,
    /// Location type: region, city, town, fortress, ruins, wilderness, water, poi.
    #[arg(long = "type")]
    pub location_type: String,
}

#[derive(Clone, Debug, Args)]
pub struct SkipArgs {
    /// Entry id from the work queue.
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct JumpArgs {
    /// Source file name, e.g. `Clueanda.md`.
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct BackArgs {
    /// Search for a decision strictly before this queue index.
    #[arg(long)]
    pub from: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Which stored document to describe.
    #[arg(value_enum)]
    pub document: SchemaDocument,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaDocument {
    WorkQueue,
    Pinned,
    Locations,
    Ambiguous,
}
