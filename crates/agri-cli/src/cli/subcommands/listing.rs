use agri_publish::ImageSource;
use clap::{Args, Subcommand};

/// Listing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ListingCommands {
    /// Upload photos and publish a new listing.
    Create(ListingCreateArgs),
    /// List your listings, newest first.
    List,
    /// Delete one of your listings.
    Delete {
        /// Listing ID.
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ListingCreateArgs {
    #[arg(long)]
    pub nomenclature: String,
    #[arg(long)]
    pub classification: Option<String>,
    /// Asking price; non-digit characters are dropped.
    #[arg(long)]
    pub price: String,
    #[arg(long)]
    pub narrative: Option<String>,
    /// Photo path, in upload order. Prefix with `camera:` for captured
    /// photos (default `gallery:`). Repeat up to 10 times.
    #[arg(long = "image", value_name = "PATH", value_parser = parse_image)]
    pub images: Vec<ImageArg>,
    /// Do not certify provenance.
    #[arg(long)]
    pub no_provenance: bool,
    /// Logistics are provided by the seller.
    #[arg(long)]
    pub logistics: bool,
}

#[derive(Clone, Debug)]
pub struct ImageArg {
    pub source: ImageSource,
    pub path: String,
}

fn parse_image(raw: &str) -> Result<ImageArg, String> {
    let (source, path) = if let Some(path) = raw.strip_prefix("camera:") {
        (ImageSource::Camera, path)
    } else if let Some(path) = raw.strip_prefix("gallery:") {
        (ImageSource::Gallery, path)
    } else {
        (ImageSource::Gallery, raw)
    };
    if path.trim().is_empty() {
        return Err("image path is empty".into());
    }
    Ok(ImageArg {
        source,
        path: path.to_string(),
    })
}
