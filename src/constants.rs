//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "leafy";

/// Model input contract.
pub mod model_input {
    /// Batch dimension of the input tensor.
    pub const BATCH: usize = 1;
    /// Input raster height in pixels.
    pub const HEIGHT: u32 = 224;
    /// Input raster width in pixels.
    pub const WIDTH: u32 = 224;
    /// RGB channel count.
    pub const CHANNELS: usize = 3;
    /// Full NHWC input shape.
    #[allow(clippy::cast_possible_truncation)]
    pub const SHAPE: [usize; 4] = [BATCH, HEIGHT as usize, WIDTH as usize, CHANNELS];
    /// JPEG quality used when re-encoding the resized photo.
    pub const JPEG_QUALITY: u8 = 70;
}

/// Knowledge lookup constants.
pub mod knowledge {
    /// Wikipedia REST summary endpoint (title appended as a path segment).
    pub const DEFAULT_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

    /// Wikidata entity data endpoint (`<id>.json` appended).
    pub const DEFAULT_ENTITY_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";

    /// Default TCP connect timeout in seconds.
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Default whole-request timeout in seconds.
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Wikidata property code for taxonomic order.
    pub const PROP_ORDER: &str = "P70";
    /// Wikidata property code for taxonomic family.
    pub const PROP_FAMILY: &str = "P71";
    /// Wikidata property code for taxonomic genus.
    pub const PROP_GENUS: &str = "P74";
}

/// Placeholder values used when a record field is absent.
pub mod placeholder {
    /// Marker for an unavailable taxonomic field.
    pub const UNAVAILABLE: &str = "N/A";
    /// Substituted when the summary has no extract.
    pub const NO_DESCRIPTION: &str = "No description available.";
    /// Substituted when the summary has no display title.
    pub const UNKNOWN_COMMON_NAME: &str = "Unknown Common Name";
}

/// Upper bound for configured intra-op threads.
pub const MAX_INTRA_THREADS: usize = 64;
