//! Domain constants shared across the crate.

/// File extension of Rill source files.
pub const RILL_EXT: &str = "rill";

/// Buffer name used when a source has no path.
pub const STRING_SOURCE_NAME: &str = "(string)";

/// A line consisting of exactly this text ends the program.
pub const END_MARKER: &str = "__END__";

/// Maximum nesting of blocks and expressions before the parser gives up.
pub const MAX_NESTING_DEPTH: u32 = 128;
