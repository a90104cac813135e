/// Non-measurement columns required in the source header
pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";
pub const DAY_COLUMN: &str = "day";
pub const HOUR_COLUMN: &str = "hour";
pub const STATION_COLUMN: &str = "station";

/// Bucket count bounds and the dashboard's default
pub const MIN_BIN_COUNT: u32 = 1;
pub const MAX_BIN_COUNT: u32 = 100;
pub const DEFAULT_BIN_COUNT: u32 = 30;

/// Bucket labels carry the calendar date of the bucket's left edge
pub const BUCKET_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Cell markers treated as missing without a coercion warning
pub const MISSING_MARKERS: [&str; 3] = ["", "NA", "NaN"];
