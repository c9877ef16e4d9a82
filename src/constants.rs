//! Application constants for the strikers processor
//!
//! Table names, unit conversion factors and the literals recognised by
//! the field parsers.

// =============================================================================
// Tables and Statement Shape
// =============================================================================

/// Table holding the raw scraped player rows
pub const DEFAULT_SOURCE_TABLE: &str = "players";

/// Table receiving the normalized rows
pub const DEFAULT_TARGET_TABLE: &str = "player_stats";

/// Number of values in both the raw and the normalized statements
pub const EXPECTED_FIELD_COUNT: usize = 29;

/// A multi-line statement is complete once a line ends with this
pub const STATEMENT_TERMINATOR: &str = ");";

// =============================================================================
// Unit Conversion
// =============================================================================

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: u32 = 12;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Decimal places kept after height and weight conversion
pub const CONVERSION_DECIMALS: i32 = 2;

/// Multiplier for an `M` market value suffix
pub const MILLION: f64 = 1_000_000.0;

/// Multiplier for a `K` market value suffix
pub const THOUSAND: f64 = 1_000.0;

// =============================================================================
// Parser Literals
// =============================================================================

/// Market value text meaning the player has no price
pub const NOT_FOR_SALE: &str = "not for sale";

/// Currency symbols accepted in front of a market value bound
pub const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Literals (compared lowercase) treated as a missing number
pub const MISSING_NUMBER_LITERALS: &[&str] = &["unknown", "null", "none", ""];
