//! Application constants for the wildfire analyst
//!
//! Column names of the California fire perimeter export, default thresholds,
//! and the code tables used to describe containment methods and causes.

// =============================================================================
// Source Columns
// =============================================================================

/// Fire year
pub const YEAR: &str = "YEAR_";

/// Burned area in acres
pub const ACRES: &str = "GIS_ACRES";

/// Timestamp at which the fire was reported
pub const ALARM_DATE: &str = "ALARM_DATE";

/// Timestamp at which the fire was declared contained
pub const CONT_DATE: &str = "CONT_DATE";

pub const AGENCY: &str = "AGENCY";
pub const UNIT_ID: &str = "UNIT_ID";
pub const FIRE_NAME: &str = "FIRE_NAME";
pub const STATE: &str = "STATE";

/// Containment method code (1-8)
pub const C_METHOD: &str = "C_METHOD";

/// Cause code (1-19)
pub const CAUSE: &str = "CAUSE";

// =============================================================================
// Derived Columns
// =============================================================================

/// Hours between alarm and containment
pub const CONTAINMENT_DURATION: &str = "Containment_Duration";

/// Calendar month of the alarm timestamp (1-12)
pub const MONTH: &str = "Month";

/// Year floor-divided to its decade
pub const DECADE: &str = "Decade";

pub const C_METHOD_DESCRIPTION: &str = "C_METHOD_DESCRIPTION";
pub const CAUSE_DESCRIPTION: &str = "CAUSE_DESCRIPTION";

/// Acres per containment hour
pub const EFFECTIVENESS: &str = "Effectiveness";

// =============================================================================
// Cleaning Defaults
// =============================================================================

/// Columns with excessive missing data or limited analytical utility
pub const COLUMNS_TO_DROP: &[&str] = &["COMMENTS", "COMPLEX_NAME", "IRWINID", "COMPLEX_ID", "FIRE_NUM"];

/// Columns that must be present in the raw input
pub const ESSENTIAL_COLUMNS: &[&str] = &[YEAR, ACRES, ALARM_DATE, CONT_DATE];

/// Number of leading essential columns whose nulls remove the row
pub const ROW_REQUIRED_ESSENTIAL_COUNT: usize = 2;

/// Placeholder for missing agency and unit identifiers
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Placeholder for missing fire names
pub const UNNAMED_FIRE_PLACEHOLDER: &str = "Unnamed Fire";

// =============================================================================
// Validation Defaults
// =============================================================================

/// One year in hours
pub const DEFAULT_MAX_CONTAINMENT_HOURS: f64 = 8760.0;

pub const DEFAULT_OUTLIER_IQR_MULTIPLIER: f64 = 3.0;

pub const DEFAULT_MIN_YEAR: i64 = 1850;
pub const DEFAULT_MAX_YEAR: i64 = 2025;

// =============================================================================
// Statistics Defaults
// =============================================================================

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Acres percentiles reported by the summary statistics
pub const FIRE_SIZE_PERCENTILES: &[u8] = &[25, 75, 90, 95, 99];

// =============================================================================
// File Layout
// =============================================================================

pub const DEFAULT_RAW_DATA_PATH: &str = "Resources/California_Fire_Perimeters_(all).csv";
pub const DEFAULT_CLEANED_DATA_PATH: &str = "Resources/cleaned_fire_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const TABLES_SUBDIR: &str = "tables";

// =============================================================================
// Code Tables
// =============================================================================

/// Containment method codes as published with the perimeter dataset
pub const CONTAINMENT_METHODS: &[(i64, &str)] = &[
    (1, "Direct Attack (Hand Crews & Tools)"),
    (2, "Indirect Attack (Firebreaks & Barriers)"),
    (3, "Aerial Suppression (Planes & Helicopters)"),
    (4, "Backburning (Controlled Burns)"),
    (5, "Fireline Construction (Bulldozers & Trenching)"),
    (6, "Natural Barriers (Using Terrain Features)"),
    (7, "Mop-up (Extinguishing Hot Spots)"),
    (8, "Fire Shelter Deployment (Emergency Only)"),
];

/// Fire cause codes
pub const FIRE_CAUSES: &[(i64, &str)] = &[
    (1, "Lightning"),
    (2, "Equipment Use"),
    (3, "Smoking"),
    (4, "Campfire"),
    (5, "Debris Burning"),
    (6, "Railroad"),
    (7, "Arson"),
    (8, "Children"),
    (9, "Miscellaneous"),
    (10, "Fireworks"),
    (11, "Powerline"),
    (12, "Structure"),
    (13, "Escaped Prescribed Burn"),
    (14, "Unknown"),
    (15, "Vehicle"),
    (16, "Reburn"),
    (17, "Playing with Fire"),
    (18, "Miscellaneous Human Causes"),
    (19, "Other"),
];
