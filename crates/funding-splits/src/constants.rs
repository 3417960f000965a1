// Percent scales
pub const SPLITS_TOTAL_PERCENT: u64 = 1_000_000_000; // percent per billion (v2+ splits)
pub const MAX_PERMYRIAD: u64 = 10_000;               // v1 payout and ticket mods
pub const MAX_FEE: u64 = 1_000_000_000;              // protocol fee per billion
pub const MAX_RESERVED_RATE: u64 = MAX_PERMYRIAD;
pub const MAX_REDEMPTION_RATE: u64 = MAX_PERMYRIAD;
// Float percentages are scaled onto parts per 1e18 of 100% before multiplying
pub const FINE_PERCENT_TOTAL: u64 = 1_000_000_000_000_000_000;

// Amounts are wads: 18-decimal fixed point
pub const WAD_DECIMALS: u32 = 18;
pub const WAD: u128 = 1_000_000_000_000_000_000;

// Payout amounts shown and derived in the editor are rounded to 4 dp
pub const AMOUNT_PRECISION: u32 = 4;

// Default protocol fee (2.5%)
pub const DEFAULT_FEE_PERCENT: u64 = 25_000_000;

// CSV column layouts, one header row per record type
pub const SPLITS_CSV_HEADER: [&str; 6] = [
    "beneficiary",
    "percent",
    "preferClaimed",
    "lockedUntil",
    "projectId",
    "allocator",
];
pub const PAYOUT_MODS_CSV_HEADER: [&str; 6] = [
    "beneficiary",
    "percent",
    "preferUnstaked",
    "lockedUntil",
    "projectId",
    "allocator",
];
pub const TICKET_MODS_CSV_HEADER: [&str; 4] =
    ["beneficiary", "percent", "preferUnstaked", "lockedUntil"];
