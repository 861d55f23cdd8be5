/// Fractional digits kept for product prices (`NUMERIC(18, 2)`)
pub const PRICE_SCALE: u32 = 2;
