// Inventory CRUD: property and vehicle listings, each owned by one account.
// Admin bypass unlocks the cross-account list variants; per-record ownership
// is unchanged for everyone.

pub mod properties;
pub mod vehicles;
