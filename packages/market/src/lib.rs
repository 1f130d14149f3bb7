// GuinéeMarket - marketplace core
//
// Client-side logic of a classifieds marketplace: vendors publish listings,
// clients browse and filter them, admins moderate listings and accounts.
// Persistence and authentication live in a hosted Supabase project reached
// through the kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
