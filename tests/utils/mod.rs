pub mod actions;
pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{assert_each_team_plays, assert_no_repeated_pairs};
pub use setup::{TestSetup, TestSetupBuilder};
