//! Command implementations for the pickapal CLI

pub mod pick;
pub mod script;

pub use pick::run_pick;
pub use script::run_script;

use pickapal_core::{NameRoster, PickConfig, SAMPLE_NAMES};
use tracing::{debug, warn};

/// Build a roster from config seed names, the sample list and extra names
///
/// Names are added in that order through normal validation; rejected ones
/// are logged and skipped.
pub fn seeded_roster(config: &PickConfig, sample: bool, extra: &[String]) -> NameRoster {
    let mut roster = NameRoster::new();

    let mut names: Vec<&str> = config.roster.seed_names.iter().map(String::as_str).collect();
    if sample {
        names.extend(SAMPLE_NAMES);
    }
    names.extend(extra.iter().map(String::as_str));

    for err in roster.seed(&names) {
        warn!("Skipping seed name: {}", err);
    }
    roster.set_remove_on_pick(config.roster.remove_on_pick);

    debug!(count = roster.len(), "roster seeded");
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_roster_order_and_dedupe() {
        let mut config = PickConfig::default();
        config.roster.seed_names = vec!["Andre".to_string()];
        config.roster.remove_on_pick = true;

        let roster = seeded_roster(&config, true, &["Zed".to_string(), "zed".to_string()]);

        assert_eq!(roster.names(), ["Andre", "Elisha", "Jasmine", "Po-Chun", "Zed"]);
        assert!(roster.remove_on_pick());
        assert!(roster.notice().is_none());
    }
}
