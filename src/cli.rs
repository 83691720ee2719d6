//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::params::GeneratorConfig;

/// Asset family that can be generated on its own
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AssetGroup {
    Characters,
    Backgrounds,
    Ui,
    Props,
    Vfx,
    Audio,
    /// Every group above, in that order
    All,
}

impl AssetGroup {
    /// Concrete groups in generation order
    pub const EVERY: [AssetGroup; 6] = [
        AssetGroup::Characters,
        AssetGroup::Backgrounds,
        AssetGroup::Ui,
        AssetGroup::Props,
        AssetGroup::Vfx,
        AssetGroup::Audio,
    ];
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "blossom-assets")]
#[command(
    about = "Procedural art and audio generator for Tejimola: The Blossom From Clay",
    long_about = None
)]
pub struct Args {
    /// Asset groups to generate (default: all)
    #[arg(value_enum, value_name = "GROUP")]
    pub groups: Vec<AssetGroup>,

    /// Project asset root holding Art/, Audio/ and Resources/
    #[arg(long, value_name = "DIR", default_value = "Assets/_Project")]
    pub out: PathBuf,

    /// Base seed for every seeded-random generator
    #[arg(long, value_name = "N", default_value_t = 42)]
    pub seed: u64,
}

impl Args {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            out_root: self.out.clone(),
            seed: self.seed,
        }
    }

    /// Requested groups in order with `all` expanded and duplicates dropped
    pub fn resolved_groups(&self) -> Vec<AssetGroup> {
        resolve(&self.groups)
    }
}

fn resolve(requested: &[AssetGroup]) -> Vec<AssetGroup> {
    if requested.is_empty() {
        return AssetGroup::EVERY.to_vec();
    }

    let mut groups = Vec::new();
    for &group in requested {
        let expanded: &[AssetGroup] = match group {
            AssetGroup::All => &AssetGroup::EVERY,
            _ => std::slice::from_ref(&group),
        };
        for &g in expanded {
            if !groups.contains(&g) {
                groups.push(g);
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["blossom-assets"]);

        assert_eq!(args.out, PathBuf::from("Assets/_Project"));
        assert_eq!(args.seed, 42);
        assert_eq!(args.resolved_groups(), AssetGroup::EVERY.to_vec());
    }

    #[test]
    fn test_groups_keep_order_and_dedupe() {
        let args = Args::parse_from(["blossom-assets", "audio", "ui", "audio", "--seed", "7"]);

        assert_eq!(
            args.resolved_groups(),
            vec![AssetGroup::Audio, AssetGroup::Ui]
        );
        assert_eq!(args.config().seed, 7);
    }

    #[test]
    fn test_all_expands_in_place() {
        let args = Args::parse_from(["blossom-assets", "vfx", "all"]);
        let groups = args.resolved_groups();

        assert_eq!(groups[0], AssetGroup::Vfx);
        assert_eq!(groups.len(), 6);
        assert!(!groups.contains(&AssetGroup::All));
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        assert!(Args::try_parse_from(["blossom-assets", "shaders"]).is_err());
    }
}
