use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use hyperlie::prelude::*;
use hyperlie::{branching, irrep};
use itertools::Itertools;
use serde::Serialize;

/// Prefix for environment variables that override the configuration, such
/// as `HYPERLIE_MAX_WEIGHTS`.
const ENV_PREFIX: &str = "HYPERLIE";

/// Root systems, irreps, tensor products, and branching rules of simple Lie
/// algebras
///
/// Algebras may be given in physics notation (`SU(5)`, `SO(10)`, `Sp(6)`) or
/// Cartan notation (`A4`, `D5`, `E6`). Weights are comma-separated Dynkin
/// labels (`1,0,0,1`) in Bourbaki node order.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// Print human-readable text instead of JSON.
    #[arg(short, long, global = true)]
    pub text: bool,

    /// Configuration file with resource limits and cache size.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the canonical Cartan type of an algebra.
    Classify {
        /// Algebra name (such as `SU(5)` or `E6`)
        id: String,
    },
    /// Print the root system and Dynkin diagram of an algebra.
    Info {
        /// Algebra name
        group: String,
    },
    /// Print the dimension, name, and weights of an irrep.
    Irrep {
        /// Algebra name
        group: String,
        /// Highest weight
        #[arg(allow_hyphen_values = true)]
        labels: Weight,
        /// Print every weight with its multiplicity.
        #[arg(short, long)]
        weights: bool,
    },
    /// Decompose the tensor product of two irreps.
    Tensor {
        /// Algebra name
        group: String,
        /// Highest weight of the left factor
        #[arg(allow_hyphen_values = true)]
        lhs: Weight,
        /// Highest weight of the right factor
        #[arg(allow_hyphen_values = true)]
        rhs: Weight,
    },
    /// Decompose a tensor power of an irrep.
    Power {
        /// Algebra name
        group: String,
        /// Highest weight
        #[arg(allow_hyphen_values = true)]
        labels: Weight,
        /// Number of tensor factors
        power: u32,
    },
    /// Print the subalgebra obtained by deleting a node from the Dynkin
    /// diagram.
    Break {
        /// Algebra name
        group: String,
        /// Index of the node to delete, starting from 0
        node: usize,
        /// Delete the node from the extended Dynkin diagram, whose last node
        /// is the lowest root.
        #[arg(short, long)]
        extended: bool,
    },
    /// Decompose an irrep into irreps of the subalgebra obtained by deleting
    /// a node from the Dynkin diagram.
    Branch {
        /// Algebra name
        group: String,
        /// Highest weight
        #[arg(allow_hyphen_values = true)]
        labels: Weight,
        /// Index of the node to delete, starting from 0
        node: usize,
        /// Delete the node from the extended Dynkin diagram, whose last node
        /// is the lowest root.
        #[arg(short, long)]
        extended: bool,
    },
    /// Print the algebras commonly used in grand unified theories.
    Groups,
}

/// Loads the engine configuration from defaults, then `path` (if any), then
/// environment variables.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let defaults = config::Config::try_from(&EngineConfig::default())
        .context("error serializing default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .and_then(|c| c.try_deserialize::<EngineConfig>())
        .context("error loading configuration")
}

pub(crate) fn exec(engine: &LieEngine, subcommand: Subcommand, text: bool) -> Result<()> {
    match subcommand {
        Subcommand::Classify { id } => {
            let t = engine.classify(&id)?;
            if text {
                println!("{t} = {}", t.physics_name());
                Ok(())
            } else {
                write_json_output(&t)
            }
        }

        Subcommand::Info { group } => {
            let t = engine.classify(&group)?;
            let info = engine.algebra_info(t)?;
            if text {
                println!("{} = {}", info.cartan_type, info.physics_name);
                println!("rank: {}", info.rank);
                println!("dimension: {}", info.dimension);
                println!("roots: {} ({} positive)", info.root_count, info.positive_root_count);
                println!("Weyl group order: {}", info.weyl_group_order);
                println!("highest root: {}", info.highest_root);
                println!("Cartan matrix:");
                for row in &info.cartan_matrix {
                    println!("  {}", row.iter().map(|x| format!("{x:>2}")).join(" "));
                }
                println!("Dynkin diagram:\n{}", info.dynkin_diagram);
                Ok(())
            } else {
                write_json_output(&info)
            }
        }

        Subcommand::Irrep {
            group,
            labels,
            weights,
        } => {
            let t = engine.classify(&group)?;
            let mut info = engine.irrep(t, &labels)?;
            if text {
                println!("{} {} = {}", info.cartan_type, info.highest_weight, info.name);
                println!("dimension: {}", info.dimension);
                println!("conjugate: {}", info.conjugate);
                if let Some(young_diagram) = &info.young_diagram {
                    println!("Young diagram: {young_diagram}");
                }
                if weights {
                    for w in &info.weights {
                        println!("  {} ×{}", w.labels, w.multiplicity);
                    }
                }
                Ok(())
            } else {
                if !weights {
                    info.weights.clear();
                }
                write_json_output(&info)
            }
        }

        Subcommand::Tensor { group, lhs, rhs } => {
            let t = engine.classify(&group)?;
            let decomposition = engine.tensor_product(t, &lhs, &rhs)?;
            if text {
                let rs = engine.root_system(t)?;
                println!("{}", irrep::tensor_formula(&rs, &decomposition)?.text);
                for term in &decomposition.terms {
                    println!("  {} ×{}", term.highest_weight, term.multiplicity);
                }
                Ok(())
            } else {
                write_json_output(&*decomposition)
            }
        }

        Subcommand::Power {
            group,
            labels,
            power,
        } => {
            let t = engine.classify(&group)?;
            let tensor_power = engine.tensor_power(t, &labels, power)?;
            if text {
                let rs = engine.root_system(t)?;
                println!("{}", irrep::power_formula(&rs, &tensor_power)?.text);
                for term in &tensor_power.terms {
                    println!("  {} ×{}", term.highest_weight, term.multiplicity);
                }
                Ok(())
            } else {
                write_json_output(&tensor_power)
            }
        }

        Subcommand::Break {
            group,
            node,
            extended,
        } => {
            let t = engine.classify(&group)?;
            let breaking = engine.break_symmetry(t, node, breaking_method(extended))?;
            if text {
                println!("{} → {}", breaking.parent.physics_name(), breaking.subalgebra_name());
                Ok(())
            } else {
                write_json_output(&breaking)
            }
        }

        Subcommand::Branch {
            group,
            labels,
            node,
            extended,
        } => {
            let t = engine.classify(&group)?;
            let rule = engine.branch(t, &labels, node, breaking_method(extended))?;
            if text {
                let rs = engine.root_system(t)?;
                println!(
                    "{} → {}",
                    rule.breaking.parent.physics_name(),
                    rule.breaking.subalgebra_name(),
                );
                println!("{}", irrep::branching_formula(&rs, &rule)?);
                Ok(())
            } else {
                write_json_output(&BranchOutput {
                    formula: irrep::branching_formula(&*engine.root_system(t)?, &rule)?,
                    rule,
                })
            }
        }

        Subcommand::Groups => {
            let examples = CartanType::supported_examples();
            if text {
                for ex in &examples {
                    println!("{:<8} {:<3} {}", ex.physics_name, ex.cartan_type, ex.description);
                }
                Ok(())
            } else {
                write_json_output(&examples)
            }
        }
    }
}

fn breaking_method(extended: bool) -> BreakingMethod {
    match extended {
        true => BreakingMethod::Extended,
        false => BreakingMethod::Standard,
    }
}

#[derive(Serialize)]
struct BranchOutput {
    #[serde(flatten)]
    rule: branching::BranchingRule,
    formula: String,
}

fn write_json_output<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
