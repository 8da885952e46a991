//! Conjugation and physics names of irreps.

use std::fmt;

use itertools::Itertools;

use crate::branching::BranchingRule;
use crate::dimension::dimension;
use crate::tensor::{TensorDecomposition, TensorPower, TensorTerm};
use crate::{LieResult, RootSystem, Weight, weyl};

/// Returns the highest weight of the conjugate (dual) irrep, which is
/// -w<sub>0</sub>(Λ) where w<sub>0</sub> is the longest Weyl group element.
pub fn conjugate(root_system: &RootSystem, highest_weight: &Weight) -> LieResult<Weight> {
    highest_weight.check_highest_weight(root_system.rank())?;
    Ok(weyl::to_dominant(root_system, &-highest_weight)?.0)
}

/// Physics name of an irrep, which is its dimension, barred if it is the
/// barred member of a conjugate pair.
///
/// Of two conjugate irreps, the one whose Dynkin labels are lexicographically
/// smaller gets the bar. Irreps with the same dimension that are not
/// conjugate get the same name.
#[derive(serde::Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IrrepName {
    /// Dimension of the irrep.
    pub dimension: u64,
    /// Whether the name has a bar over it.
    pub barred: bool,
}

impl fmt::Display for IrrepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.barred {
            // Combining overline after every digit
            for c in self.dimension.to_string().chars() {
                write!(f, "{c}\u{0305}")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.dimension)
        }
    }
}

impl IrrepName {
    /// Returns the name of the irrep with highest weight `highest_weight`.
    pub fn new(root_system: &RootSystem, highest_weight: &Weight) -> LieResult<Self> {
        let dimension = dimension(root_system, highest_weight)?;
        let barred = conjugate(root_system, highest_weight)? > *highest_weight;
        Ok(Self { dimension, barred })
    }

    /// Returns the name in LaTeX, such as `\bar{3}` or `\overline{10}`.
    pub fn latex(self) -> String {
        match (self.barred, self.dimension) {
            (false, d) => d.to_string(),
            (true, d @ 0..10) => format!(r"\bar{{{d}}}"),
            (true, d) => format!(r"\overline{{{d}}}"),
        }
    }
}

/// Tensor product decomposition written out as a formula.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TensorFormula {
    /// Plain text, such as `3 ⊗ 3 = 6 ⊕ 3̄`.
    pub text: String,
    /// LaTeX, such as `3 \otimes 3 = 6 \oplus \bar{3}`.
    pub latex: String,
}

/// Writes out a tensor product decomposition using physics names.
pub fn tensor_formula(
    root_system: &RootSystem,
    decomposition: &TensorDecomposition,
) -> LieResult<TensorFormula> {
    let lhs = IrrepName::new(root_system, &decomposition.lhs)?;
    let rhs = IrrepName::new(root_system, &decomposition.rhs)?;
    let (text_sum, latex_sum) = direct_sum(root_system, &decomposition.terms)?;
    Ok(TensorFormula {
        text: format!("{lhs} ⊗ {rhs} = {text_sum}"),
        latex: format!(r"{} \otimes {} = {latex_sum}", lhs.latex(), rhs.latex()),
    })
}

/// Writes out a tensor power using physics names, such as
/// `3^⊗3 = 10 ⊕ 2×8 ⊕ 1`.
pub fn power_formula(root_system: &RootSystem, power: &TensorPower) -> LieResult<TensorFormula> {
    let base = IrrepName::new(root_system, &power.highest_weight)?;
    let k = power.power;
    let (text_sum, latex_sum) = direct_sum(root_system, &power.terms)?;
    Ok(TensorFormula {
        text: format!("{base}^⊗{k} = {text_sum}"),
        latex: format!(r"{}^{{\otimes {k}}} = {latex_sum}", base.latex()),
    })
}

/// Returns a direct sum of irreps as plain text and as LaTeX.
fn direct_sum(root_system: &RootSystem, terms: &[TensorTerm]) -> LieResult<(String, String)> {
    let terms = terms
        .iter()
        .map(|t| Ok((t.multiplicity, IrrepName::new(root_system, &t.highest_weight)?)))
        .collect::<LieResult<Vec<_>>>()?;

    let text_terms = terms.iter().map(|&(m, name)| match m {
        1 => name.to_string(),
        _ => format!("{m}×{name}"),
    });
    let latex_terms = terms.iter().map(|&(m, name)| match m {
        1 => name.latex(),
        _ => format!(r"{m} \times {}", name.latex()),
    });
    Ok((
        text_terms.format(" ⊕ ").to_string(),
        latex_terms.format(r" \oplus ").to_string(),
    ))
}

/// Writes out a branching rule using physics names, such as
/// `10 → (3̄, 1)(4) ⊕ (3, 2)(-1) ⊕ (1, 1)(-6)`.
///
/// If the subalgebra has a U(1) factor, each subalgebra irrep is followed by
/// its U(1) charge, scaled to an integer.
pub fn branching_formula(root_system: &RootSystem, rule: &BranchingRule) -> LieResult<String> {
    let factor_root_systems = rule
        .breaking
        .factors
        .iter()
        .map(|f| RootSystem::new(f.cartan_type))
        .collect::<LieResult<Vec<_>>>()?;

    let parent = IrrepName::new(root_system, &rule.highest_weight)?;
    let mut terms = vec![];
    for t in &rule.terms {
        let names = std::iter::zip(&factor_root_systems, &t.irreps)
            .map(|(rs, w)| IrrepName::new(rs, w))
            .collect::<LieResult<Vec<_>>>()?;
        let irrep = match names.as_slice() {
            [] => String::new(),
            [name] => name.to_string(),
            _ => format!("({})", names.iter().join(", ")),
        };
        let mult = match t.multiplicity {
            1 => String::new(),
            m => format!("{m}×"),
        };
        match rule.breaking.u1_count {
            0 => terms.push(format!("{mult}{irrep}")),
            _ => terms.push(format!("{mult}{irrep}({})", t.scaled_charge)),
        }
    }
    Ok(format!("{parent} → {}", terms.join(" ⊕ ")))
}
