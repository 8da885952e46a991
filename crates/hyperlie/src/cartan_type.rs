//! Classification of simple Lie algebras.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::One;
use regex::Regex;

use crate::AlgebraError;

lazy_static! {
    /// Matches `SU(5)`, `so10`, `USp( 4 )`, etc.
    static ref PHYSICS_NAME: Regex =
        Regex::new(r"^(?i)(SU|SO|USP|SP)\s*(?:\(\s*(\d+)\s*\)|(\d+))$").expect("bad regex");
    /// Matches `A4`, `e_8`, etc.
    static ref CARTAN_NAME: Regex = Regex::new(r"^(?i)([A-G])\s*_?\s*(\d+)$").expect("bad regex");
}

/// [Cartan type](https://w.wiki/Ceb8) of a finite-dimensional simple Lie
/// algebra.
///
/// Only canonical types can be constructed through [`CartanType::new()`] and
/// [`CartanType::classify()`]: A<sub>n</sub> for n≥1, B<sub>n</sub> and
/// C<sub>n</sub> for n≥2, D<sub>n</sub> for n≥4, and the exceptional types.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CartanType {
    A(u8),
    B(u8),
    C(u8),
    D(u8),
    E6,
    E7,
    E8,
    F4,
    G2,
}

impl fmt::Display for CartanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.series(), self.rank())
    }
}

impl FromStr for CartanType {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::classify(s)
    }
}

impl serde::Serialize for CartanType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for CartanType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl CartanType {
    /// Constructs the canonical Cartan type for a series and rank.
    ///
    /// Low-rank coincidences are resolved to a single name: B1 and C1 are A1,
    /// and D3 is A3. D2 is rejected because it is not simple.
    pub fn new(series: char, rank: u64) -> Result<Self, AlgebraError> {
        let series = series.to_ascii_uppercase();
        let bad_rank = || AlgebraError::BadRank { series, rank };
        let n = |min: u64| -> Result<u8, AlgebraError> {
            if rank < min {
                return Err(bad_rank());
            }
            u8::try_from(rank).map_err(|_| bad_rank())
        };
        Ok(match series {
            'A' => CartanType::A(n(1)?),
            'B' | 'C' if rank == 1 => CartanType::A(1),
            'B' => CartanType::B(n(2)?),
            'C' => CartanType::C(n(2)?),
            'D' if rank == 2 => {
                return Err(AlgebraError::NotSimple {
                    name: format!("D{rank}"),
                    factors: vec![CartanType::A(1), CartanType::A(1)],
                });
            }
            'D' if rank == 3 => CartanType::A(3),
            'D' => CartanType::D(n(4)?),
            'E' => match rank {
                6 => CartanType::E6,
                7 => CartanType::E7,
                8 => CartanType::E8,
                _ => return Err(bad_rank()),
            },
            'F' if rank == 4 => CartanType::F4,
            'G' if rank == 2 => CartanType::G2,
            'F' | 'G' => return Err(bad_rank()),
            _ => return Err(AlgebraError::Unparseable(format!("{series}{rank}"))),
        })
    }

    /// Parses an identifier in physics notation (`SU(5)`, `SO(10)`, `Sp(4)`)
    /// or Cartan notation (`A4`, `D5`, `E6`) and returns the canonical Cartan
    /// type.
    pub fn classify(identifier: &str) -> Result<Self, AlgebraError> {
        let s = identifier.trim();
        let unparseable = || AlgebraError::Unparseable(identifier.to_owned());

        if let Some(caps) = PHYSICS_NAME.captures(s) {
            let group = caps[1].to_ascii_uppercase();
            let digits = caps.get(2).or_else(|| caps.get(3)).ok_or_else(unparseable)?;
            let n: u64 = digits.as_str().parse().map_err(|_| unparseable())?;
            return match group.as_str() {
                "SU" => Self::new('A', n.saturating_sub(1)),
                "SO" if n % 2 == 1 => Self::new('B', n / 2),
                "SO" => Self::new('D', n / 2).map_err(|e| match e {
                    AlgebraError::NotSimple { factors, .. } => AlgebraError::NotSimple {
                        name: s.to_owned(),
                        factors,
                    },
                    other => other,
                }),
                _ if n % 2 == 1 => Err(unparseable()),
                _ => Self::new('C', n / 2),
            };
        }

        if let Some(caps) = CARTAN_NAME.captures(s) {
            let series = caps[1].chars().next().ok_or_else(unparseable)?;
            let n: u64 = caps[2].parse().map_err(|_| unparseable())?;
            return Self::new(series, n);
        }

        Err(unparseable())
    }

    /// Returns the series letter.
    pub fn series(self) -> char {
        match self {
            CartanType::A(_) => 'A',
            CartanType::B(_) => 'B',
            CartanType::C(_) => 'C',
            CartanType::D(_) => 'D',
            CartanType::E6 | CartanType::E7 | CartanType::E8 => 'E',
            CartanType::F4 => 'F',
            CartanType::G2 => 'G',
        }
    }

    /// Returns the rank, which is the number of simple roots.
    pub fn rank(self) -> usize {
        match self {
            CartanType::A(n) | CartanType::B(n) | CartanType::C(n) | CartanType::D(n) => n as usize,
            CartanType::E6 => 6,
            CartanType::E7 => 7,
            CartanType::E8 => 8,
            CartanType::F4 => 4,
            CartanType::G2 => 2,
        }
    }

    /// Returns the total number of roots.
    pub fn root_count(self) -> usize {
        let n = self.rank();
        match self {
            CartanType::A(_) => n * (n + 1),
            CartanType::B(_) | CartanType::C(_) => 2 * n * n,
            CartanType::D(_) => 2 * n * (n - 1),
            CartanType::E6 => 72,
            CartanType::E7 => 126,
            CartanType::E8 => 240,
            CartanType::F4 => 48,
            CartanType::G2 => 12,
        }
    }

    /// Returns the number of positive roots.
    pub fn positive_root_count(self) -> usize {
        self.root_count() / 2
    }

    /// Returns the dimension of the algebra, which is the number of
    /// generators.
    pub fn algebra_dimension(self) -> usize {
        self.rank() + self.root_count()
    }

    /// Returns the order of the Weyl group.
    pub fn weyl_group_order(self) -> BigUint {
        let n = self.rank() as u64;
        let factorial = |k: u64| (1..=k).map(BigUint::from).product::<BigUint>();
        match self {
            CartanType::A(_) => factorial(n + 1),
            CartanType::B(_) | CartanType::C(_) => (BigUint::one() << n) * factorial(n),
            CartanType::D(_) => (BigUint::one() << (n - 1)) * factorial(n),
            CartanType::E6 => BigUint::from(51_840_u32),
            CartanType::E7 => BigUint::from(2_903_040_u32),
            CartanType::E8 => BigUint::from(696_729_600_u32),
            CartanType::F4 => BigUint::from(1_152_u32),
            CartanType::G2 => BigUint::from(12_u32),
        }
    }

    /// Returns the name of the compact group in physics notation, such as
    /// `SU(5)`. Exceptional algebras are named by their Cartan type.
    ///
    /// [`CartanType::classify()`] inverts this.
    pub fn physics_name(self) -> String {
        let n = self.rank();
        match self {
            CartanType::A(_) => format!("SU({})", n + 1),
            CartanType::B(_) => format!("SO({})", 2 * n + 1),
            CartanType::C(_) => format!("Sp({})", 2 * n),
            CartanType::D(_) => format!("SO({})", 2 * n),
            _ => self.to_string(),
        }
    }

    /// Returns the Cartan matrix in Bourbaki node order, where entry `(i, j)`
    /// is ⟨α<sub>i</sub>, α<sub>j</sub><sup>∨</sup>⟩.
    pub fn cartan_matrix(self) -> Vec<Vec<i64>> {
        let n = self.rank();
        let mut m = vec![vec![0; n]; n];
        for i in 0..n {
            m[i][i] = 2;
        }
        let mut link = |i: usize, j: usize| {
            m[i][j] = -1;
            m[j][i] = -1;
        };
        match self {
            CartanType::A(_) | CartanType::B(_) | CartanType::C(_) | CartanType::F4 => {
                (1..n).for_each(|i| link(i - 1, i));
            }
            CartanType::D(_) => {
                (1..n - 1).for_each(|i| link(i - 1, i));
                link(n - 3, n - 1);
            }
            CartanType::E6 | CartanType::E7 | CartanType::E8 => {
                link(0, 2);
                link(1, 3);
                (3..n).for_each(|i| link(i - 1, i));
            }
            CartanType::G2 => link(0, 1),
        }
        match self {
            CartanType::B(_) => m[n - 2][n - 1] = -2,
            CartanType::C(_) => m[n - 1][n - 2] = -2,
            CartanType::F4 => m[1][2] = -2,
            CartanType::G2 => m[1][0] = -3,
            _ => (),
        }
        m
    }

    /// Returns the algebras commonly used in grand unified theories.
    pub fn supported_examples() -> Vec<SupportedAlgebra> {
        [
            (CartanType::A(2), "Standard Model color"),
            (CartanType::A(4), "Georgi-Glashow GUT"),
            (CartanType::D(5), "SO(10) GUT"),
            (CartanType::E6, "E6 GUT"),
            (CartanType::E7, "E7 GUT"),
            (CartanType::E8, "E8 GUT / heterotic string"),
        ]
        .into_iter()
        .map(|(cartan_type, description)| SupportedAlgebra {
            cartan_type,
            physics_name: cartan_type.physics_name(),
            rank: cartan_type.rank(),
            description,
        })
        .collect()
    }
}

/// Algebra listed by [`CartanType::supported_examples()`].
#[allow(missing_docs)]
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SupportedAlgebra {
    pub cartan_type: CartanType,
    pub physics_name: String,
    pub rank: usize,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn assert_classify(identifier: &str, expected: CartanType) {
        assert_eq!(CartanType::classify(identifier), Ok(expected), "{identifier}");
    }

    #[test]
    fn test_classify_physics_names() {
        assert_classify("SU(3)", CartanType::A(2));
        assert_classify("su5", CartanType::A(4));
        assert_classify(" SU( 5 ) ", CartanType::A(4));
        assert_classify("SO(10)", CartanType::D(5));
        assert_classify("SO(8)", CartanType::D(4));
        assert_classify("so(7)", CartanType::B(3));
        assert_classify("Sp(4)", CartanType::C(2));
        assert_classify("USp(6)", CartanType::C(3));
        assert_classify("E6", CartanType::E6);
    }

    #[test]
    fn test_classify_cartan_names() {
        assert_classify("A4", CartanType::A(4));
        assert_classify("d7", CartanType::D(7));
        assert_classify("E_8", CartanType::E8);
        assert_classify("F4", CartanType::F4);
        assert_classify("G2", CartanType::G2);
    }

    #[test]
    fn test_low_rank_coincidences() {
        assert_classify("SO(3)", CartanType::A(1));
        assert_classify("Sp(2)", CartanType::A(1));
        assert_classify("B1", CartanType::A(1));
        assert_classify("C1", CartanType::A(1));
        assert_classify("SO(6)", CartanType::A(3));
        assert_classify("D3", CartanType::A(3));

        assert_eq!(
            CartanType::classify("SO(4)"),
            Err(AlgebraError::NotSimple {
                name: "SO(4)".to_owned(),
                factors: vec![CartanType::A(1), CartanType::A(1)],
            }),
        );
        assert!(matches!(
            CartanType::classify("D2"),
            Err(AlgebraError::NotSimple { .. }),
        ));
    }

    #[test]
    fn test_classify_errors() {
        for bad in ["SU(1)", "SO(2)", "SO(1)", "Sp(0)", "A0", "D1", "E5", "E9", "F3", "G3"] {
            assert!(
                matches!(CartanType::classify(bad), Err(AlgebraError::BadRank { .. })),
                "{bad}",
            );
        }
        for bad in ["", "SU", "H3", "Sp(5)", "SU(3)xSU(2)", "hello"] {
            assert_eq!(
                CartanType::classify(bad),
                Err(AlgebraError::Unparseable(bad.to_owned())),
            );
        }
        assert!(CartanType::classify("SU(1000)").is_err());
    }

    #[test]
    fn test_physics_name_round_trip() {
        let types = (1..=8)
            .map(CartanType::A)
            .chain((2..=8).map(CartanType::B))
            .chain((2..=8).map(CartanType::C))
            .chain((4..=8).map(CartanType::D))
            .chain([
                CartanType::E6,
                CartanType::E7,
                CartanType::E8,
                CartanType::F4,
                CartanType::G2,
            ]);
        for t in types {
            assert_eq!(CartanType::classify(&t.physics_name()), Ok(t));
            assert_eq!(CartanType::classify(&t.to_string()), Ok(t));
        }
        assert_eq!(CartanType::D(5).physics_name(), "SO(10)");
        assert_eq!(CartanType::C(3).physics_name(), "Sp(6)");
    }

    #[test]
    fn test_weyl_group_order() {
        #[track_caller]
        fn assert_order(t: CartanType, expected: u64) {
            assert_eq!(t.weyl_group_order(), BigUint::from(expected));
        }

        assert_order(CartanType::A(1), 2);
        assert_order(CartanType::A(4), 120);
        assert_order(CartanType::B(3), 48);
        assert_order(CartanType::C(4), 384);
        assert_order(CartanType::D(4), 192);
        assert_order(CartanType::D(5), 1920);
        assert_order(CartanType::E6, 51_840);
        assert_order(CartanType::G2, 12);
    }

    #[test]
    fn test_algebra_dimension() {
        assert_eq!(CartanType::A(2).algebra_dimension(), 8);
        assert_eq!(CartanType::A(4).algebra_dimension(), 24);
        assert_eq!(CartanType::D(5).algebra_dimension(), 45);
        assert_eq!(CartanType::E6.algebra_dimension(), 78);
        assert_eq!(CartanType::E8.algebra_dimension(), 248);
        assert_eq!(CartanType::G2.algebra_dimension(), 14);
    }
}
