//! Dynkin diagrams and identification of subdiagrams.

use std::fmt;

use itertools::Itertools;

use crate::weight::Labels;
use crate::{CartanType, LieError, LieResult, RootSystem};

/// Edge in a Dynkin diagram.
#[derive(serde::Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DynkinEdge {
    /// Lower node index.
    pub a: usize,
    /// Higher node index.
    pub b: usize,
    /// Number of lines in the bond, which is the product of the two
    /// off-diagonal Cartan matrix entries.
    pub bond: u8,
    /// Endpoint with the longer root, for bonds with more than one line.
    pub longer: Option<usize>,
}

/// Connected component of a subdiagram, identified as a simple algebra.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramComponent {
    /// Cartan type of the component.
    pub cartan_type: CartanType,
    /// Node index in the parent diagram for each node of `cartan_type`, in
    /// canonical order.
    pub nodes: Vec<usize>,
}

/// [Dynkin diagram](https://w.wiki/3m4x) of a simple Lie algebra, derived
/// from its Cartan matrix.
///
/// The extended diagram has one more node, at index `rank`, for the lowest
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynkinDiagram {
    cartan_type: CartanType,
    cartan_matrix: Vec<Labels>,
    extended: bool,
}

impl DynkinDiagram {
    /// Constructs the Dynkin diagram of a root system.
    pub fn new(root_system: &RootSystem) -> Self {
        Self {
            cartan_type: root_system.cartan_type(),
            cartan_matrix: root_system.cartan_matrix().to_vec(),
            extended: false,
        }
    }
    /// Constructs the extended Dynkin diagram of a root system by adding a
    /// node for the lowest root -γ.
    pub fn extended(root_system: &RootSystem) -> LieResult<Self> {
        let lowest_coroot = root_system.lowest_coroot()?;
        let mut cartan_matrix = root_system.cartan_matrix().to_vec();
        for row in &mut cartan_matrix {
            // ⟨α_i, -γ^∨⟩
            let entry = std::iter::zip(row.iter(), &lowest_coroot).map(|(a, c)| a * c).sum();
            row.push(entry);
        }
        // ⟨-γ, α_j^∨⟩
        let mut lowest_row: Labels = root_system.highest_root().labels.iter().map(|a| -a).collect();
        lowest_row.push(2);
        cartan_matrix.push(lowest_row);
        Ok(Self {
            cartan_type: root_system.cartan_type(),
            cartan_matrix,
            extended: true,
        })
    }
    /// Constructs the Dynkin diagram of a Cartan type without building the
    /// whole root system.
    pub fn from_cartan_type(cartan_type: CartanType) -> Self {
        Self {
            cartan_type,
            cartan_matrix: cartan_type
                .cartan_matrix()
                .iter()
                .map(|row| Labels::from_slice(row))
                .collect(),
            extended: false,
        }
    }

    /// Returns the Cartan type.
    pub fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }
    /// Returns whether this is the extended diagram.
    pub fn is_extended(&self) -> bool {
        self.extended
    }
    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.cartan_matrix.len()
    }

    /// Returns whether there is an edge between two nodes.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        i != j && self.cartan_matrix[i][j] != 0
    }
    /// Returns the nodes adjacent to `i`.
    pub fn neighbors(&self, i: usize) -> impl '_ + Iterator<Item = usize> {
        (0..self.node_count()).filter(move |&j| self.is_adjacent(i, j))
    }
    /// Returns the edges of the diagram.
    pub fn edges(&self) -> Vec<DynkinEdge> {
        let c = &self.cartan_matrix;
        (0..self.node_count())
            .tuple_combinations()
            .filter(|&(a, b)| self.is_adjacent(a, b))
            .map(|(a, b)| {
                let bond = (c[a][b] * c[b][a]).unsigned_abs() as u8;
                // |C_ab| > 1 means α_b is the shorter root.
                let longer = match c[a][b].abs().cmp(&c[b][a].abs()) {
                    std::cmp::Ordering::Greater => Some(a),
                    std::cmp::Ordering::Less => Some(b),
                    std::cmp::Ordering::Equal => None,
                };
                DynkinEdge { a, b, bond, longer }
            })
            .collect()
    }

    /// Returns the connected components of the subdiagram containing only
    /// `nodes`. Each component is sorted, and components are sorted by their
    /// lowest node.
    pub fn components(&self, nodes: &[usize]) -> Vec<Vec<usize>> {
        let mut remaining = nodes.iter().copied().sorted().dedup().collect_vec();
        let mut ret = vec![];
        while let Some(&start) = remaining.first() {
            let mut component = vec![start];
            remaining.retain(|&n| n != start);
            let mut next_unprocessed_index = 0;
            while next_unprocessed_index < component.len() {
                let node = component[next_unprocessed_index];
                let (adjacent, rest): (Vec<usize>, Vec<usize>) =
                    remaining.iter().partition(|&&n| self.is_adjacent(node, n));
                component.extend(adjacent);
                remaining = rest;
                next_unprocessed_index += 1;
            }
            component.sort_unstable();
            ret.push(component);
        }
        ret
    }

    /// Identifies each connected component of the subdiagram containing only
    /// `nodes` as a simple algebra.
    ///
    /// When a component matches more than one way (such as a diagram
    /// automorphism, or B<sub>2</sub> versus C<sub>2</sub>), the node mapping
    /// that is lexicographically smallest wins.
    pub fn identify_components(&self, nodes: &[usize]) -> LieResult<Vec<DiagramComponent>> {
        self.components(nodes)
            .into_iter()
            .map(|component| {
                self.identify_component(&component).ok_or_else(|| {
                    LieError::UnsupportedOperation(format!(
                        "cannot identify subdiagram {component:?} of {}",
                        self.cartan_type,
                    ))
                })
            })
            .collect()
    }

    fn identify_component(&self, component: &[usize]) -> Option<DiagramComponent> {
        let sub = |i: usize, j: usize| self.cartan_matrix[i][j];
        let sub_profile = row_profile(component.len(), |i, j| sub(component[i], component[j]));

        let mut best: Option<DiagramComponent> = None;
        for cartan_type in candidate_types(component.len()) {
            let canonical = cartan_type.cartan_matrix();
            if row_profile(canonical.len(), |i, j| canonical[i][j]) != sub_profile {
                continue;
            }
            let mut mapping = vec![];
            if !extend_mapping(&canonical, &sub, component, &mut mapping) {
                continue;
            }
            if best.as_ref().is_none_or(|b| mapping < b.nodes) {
                best = Some(DiagramComponent {
                    cartan_type,
                    nodes: mapping,
                });
            }
        }
        best
    }
}

/// Returns every canonical Cartan type of a given rank, in series order.
fn candidate_types(rank: usize) -> Vec<CartanType> {
    let Ok(n) = u8::try_from(rank) else {
        return vec![];
    };
    let mut ret = vec![];
    if n >= 1 {
        ret.push(CartanType::A(n));
    }
    if n >= 2 {
        ret.push(CartanType::B(n));
        ret.push(CartanType::C(n));
    }
    if n >= 4 {
        ret.push(CartanType::D(n));
    }
    match n {
        2 => ret.push(CartanType::G2),
        4 => ret.push(CartanType::F4),
        6 => ret.push(CartanType::E6),
        7 => ret.push(CartanType::E7),
        8 => ret.push(CartanType::E8),
        _ => (),
    }
    ret.sort();
    ret
}

/// Returns the sorted multiset of sorted rows, which is invariant under
/// relabeling nodes.
fn row_profile(n: usize, entry: impl Fn(usize, usize) -> i64) -> Vec<Vec<i64>> {
    (0..n)
        .map(|i| (0..n).map(|j| entry(i, j)).sorted().collect_vec())
        .sorted()
        .collect()
}

/// Extends `mapping` (canonical node index to parent node index) to a full
/// isomorphism from `canonical` onto `component`, trying nodes in ascending
/// order so that the first mapping found is lexicographically smallest.
fn extend_mapping(
    canonical: &[Vec<i64>],
    sub: &impl Fn(usize, usize) -> i64,
    component: &[usize],
    mapping: &mut Vec<usize>,
) -> bool {
    let i = mapping.len();
    if i == canonical.len() {
        return true;
    }
    for &node in component {
        if mapping.contains(&node) {
            continue;
        }
        let consistent = mapping.iter().enumerate().all(|(j, &other)| {
            sub(node, other) == canonical[i][j] && sub(other, node) == canonical[j][i]
        });
        if consistent {
            mapping.push(node);
            if extend_mapping(canonical, sub, component, mapping) {
                return true;
            }
            mapping.pop();
        }
    }
    false
}

/// Renders the longest chain of the diagram on one line with node indices
/// beneath, followed by one line for each node off the chain.
///
/// Single bonds are drawn as `---`, double bonds as `=>=` (pointing toward
/// the shorter root), and triple bonds as `≡>≡`.
impl fmt::Display for DynkinDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges = self.edges();
        let bond_str = |from: usize, to: usize| -> String {
            let Some(e) = edges
                .iter()
                .find(|e| (e.a, e.b) == (from.min(to), from.max(to)))
            else {
                return "   ".to_owned();
            };
            let line = match e.bond {
                1 => return "---".to_owned(),
                2 => '=',
                _ => '≡',
            };
            let arrow = if e.longer == Some(from) { '>' } else { '<' };
            format!("{line}{arrow}{line}")
        };

        let chain = self.longest_chain();
        match self.extended {
            true => writeln!(f, "{} extended", self.cartan_type)?,
            false => writeln!(f, "{}", self.cartan_type)?,
        }
        let mut nodes_line = String::new();
        let mut index_line = String::new();
        for (k, &node) in chain.iter().enumerate() {
            if k > 0 {
                nodes_line += &bond_str(chain[k - 1], node);
            }
            nodes_line += "o";
            index_line += &format!("{node:<4}");
        }
        writeln!(f, "{nodes_line}")?;
        write!(f, "{}", index_line.trim_end())?;
        for node in (0..self.node_count()).filter(|n| !chain.contains(n)) {
            for neighbor in self.neighbors(node) {
                write!(f, "\no {node} {} {neighbor}", bond_str(node, neighbor))?;
            }
        }
        Ok(())
    }
}

impl DynkinDiagram {
    /// Returns the nodes along a longest path in the diagram. Ties are broken
    /// toward lower node indices, and the path starts at its lower end.
    fn longest_chain(&self) -> Vec<usize> {
        // Breadth-first search, tracking predecessors. Returns the path from
        // the farthest node back to `start`.
        let path_to_farthest = |start: usize| -> Vec<usize> {
            let mut parent = vec![None; self.node_count()];
            let mut distance = vec![0; self.node_count()];
            let mut order = vec![start];
            let mut next_unprocessed_index = 0;
            while next_unprocessed_index < order.len() {
                let node = order[next_unprocessed_index];
                for neighbor in self.neighbors(node) {
                    if neighbor != start && parent[neighbor].is_none() {
                        parent[neighbor] = Some(node);
                        distance[neighbor] = distance[node] + 1;
                        order.push(neighbor);
                    }
                }
                next_unprocessed_index += 1;
            }
            let max_distance = distance.iter().copied().max().unwrap_or(0);
            let farthest = (0..self.node_count())
                .find(|&n| distance[n] == max_distance && (n == start || parent[n].is_some()))
                .unwrap_or(start);
            let mut path = vec![farthest];
            while let Some(p) = path.last().and_then(|&n| parent[n]) {
                path.push(p);
            }
            path
        };
        if self.node_count() == 0 {
            return vec![];
        }
        let end = path_to_farthest(0)[0];
        let mut chain = path_to_farthest(end);
        if chain.first() > chain.last() {
            chain.reverse();
        }
        chain
    }
}
