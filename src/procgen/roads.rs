//! Road network graph and connectivity repair.
//!
//! Uses petgraph for the underlying graph structure. Nodes are road cells in
//! `(row, col)` grid coordinates; edges join 4-adjacent road cells.

use std::collections::{BTreeSet, HashSet};

use bevy::prelude::*;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::world::Cell;

/// Undirected graph over road cells.
#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    graph: UnGraphMap<Cell, ()>,
}

impl RoadNetwork {
    /// Build a network from road cells. Duplicates are ignored.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let sorted: BTreeSet<Cell> = cells.into_iter().collect();
        let mut network = Self::default();
        for cell in sorted {
            network.insert(cell);
        }
        network
    }

    /// Add a road cell and link it to any road neighbours already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.graph.contains_node(cell) {
            return false;
        }
        self.graph.add_node(cell);
        let (row, col) = cell;
        let neighbors = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        for neighbor in neighbors.into_iter().flatten() {
            if self.graph.contains_node(neighbor) {
                self.graph.add_edge(cell, neighbor, ());
            }
        }
        true
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.graph.contains_node(cell)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of adjacency links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn cells(&self) -> BTreeSet<Cell> {
        self.graph.nodes().collect()
    }

    /// Connected components, each in BFS order from its smallest cell.
    /// Components are listed in order of their smallest cell.
    pub fn components(&self) -> Vec<Vec<Cell>> {
        let mut seen: HashSet<Cell> = HashSet::with_capacity(self.len());
        let mut components = Vec::new();

        for start in self.cells() {
            if seen.contains(&start) {
                continue;
            }
            let mut component = Vec::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(cell) = bfs.next(&self.graph) {
                seen.insert(cell);
                component.push(cell);
            }
            components.push(component);
        }

        components
    }

    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }
}

/// Finds the closest pair of cells between two components.
///
/// Implementations may use a spatial index; callers only rely on getting a
/// pair with minimal Manhattan distance.
pub trait NearestPairSearch {
    /// Returns `(from_main, from_other)`, or `None` if either side is empty.
    fn nearest_pair(&self, main: &[Cell], other: &[Cell]) -> Option<(Cell, Cell)>;
}

/// Exhaustive pairwise scan. Quadratic, fine for city-sized grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustivePairSearch;

impl NearestPairSearch for ExhaustivePairSearch {
    fn nearest_pair(&self, main: &[Cell], other: &[Cell]) -> Option<(Cell, Cell)> {
        let mut best: Option<((Cell, Cell), usize)> = None;
        for &a in main {
            for &b in other {
                let dist = manhattan(a, b);
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some(((a, b), dist));
                }
            }
        }
        best.map(|(pair, _)| pair)
    }
}

pub fn manhattan(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// L-shaped connector from `from` to `to`: along `from`'s row to `to`'s
/// column, then along that column to `to`'s row. Both endpoints included,
/// `manhattan(from, to) + 1` cells in total.
pub fn l_path(from: Cell, to: Cell) -> Vec<Cell> {
    let (r1, c1) = from;
    let (r2, c2) = to;
    let mut path = Vec::with_capacity(manhattan(from, to) + 1);

    for col in c1.min(c2)..=c1.max(c2) {
        path.push((r1, col));
    }
    for row in r1.min(r2)..=r1.max(r2) {
        if row != r1 {
            path.push((row, c2));
        }
    }
    path
}

/// Join every road component to the largest one.
///
/// Returns the repaired, de-duplicated road set; an empty input is returned
/// unchanged. Already-connected input comes back identical.
pub fn repair_connectivity(cells: &BTreeSet<Cell>) -> BTreeSet<Cell> {
    repair_connectivity_with(cells, &ExhaustivePairSearch)
}

/// [`repair_connectivity`] with a custom nearest-pair search.
pub fn repair_connectivity_with(
    cells: &BTreeSet<Cell>,
    search: &impl NearestPairSearch,
) -> BTreeSet<Cell> {
    let network = RoadNetwork::from_cells(cells.iter().copied());
    let mut components = network.components();
    if components.len() <= 1 {
        return cells.clone();
    }

    // Stable: equal-sized components keep discovery order.
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    let Some((main, others)) = components.split_first() else {
        return cells.clone();
    };

    let mut repaired = cells.clone();
    for other in others {
        if let Some((from, to)) = search.nearest_pair(main, other) {
            repaired.extend(l_path(from, to));
        }
    }

    debug!(
        "Road repair: merged {} components, {} -> {} cells",
        components.len(),
        cells.len(),
        repaired.len()
    );
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[Cell]) -> BTreeSet<Cell> {
        cells.iter().copied().collect()
    }

    #[test]
    fn components_follow_four_adjacency() {
        let network = RoadNetwork::from_cells([(0, 0), (0, 1), (1, 1), (3, 3), (4, 4)]);
        assert_eq!(network.len(), 5);
        assert_eq!(network.link_count(), 2);
        let components = network.components();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0], vec![(0, 0), (0, 1), (1, 1)]);
        assert!(!network.is_connected());
    }

    #[test]
    fn two_single_cells_get_an_eleven_cell_connector() {
        let input = set(&[(0, 0), (5, 5)]);
        let repaired = repair_connectivity(&input);

        assert_eq!(repaired.len(), 11);
        let expected: BTreeSet<Cell> = (0..=5).map(|c| (0, c)).chain((0..=5).map(|r| (r, 5))).collect();
        assert_eq!(repaired, expected);
        assert!(RoadNetwork::from_cells(repaired).is_connected());
    }

    #[test]
    fn connected_input_is_returned_unchanged() {
        let input = set(&[(2, 2), (2, 3), (2, 4), (3, 4)]);
        assert_eq!(repair_connectivity(&input), input);
        let once = repair_connectivity(&set(&[(0, 0), (9, 2), (4, 7)]));
        assert_eq!(repair_connectivity(&once), once);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert!(repair_connectivity(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn repair_merges_many_components_into_one() {
        let input = set(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (7, 9),
            (8, 9),
            (12, 0),
            (3, 14),
            (3, 15),
            (20, 20),
        ]);
        let repaired = repair_connectivity(&input);
        assert!(repaired.is_superset(&input));
        assert!(RoadNetwork::from_cells(repaired.iter().copied()).is_connected());
    }

    #[test]
    fn nearest_pair_minimizes_manhattan_distance() {
        let main = [(0, 0), (0, 1), (0, 2)];
        let other = [(4, 2), (5, 2), (4, 9)];
        assert_eq!(
            ExhaustivePairSearch.nearest_pair(&main, &other),
            Some(((0, 2), (4, 2)))
        );
        assert_eq!(ExhaustivePairSearch.nearest_pair(&main, &[]), None);
    }

    #[test]
    fn l_path_goes_across_then_down() {
        let path = l_path((6, 1), (2, 4));
        assert_eq!(path.len(), manhattan((6, 1), (2, 4)) + 1);
        assert_eq!(path[..4], [(6, 1), (6, 2), (6, 3), (6, 4)]);
        assert!(path.contains(&(2, 4)));
        assert!(RoadNetwork::from_cells(path).is_connected());
    }
}
