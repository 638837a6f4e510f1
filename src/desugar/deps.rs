//! Dependency grouping for the declarations of one `let`.
//!
//! Declarations that reach each other (directly or through a chain) must be
//! bound simultaneously. Everything else can be bound one after the other,
//! dependencies first.
//!
//! ```text
//! { a = b; b = a; c = 1 }   ==>   [{c}, {a, b}]
//! ```

use std::collections::BTreeSet;

use crate::ast::PatternDeclaration;

/// Direct dependency matrix over a list of declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: Vec<Vec<bool>>,
}

impl DependencyGraph {
    /// `declarations[i]` depends on `declarations[j]` if a variable bound by
    /// the pattern of `j` is free in the right-hand side of `i`. Every
    /// declaration depends on itself.
    pub fn new(declarations: &[PatternDeclaration]) -> Self {
        let free: Vec<_> = declarations
            .iter()
            .map(|decl| decl.body.free_variables())
            .collect();
        let bound: Vec<_> = declarations
            .iter()
            .map(|decl| decl.pattern.bound_variables())
            .collect();

        let adjacency = (0..declarations.len())
            .map(|i| {
                (0..declarations.len())
                    .map(|j| i == j || bound[j].iter().any(|name| free[i].contains(&name.value)))
                    .collect()
            })
            .collect();

        DependencyGraph { adjacency }
    }

    /// Builds a graph of `size` nodes from explicit `(from, to)` edges.
    pub fn from_edges(size: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![vec![false; size]; size];
        for (i, row) in adjacency.iter_mut().enumerate() {
            row[i] = true;
        }
        for &(from, to) in edges {
            adjacency[from][to] = true;
        }
        DependencyGraph { adjacency }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn depends_on(&self, from: usize, to: usize) -> bool {
        self.adjacency[from][to]
    }

    /// Transitive closure (Floyd–Warshall).
    pub fn closure(&self) -> Vec<Vec<bool>> {
        let n = self.len();
        let mut reach = self.adjacency.clone();
        for k in 0..n {
            for i in 0..n {
                if !reach[i][k] {
                    continue;
                }
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach
    }

    /// Partition into classes of mutually reachable declarations.
    ///
    /// A node joins the first clique whose representative it reaches and is
    /// reached by, otherwise it opens a new one. Cliques and their members are
    /// in ascending index order.
    pub fn cliques(&self) -> Vec<Vec<usize>> {
        let reach = self.closure();
        let mut cliques: Vec<Vec<usize>> = Vec::new();

        for node in 0..self.len() {
            let joined = cliques.iter_mut().find(|clique| {
                let representative = clique[0];
                reach[node][representative] && reach[representative][node]
            });
            match joined {
                Some(clique) => clique.push(node),
                None => cliques.push(vec![node]),
            }
        }

        cliques
    }

    /// Cliques ordered so that no group depends on a later one.
    pub fn ordered_groups(&self) -> Vec<Vec<usize>> {
        let cliques = self.cliques();
        let count = cliques.len();

        let mut owner = vec![0; self.len()];
        for (index, clique) in cliques.iter().enumerate() {
            for &node in clique {
                owner[node] = index;
            }
        }

        // quotient graph: an edge from a clique to every clique it depends on
        let mut edges = vec![vec![false; count]; count];
        let mut incoming = vec![0usize; count];
        for (i, row) in self.adjacency.iter().enumerate() {
            for (j, &depends) in row.iter().enumerate() {
                let (from, to) = (owner[i], owner[j]);
                if depends && from != to && !edges[from][to] {
                    edges[from][to] = true;
                    incoming[to] += 1;
                }
            }
        }

        // Kahn's algorithm, always taking the smallest ready clique
        let mut ready: BTreeSet<usize> = (0..count).filter(|&c| incoming[c] == 0).collect();
        let mut order = Vec::with_capacity(count);
        while let Some(next) = ready.pop_first() {
            order.push(next);
            for target in 0..count {
                if edges[next][target] {
                    incoming[target] -= 1;
                    if incoming[target] == 0 {
                        ready.insert(target);
                    }
                }
            }
        }

        // dependents come out first, so flip to get dependencies first
        order.reverse();

        let mut cliques: Vec<Option<Vec<usize>>> = cliques.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|index| cliques[index].take())
            .collect()
    }
}
