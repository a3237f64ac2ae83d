//! Table dependency graph for FK-aware emission ordering.
//!
//! Provides:
//! - Dependency graph construction from foreign key relationships
//! - Cycle-tolerant topological sorting for CREATE TABLE order
//! - Reporting of tables involved in circular FK relationships

use crate::model::RemlSchema;
use ahash::AHashMap;

/// Per-schema table dependency graph.
///
/// An edge points from a table to a table it references via foreign key.
/// Self-references and references to tables absent from the schema are
/// excluded at construction time; they carry no ordering information.
#[derive(Debug)]
pub struct TableGraph {
    names: Vec<String>,
    deps: Vec<Vec<usize>>,
}

/// Result of topological sort
#[derive(Debug)]
pub struct TopoSortResult {
    /// Every table exactly once, dependencies before dependents where
    /// the graph is acyclic. Tables inside a cycle keep a best-effort
    /// relative order.
    pub order: Vec<String>,
    /// Tables that were revisited while in progress (back-edge targets).
    pub cyclic_tables: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

impl TableGraph {
    /// Build a dependency graph from a schema. Table order follows the
    /// document's declaration order, which keeps sorting deterministic.
    pub fn from_schema(schema: &RemlSchema) -> Self {
        let names: Vec<String> = schema.tables.keys().cloned().collect();
        let index: AHashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut deps: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
        for (i, (name, table)) in schema.tables.iter().enumerate() {
            for fk in &table.foreign_keys {
                let target = fk.references.table.as_str();
                if target == name {
                    continue;
                }
                // Dangling references are ignored for ordering purposes
                if let Some(&t) = index.get(target) {
                    if !deps[i].contains(&t) {
                        deps[i].push(t);
                    }
                }
            }
        }

        Self { names, deps }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Tables the named table depends on (direct FK targets, excluding
    /// itself and dangling references).
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.deps[i].iter().map(|&d| self.names[d].as_str()).collect())
            .unwrap_or_default()
    }

    /// Depth-first topological sort tolerant of cycles.
    ///
    /// A table revisited while in progress is skipped instead of
    /// recursed into, which guarantees termination for any finite graph
    /// including self-loops and longer cycles. Inside a cycle the
    /// forward-reference order is best effort only.
    pub fn topo_sort(&self) -> TopoSortResult {
        let n = self.names.len();
        let mut state = vec![VisitState::Unvisited; n];
        let mut order: Vec<usize> = Vec::with_capacity(n);
        let mut cyclic: Vec<usize> = Vec::new();

        for i in 0..n {
            self.visit(i, &mut state, &mut order, &mut cyclic);
        }

        TopoSortResult {
            order: order.iter().map(|&i| self.names[i].clone()).collect(),
            cyclic_tables: cyclic.iter().map(|&i| self.names[i].clone()).collect(),
        }
    }

    fn visit(
        &self,
        i: usize,
        state: &mut [VisitState],
        order: &mut Vec<usize>,
        cyclic: &mut Vec<usize>,
    ) {
        match state[i] {
            VisitState::Done => return,
            VisitState::InProgress => {
                if !cyclic.contains(&i) {
                    cyclic.push(i);
                }
                return;
            }
            VisitState::Unvisited => {}
        }

        state[i] = VisitState::InProgress;
        for &dep in &self.deps[i] {
            self.visit(dep, state, order, cyclic);
        }
        state[i] = VisitState::Done;
        order.push(i);
    }
}

/// Emission order for a schema's tables: a permutation of exactly the
/// schema's table names, referenced tables first where acyclic.
pub fn order_tables(schema: &RemlSchema) -> Vec<String> {
    TableGraph::from_schema(schema).topo_sort().order
}
