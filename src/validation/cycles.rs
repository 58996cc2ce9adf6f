//! Check 7: circular co-run groups.
//!
//! Every pair of tasks inside one co-run rule is joined by an edge in both
//! directions, labelled with the rule's position. Rules are not merged:
//! a walk may not take two consecutive edges from the same rule, so a
//! single rule on its own never forms a cycle, while rules chained back
//! onto themselves (`{T1,T2}`, `{T2,T3}`, `{T3,T1}`) do.
//!
//! Nodes are visited in order of first appearance across co-run rules, so
//! the reported cycle is stable for a given rule list.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS, back edges)

use std::collections::HashMap;

use crate::models::{Diagnostic, Entity, Rule};

/// Co-run adjacency: node -> (neighbor, rule index), in insertion order.
#[derive(Debug, Default)]
struct CoRunGraph<'a> {
    nodes: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    edges: Vec<Vec<(usize, usize)>>,
}

impl<'a> CoRunGraph<'a> {
    fn build(rules: &'a [Rule]) -> Self {
        let mut g = Self::default();
        for (rule_index, rule) in rules.iter().enumerate() {
            let Rule::CoRun { tasks } = rule else {
                continue;
            };
            for a in tasks {
                for b in tasks {
                    if a == b {
                        continue;
                    }
                    let ia = g.node(a);
                    let ib = g.node(b);
                    if !g.edges[ia].contains(&(ib, rule_index)) {
                        g.edges[ia].push((ib, rule_index));
                    }
                }
            }
        }
        g
    }

    fn node(&mut self, id: &'a str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(id);
        self.index.insert(id, i);
        self.edges.push(Vec::new());
        i
    }

    /// First cycle found, as a node path that ends where it starts.
    fn first_cycle(&self) -> Option<Vec<&'a str>> {
        let n = self.nodes.len();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut stack = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            if let Some(cycle) = self.dfs(start, None, &mut visited, &mut on_stack, &mut stack) {
                return Some(cycle.into_iter().map(|i| self.nodes[i]).collect());
            }
        }
        None
    }

    fn dfs(
        &self,
        node: usize,
        via_rule: Option<usize>,
        visited: &mut [bool],
        on_stack: &mut [bool],
        stack: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        visited[node] = true;
        on_stack[node] = true;
        stack.push(node);

        for &(next, rule) in &self.edges[node] {
            if via_rule == Some(rule) {
                continue;
            }
            if on_stack[next] {
                // Back edge: the cycle runs from `next`'s stack slot to here.
                let start = stack.iter().position(|&s| s == next).unwrap_or(0);
                let mut cycle = stack[start..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            if !visited[next] {
                if let Some(cycle) = self.dfs(next, Some(rule), visited, on_stack, stack) {
                    return Some(cycle);
                }
            }
        }

        stack.pop();
        on_stack[node] = false;
        None
    }
}

/// Returns the first co-run cycle, if any, as task ids with the first id
/// repeated at the end.
pub fn find_co_run_cycle(rules: &[Rule]) -> Option<Vec<String>> {
    CoRunGraph::build(rules)
        .first_cycle()
        .map(|c| c.into_iter().map(str::to_string).collect())
}

pub(super) fn check_co_run_cycles(rules: &[Rule], out: &mut Vec<Diagnostic>) {
    if let Some(cycle) = find_co_run_cycle(rules) {
        out.push(Diagnostic::error(
            Entity::Rules,
            cycle.join("→"),
            format!("Circular co-run dependency detected: {}", cycle.join(" → ")),
        ));
    }
}
