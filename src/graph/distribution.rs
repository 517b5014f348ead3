use std::collections::BTreeMap;
use std::fmt;

use crate::graph::Graph;

/// How many vertices have each out-degree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DegreeDistribution {
    counts: BTreeMap<usize, usize>,
}

impl DegreeDistribution {
    /// `(degree, vertices)` in increasing degree.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&d, &n)| (d, n))
    }

    pub fn vertices(&self) -> usize {
        self.counts.values().sum()
    }
}

pub fn out_degree_distribution<G: Graph + ?Sized>(graph: &G) -> DegreeDistribution {
    let mut counts = BTreeMap::new();
    for v in 0..graph.vertex_size() {
        *counts.entry(graph.out_degree(v)).or_insert(0) += 1;
    }
    DegreeDistribution { counts }
}

impl fmt::Display for DegreeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   degree   # vertices")?;
        writeln!(f, "   ------   ----------")?;
        for (degree, vertices) in self.iter() {
            writeln!(f, "   {:>6}   {:>10}", degree, vertices)?;
        }
        writeln!(f, "   total:   {:>10}", self.vertices())
    }
}
