//! Topology report attached to every generated mesh.
//!
//! The facade generators only trust a solid whose diagnostics say it is
//! closed; the CLI prints [`GeomMeshDiagnostics::summary`] next to each
//! element.

/// Topology and repair statistics for a finalized mesh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Vertices merged into an earlier one while welding.
    pub welded_vertex_count: usize,
    /// Zero-area triangles dropped.
    pub degenerate_triangle_count: usize,
    /// Edges used by exactly one triangle.
    pub open_edge_count: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edge_count: usize,
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0
    }

    /// Watertight and manifold.
    #[must_use]
    pub fn is_valid_solid(&self) -> bool {
        self.is_watertight() && self.non_manifold_edge_count == 0
    }

    /// One-line report, `V:8 T:12` followed by any non-zero repair counts.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("V:{} T:{}", self.vertex_count, self.triangle_count);
        for (label, count) in [
            ("welded", self.welded_vertex_count),
            ("degenerate", self.degenerate_triangle_count),
            ("open", self.open_edge_count),
            ("non-manifold", self.non_manifold_edge_count),
        ] {
            if count > 0 {
                out.push_str(&format!(" {label}:{count}"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::GeomMeshDiagnostics;

    #[test]
    fn summary_lists_only_present_issues() {
        let mut diag = GeomMeshDiagnostics {
            vertex_count: 8,
            triangle_count: 12,
            ..GeomMeshDiagnostics::default()
        };
        assert_eq!(diag.summary(), "V:8 T:12");
        assert!(diag.is_valid_solid());

        diag.open_edge_count = 4;
        diag.welded_vertex_count = 1;
        assert_eq!(diag.summary(), "V:8 T:12 welded:1 open:4");
        assert!(!diag.is_valid_solid());
    }
}
